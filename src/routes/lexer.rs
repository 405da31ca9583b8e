//! Line reader and chunk tokenizer for route definitions.

/// Marks a physical line that continues on the next one.
pub const CONTINUATION_MARKER: char = '\\';

/// Bracket and quote pairs stripped from chunks, in priority order.
///
/// A pair applies when its left token equals the chunk's first character.
/// The last three pairs have an empty left token and so never apply.
pub const IGNORED_FIXES: [(&str, &str); 9] = [
    ("\"", "\""),
    ("'", "'"),
    ("`", "`"),
    ("{", "}"),
    ("(", ")"),
    ("[", "]"),
    ("", ","),
    ("", ";"),
    ("", ":"),
];

/// A continuation-joined, trimmed, non-blank line of definition text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogicalLine {
    /// The joined line text
    pub text: String,
    /// Line number (1-indexed) of the first physical line
    pub line: usize,
}

/// Reads logical lines out of definition text.
pub struct LineReader<'a> {
    input: &'a str,
    offset: usize,
    line: usize,
}

impl<'a> LineReader<'a> {
    /// Create a new reader over the given input.
    pub fn new(input: &'a str) -> Self {
        Self {
            input,
            offset: 0,
            line: 1,
        }
    }

    /// Read the next physical line, trimmed.
    fn next_physical(&mut self) -> Option<&'a str> {
        if self.offset >= self.input.len() {
            return None;
        }

        let rest = &self.input[self.offset..];
        let end = rest.find('\n').unwrap_or(rest.len());
        self.offset += end + 1;
        self.line += 1;

        Some(rest[..end].trim())
    }
}

impl Iterator for LineReader<'_> {
    type Item = LogicalLine;

    fn next(&mut self) -> Option<LogicalLine> {
        loop {
            let start_line = self.line;
            let mut text = String::new();
            let mut read_any = false;

            while let Some(physical) = self.next_physical() {
                read_any = true;
                match physical.strip_suffix(CONTINUATION_MARKER) {
                    // Spliced as-is, whitespace before the marker is kept
                    Some(head) => text.push_str(head),
                    None => {
                        text.push_str(physical);
                        break;
                    }
                }
            }

            if !read_any {
                return None;
            }
            if !text.is_empty() {
                return Some(LogicalLine {
                    text,
                    line: start_line,
                });
            }
        }
    }
}

/// Split a logical line into whitespace-separated chunks.
pub fn split_chunks(line: &str) -> impl Iterator<Item = &str> {
    line.split_whitespace()
}

/// Strip at most one bracket/quote pair from a chunk.
///
/// The first pair in [`IGNORED_FIXES`] whose left token is the chunk's first
/// character and whose right token ends it wins. A chunk made of a single
/// quote is both left and right token and strips to an empty string.
pub fn strip_fixes(chunk: &str) -> &str {
    for (left, right) in IGNORED_FIXES {
        if left.is_empty() || !chunk.starts_with(left) || !chunk.ends_with(right) {
            continue;
        }
        return chunk
            .get(left.len()..chunk.len() - right.len())
            .unwrap_or_default();
    }
    chunk
}
