//! Conversion of wildcard and shell-glob macro patterns to regex fragments.

use serde::Serialize;

/// Notation a macro pattern is written in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PatternDialect {
    /// Regular expression fragment, used as-is
    #[default]
    Regex,
    /// `*` matches anything, every other character is literal
    Wildcard,
    /// Extended glob: `*`, `?`, `[...]` classes and `{a,b}` alternation
    ShellGlob,
}

impl PatternDialect {
    /// Parse a dialect name (`regex`, `wildcard`, `glob`).
    pub fn from_name(name: &str) -> Option<Self> {
        match name.to_ascii_lowercase().as_str() {
            "regex" | "regexp" => Some(Self::Regex),
            "wildcard" => Some(Self::Wildcard),
            "glob" | "shell_glob" | "bash_glob" => Some(Self::ShellGlob),
            _ => None,
        }
    }
}

/// Convert a pattern written in `dialect` to an unanchored regex fragment.
///
/// Regex patterns are returned unchanged.
pub fn to_regex(pattern: &str, dialect: PatternDialect) -> String {
    match dialect {
        PatternDialect::Regex => pattern.to_string(),
        PatternDialect::Wildcard => strip_anchors(&glob_to_regex(pattern, false)).to_string(),
        PatternDialect::ShellGlob => strip_anchors(&glob_to_regex(pattern, true)).to_string(),
    }
}

/// Translate a glob into a regex matching the whole input.
///
/// Outside of `extended` mode only `*` is special.
pub fn glob_to_regex(glob: &str, extended: bool) -> String {
    let mut out = String::with_capacity(glob.len() * 2 + 2);
    let mut in_group = false;
    let mut in_class = false;
    let mut buf = [0u8; 4];

    out.push('^');
    for ch in glob.chars() {
        match ch {
            ']' if in_class => {
                in_class = false;
                out.push(ch);
            }
            _ if in_class => out.push(ch),
            '*' => out.push_str(".*"),
            '?' if extended => out.push('.'),
            '[' if extended => {
                in_class = true;
                out.push(ch);
            }
            '{' if extended => {
                in_group = true;
                out.push('(');
            }
            '}' if extended => {
                in_group = false;
                out.push(')');
            }
            ',' if in_group => out.push('|'),
            _ => out.push_str(&regex::escape(ch.encode_utf8(&mut buf))),
        }
    }
    out.push('$');

    out
}

/// Drop the `^`/`$` anchors added by [`glob_to_regex`].
///
/// Macro patterns are embedded in a larger path expression.
fn strip_anchors(anchored: &str) -> &str {
    let inner = anchored.strip_prefix('^').unwrap_or(anchored);
    inner.strip_suffix('$').unwrap_or(inner)
}
