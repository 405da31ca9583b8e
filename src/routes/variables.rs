//! `@name = value` bindings and their substitution into route lines.

use std::collections::HashMap;

/// Leading character of bindings and variable references.
pub const VARIABLE_SIGIL: char = '@';

/// Name→text bindings collected while reading a definition file.
#[derive(Debug, Clone, Default)]
pub struct Variables {
    bindings: HashMap<String, String>,
}

impl Variables {
    /// Create an empty set of bindings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Split a binding line into its name and value.
    ///
    /// Returns `None` unless the line starts with `@` and contains `=`.
    pub fn parse_binding(line: &str) -> Option<(&str, &str)> {
        let rest = line.strip_prefix(VARIABLE_SIGIL)?;
        let (name, value) = rest.split_once('=')?;
        Some((name.trim(), value.trim()))
    }

    /// Bind `name` to `value`, replacing any earlier binding.
    pub fn define(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.bindings.insert(name.into(), value.into());
    }

    /// Replace every bound `@name` in `line` with its value.
    ///
    /// A reference only matches when the name is not followed by another
    /// identifier character, so `@methodName` never resolves through a
    /// binding called `method`. Unbound references are left as written and
    /// substituted values are not scanned again.
    pub fn substitute(&self, line: &str) -> String {
        if self.bindings.is_empty() || !line.contains(VARIABLE_SIGIL) {
            return line.to_string();
        }

        let mut out = String::with_capacity(line.len());
        let mut rest = line;

        while let Some(at) = rest.find(VARIABLE_SIGIL) {
            out.push_str(&rest[..at]);
            let after = &rest[at + VARIABLE_SIGIL.len_utf8()..];

            match self.longest_reference(after) {
                Some((name, value)) => {
                    out.push_str(value);
                    rest = &after[name.len()..];
                }
                None => {
                    out.push(VARIABLE_SIGIL);
                    rest = after;
                }
            }
        }
        out.push_str(rest);

        out
    }

    fn longest_reference<'s>(&'s self, text: &str) -> Option<(&'s str, &'s str)> {
        self.bindings
            .iter()
            .filter(|(name, _)| !name.is_empty() && text.starts_with(name.as_str()))
            .filter(|(name, _)| {
                text[name.len()..]
                    .chars()
                    .next()
                    .map_or(true, |c| !is_name_char(c))
            })
            .max_by_key(|(name, _)| name.len())
            .map(|(name, value)| (name.as_str(), value.as_str()))
    }
}

fn is_name_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}
