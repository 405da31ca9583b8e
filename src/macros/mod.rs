//! Path templates with named macros.
//!
//! A template such as `/user/${id:\d+}/${bio}` contains macros written as
//! `prefix name splitter pattern suffix` or `prefix name suffix`. The
//! [`MacroCompiler`] extracts them in document order, turns the template into
//! an anchored regular expression and uses it to match concrete paths and
//! pull out the macro values.
//!
//! ```
//! use madvoc_route::MacroCompiler;
//!
//! let compiler = MacroCompiler::new(r"/user/${id:\d+}/${name}").unwrap();
//! assert!(compiler.matches("/user/42/ana"));
//!
//! let params = compiler.extract_params("/user/42/ana").unwrap();
//! assert_eq!(params["id"], "42");
//! assert_eq!(params["name"], "ana");
//!
//! assert_eq!(compiler.replace_macros(":$1($2)", ":$1"), r"/user/:id(\d+)/:name");
//! ```

mod dialect;

use std::collections::HashMap;

use regex::{Captures, Regex, Replacer};
use serde::Serialize;
use tracing::debug;

use crate::error::{Result, RouteError};

pub use dialect::{glob_to_regex, to_regex, PatternDialect};

/// Characters a macro name or pattern may contain: anything but `:/{}`.
pub const MACRO_TERM: &str = "([^:/{}]+)";

/// A named placeholder in a path template.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Macro {
    /// Macro name
    pub name: String,
    /// Regex the value must match, any text without `:/{}` if absent
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pattern: Option<String>,
}

/// The three tokens that delimit a macro in a template.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MacroDelimiters {
    prefix: String,
    splitter: String,
    suffix: String,
}

impl Default for MacroDelimiters {
    fn default() -> Self {
        Self {
            prefix: "${".to_string(),
            splitter: ":".to_string(),
            suffix: "}".to_string(),
        }
    }
}

impl MacroDelimiters {
    /// Create a delimiter set; none of the tokens may be empty.
    pub fn new(
        prefix: impl Into<String>,
        splitter: impl Into<String>,
        suffix: impl Into<String>,
    ) -> Result<Self> {
        let delimiters = Self {
            prefix: prefix.into(),
            splitter: splitter.into(),
            suffix: suffix.into(),
        };

        for (role, token) in [
            ("prefix", &delimiters.prefix),
            ("splitter", &delimiters.splitter),
            ("suffix", &delimiters.suffix),
        ] {
            if token.is_empty() {
                return Err(RouteError::InvalidDelimiters {
                    message: format!("{} must not be empty", role),
                });
            }
        }

        Ok(delimiters)
    }

    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    pub fn splitter(&self) -> &str {
        &self.splitter
    }

    pub fn suffix(&self) -> &str {
        &self.suffix
    }

    /// Regex for `prefix name splitter pattern suffix`.
    fn complete_regex(&self) -> String {
        format!(
            "{}{}{}{}{}",
            regex::escape(&self.prefix),
            MACRO_TERM,
            regex::escape(&self.splitter),
            MACRO_TERM,
            regex::escape(&self.suffix),
        )
    }

    /// Regex for `prefix name suffix`.
    fn single_regex(&self) -> String {
        format!(
            "{}{}{}",
            regex::escape(&self.prefix),
            MACRO_TERM,
            regex::escape(&self.suffix),
        )
    }
}

/// Compiles a path template into a matcher for concrete paths.
///
/// Patterns are compiled by the `regex` crate with Unicode mode on, so
/// classes like `\d` and `\w` also match non-ASCII digits and letters.
#[derive(Debug, Clone)]
pub struct MacroCompiler {
    template: String,
    delimiters: MacroDelimiters,
    macros: Vec<Macro>,
    complete_regex: Regex,
    single_regex: Regex,
    path_regex: Regex,
    /// Capture group index of each macro in `path_regex`
    groups: Vec<usize>,
}

impl MacroCompiler {
    /// Compile a template with regex patterns and the default delimiters.
    pub fn new(template: &str) -> Result<Self> {
        Self::with_options(template, PatternDialect::Regex, MacroDelimiters::default())
    }

    /// Compile a template whose patterns are written in `dialect`.
    pub fn with_dialect(template: &str, dialect: PatternDialect) -> Result<Self> {
        Self::with_options(template, dialect, MacroDelimiters::default())
    }

    /// Compile a template using custom macro delimiters.
    pub fn with_delimiters(template: &str, delimiters: MacroDelimiters) -> Result<Self> {
        Self::with_options(template, PatternDialect::Regex, delimiters)
    }

    /// Compile a template with the given pattern dialect and delimiters.
    pub fn with_options(
        template: &str,
        dialect: PatternDialect,
        delimiters: MacroDelimiters,
    ) -> Result<Self> {
        let complete_regex = Regex::new(&delimiters.complete_regex())
            .map_err(|e| RouteError::invalid_pattern(template, e))?;
        let single_regex = Regex::new(&delimiters.single_regex())
            .map_err(|e| RouteError::invalid_pattern(template, e))?;
        // Either macro form: groups 1-2 for complete, 3 for single
        let scanner = Regex::new(&format!(
            "{}|{}",
            delimiters.complete_regex(),
            delimiters.single_regex()
        ))
        .map_err(|e| RouteError::invalid_pattern(template, e))?;

        let mut template = template.to_string();
        if dialect != PatternDialect::Regex {
            template = complete_regex
                .replace_all(&template, |caps: &Captures<'_>| {
                    format!(
                        "{}{}{}{}{}",
                        delimiters.prefix,
                        &caps[1],
                        delimiters.splitter,
                        to_regex(&caps[2], dialect),
                        delimiters.suffix,
                    )
                })
                .into_owned();
        }

        let macros = extract_macros(&scanner, &template);
        let body = scanner.replace_all(&template, |caps: &Captures<'_>| match caps.get(2) {
            Some(pattern) => format!("({})", pattern.as_str()),
            None => MACRO_TERM.to_string(),
        });
        let path_source = format!("^{}$", body);
        let path_regex =
            Regex::new(&path_source).map_err(|e| RouteError::invalid_pattern(&template, e))?;
        let groups = group_indices(&macros, &template)?;

        debug!(
            template = template.as_str(),
            path_regex = path_source.as_str(),
            macros = macros.len(),
            "compiled path template"
        );

        Ok(Self {
            template,
            delimiters,
            macros,
            complete_regex,
            single_regex,
            path_regex,
            groups,
        })
    }

    /// The template, with patterns already converted to regex.
    pub fn template(&self) -> &str {
        &self.template
    }

    pub fn delimiters(&self) -> &MacroDelimiters {
        &self.delimiters
    }

    /// Macros in the order they appear in the template.
    pub fn macros(&self) -> &[Macro] {
        &self.macros
    }

    /// The anchored regex used to match paths.
    pub fn path_regex(&self) -> &str {
        self.path_regex.as_str()
    }

    /// Whether `path` matches the template.
    pub fn matches(&self, path: &str) -> bool {
        self.path_regex.is_match(path)
    }

    /// Extract macro values from a path.
    ///
    /// Returns `None` if the path does not match; a template without macros
    /// yields an empty map for a matching path. When two macros share a name
    /// the later one wins.
    pub fn extract_params(&self, path: &str) -> Option<HashMap<String, String>> {
        let caps = self.path_regex.captures(path)?;

        let params = self
            .macros
            .iter()
            .zip(&self.groups)
            .map(|(m, &group)| {
                let value = caps.get(group).map_or("", |v| v.as_str());
                (m.name.clone(), value.to_string())
            })
            .collect();

        Some(params)
    }

    /// Rewrite every macro of the template.
    ///
    /// `complete_format` replaces macros with a pattern and may refer to the
    /// name as `$1` and the pattern as `$2`; `single_format` replaces macros
    /// without one and may refer to the name as `$1`. Use `${1}` when the
    /// reference is followed by a letter, digit or underscore.
    pub fn replace_macros(&self, complete_format: &str, single_format: &str) -> String {
        rewrite(
            &self.complete_regex,
            &self.single_regex,
            &self.template,
            complete_format,
            single_format,
        )
    }
}

/// Replace complete macros first, then single ones.
///
/// The second pass sees the output of the first, so formats that reproduce
/// the delimiters are rewritten again.
fn rewrite<C: Replacer, S: Replacer>(
    complete_regex: &Regex,
    single_regex: &Regex,
    template: &str,
    complete: C,
    single: S,
) -> String {
    let replaced = complete_regex.replace_all(template, complete);
    single_regex.replace_all(&replaced, single).into_owned()
}

/// Scan a template for macros, left to right.
fn extract_macros(scanner: &Regex, template: &str) -> Vec<Macro> {
    scanner
        .captures_iter(template)
        .filter_map(|caps| match (caps.get(1), caps.get(2), caps.get(3)) {
            (Some(name), pattern, _) => Some(Macro {
                name: name.as_str().to_string(),
                pattern: pattern.map(|p| p.as_str().to_string()),
            }),
            (None, _, Some(name)) => Some(Macro {
                name: name.as_str().to_string(),
                pattern: None,
            }),
            _ => None,
        })
        .collect()
}

/// Locate each macro's own capture group in the path regex.
///
/// A macro pattern may contain groups of its own, which shift the index of
/// every later macro.
fn group_indices(macros: &[Macro], template: &str) -> Result<Vec<usize>> {
    let mut groups = Vec::with_capacity(macros.len());
    let mut next = 1;

    for m in macros {
        groups.push(next);
        let inner = match &m.pattern {
            Some(pattern) => Regex::new(pattern)
                .map_err(|e| RouteError::invalid_pattern(template, e))?
                .captures_len()
                - 1,
            None => 0,
        };
        next += 1 + inner;
    }

    Ok(groups)
}

#[cfg(test)]
mod tests {
    use super::*;

    const USER_TEMPLATE: &str = r"/user/${id:\d+}/${name:[a-zA-Z]+}/${bio}";

    fn params(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_match() {
        let compiler = MacroCompiler::new(USER_TEMPLATE).unwrap();

        assert!(!compiler.matches("/route"));
        assert!(!compiler.matches("/user"));
        assert!(!compiler.matches("/user/123"));
        assert!(!compiler.matches("/user/123/Maira"));
        assert!(!compiler.matches("/user/123/123/Something"));
        assert!(!compiler.matches("/user/Maira/123/Something"));
        assert!(!compiler.matches("/user/123/Maira/Something/extra"));

        assert!(compiler.matches("/user/123/Maira/Something"));
    }

    #[test]
    fn test_path_regex() {
        let compiler = MacroCompiler::new(USER_TEMPLATE).unwrap();
        assert_eq!(
            compiler.path_regex(),
            r"^/user/(\d+)/([a-zA-Z]+)/([^:/{}]+)$"
        );
    }

    #[test]
    fn test_replace_macros_none() {
        let compiler = MacroCompiler::new("/route/path").unwrap();
        assert_eq!(compiler.replace_macros(":$1($2)", ":$1"), "/route/path");
    }

    #[test]
    fn test_replace_macros() {
        let compiler = MacroCompiler::new(USER_TEMPLATE).unwrap();
        assert_eq!(
            compiler.replace_macros(":$1($2)", ":$1"),
            r"/user/:id(\d+)/:name([a-zA-Z]+)/:bio"
        );
        assert_eq!(
            compiler.replace_macros("{${1}_re}", "{$1}"),
            "/user/{id_re}/{name_re}/{bio}"
        );
    }

    #[test]
    fn test_get_macros() {
        let compiler = MacroCompiler::new(USER_TEMPLATE).unwrap();
        assert_eq!(
            serde_json::to_string(compiler.macros()).unwrap(),
            r#"[{"name":"id","pattern":"\\d+"},{"name":"name","pattern":"[a-zA-Z]+"},{"name":"bio"}]"#
        );
    }

    #[test]
    fn test_extract_params() {
        let compiler = MacroCompiler::new(USER_TEMPLATE).unwrap();
        assert_eq!(
            compiler.extract_params("/user/123/Maira/Something"),
            Some(params(&[("id", "123"), ("name", "Maira"), ("bio", "Something")]))
        );
    }

    #[test]
    fn test_extract_params_none() {
        let compiler = MacroCompiler::new("/route/path").unwrap();
        assert_eq!(compiler.extract_params("/route/path"), Some(HashMap::new()));
    }

    #[test]
    fn test_extract_params_no_match() {
        let compiler = MacroCompiler::new(USER_TEMPLATE).unwrap();
        assert_eq!(compiler.extract_params("/route/path"), None);
    }

    #[test]
    fn test_match_and_extract_agree() {
        let compiler = MacroCompiler::new(USER_TEMPLATE).unwrap();
        for path in ["/user/1/a/b", "/user/x/a/b", "/user/1/a/b/", "", "/user/1/a/{b}"] {
            assert_eq!(compiler.matches(path), compiler.extract_params(path).is_some());
        }
    }

    #[test]
    fn test_custom_delimiters() {
        let delimiters = MacroDelimiters::new("{{", "$", "}}").unwrap();
        let compiler =
            MacroCompiler::with_delimiters(r"/user/{{id$\d+}}/{{name$[a-zA-Z]+}}/{{bio}}", delimiters)
                .unwrap();
        let default = MacroCompiler::new(USER_TEMPLATE).unwrap();

        assert!(!compiler.matches("/route"));
        assert!(compiler.matches("/user/123/Maira/Something"));
        assert_eq!(compiler.macros(), default.macros());
        assert_eq!(compiler.path_regex(), default.path_regex());
        assert_eq!(
            compiler.replace_macros(":$1($2)", ":$1"),
            r"/user/:id(\d+)/:name([a-zA-Z]+)/:bio"
        );
        assert_eq!(
            compiler.extract_params("/user/123/Maira/Something"),
            default.extract_params("/user/123/Maira/Something")
        );
    }

    #[test]
    fn test_paren_delimiters_keep_patterns() {
        let delimiters = MacroDelimiters::new("(", ":", ")").unwrap();
        let compiler = MacroCompiler::with_delimiters(r"/u/(id:\d+)/(bio)", delimiters).unwrap();

        assert_eq!(compiler.path_regex(), r"^/u/(\d+)/([^:/{}]+)$");
        assert!(!compiler.matches("/u/abc/x"));
        assert_eq!(
            compiler.extract_params("/u/12/x"),
            Some(params(&[("id", "12"), ("bio", "x")]))
        );
    }

    #[test]
    fn test_digit_class_is_unicode() {
        let compiler = MacroCompiler::new(r"/user/${id:\d+}").unwrap();
        assert!(compiler.matches("/user/١٢٣"));
        assert!(!compiler.matches("/user/abc"));
    }

    #[test]
    fn test_empty_delimiter_rejected() {
        assert!(matches!(
            MacroDelimiters::new("${", "", "}"),
            Err(RouteError::InvalidDelimiters { .. })
        ));
    }

    #[test]
    fn test_pattern_groups_do_not_shift_params() {
        let compiler = MacroCompiler::new("/${file:(a|b)+}.${ext:(x)(y)?}/${rest}").unwrap();
        assert_eq!(
            compiler.extract_params("/abba.x/tail"),
            Some(params(&[("file", "abba"), ("ext", "x"), ("rest", "tail")]))
        );
    }

    #[test]
    fn test_invalid_pattern() {
        let err = MacroCompiler::new("/a/${id:[0-9}").unwrap_err();
        assert!(matches!(err, RouteError::InvalidPattern { .. }));
    }

    #[test]
    fn test_wildcard_dialect() {
        let compiler =
            MacroCompiler::with_dialect("/files/${name:*.html}", PatternDialect::Wildcard).unwrap();
        assert_eq!(compiler.template(), r"/files/${name:.*\.html}");
        assert_eq!(
            compiler.macros(),
            &[Macro {
                name: "name".to_string(),
                pattern: Some(r".*\.html".to_string()),
            }]
        );
        assert!(compiler.matches("/files/index.html"));
        assert!(!compiler.matches("/files/indexhtml"));
        assert_eq!(
            compiler.extract_params("/files/index.html"),
            Some(params(&[("name", "index.html")]))
        );
    }

    #[test]
    fn test_glob_dialect() {
        let compiler =
            MacroCompiler::with_dialect("/img/${id:[0-9]?}/${size}", PatternDialect::ShellGlob)
                .unwrap();
        assert!(compiler.matches("/img/7x/large"));
        assert!(!compiler.matches("/img/x7/large"));
        assert_eq!(
            compiler.extract_params("/img/42/small"),
            Some(params(&[("id", "42"), ("size", "small")]))
        );
    }

    #[test]
    fn test_glob_dialect_custom_delimiters() {
        let delimiters = MacroDelimiters::new("<", "=", ">").unwrap();
        let compiler =
            MacroCompiler::with_options("/doc/<page=*.md>", PatternDialect::Wildcard, delimiters)
                .unwrap();
        assert!(compiler.matches("/doc/readme.md"));
        assert!(!compiler.matches("/doc/readme.txt"));
    }
}
