//! Classifier turning route definition lines into [`Route`] values.

use tracing::{debug, trace};

use super::ast::{HttpMethod, Route};
use super::configurator::ParserConfig;
use super::lexer::{split_chunks, strip_fixes};
use crate::error::{DirectiveKind, Result, RouteError};

/// Suffix marking a chunk as an action class name.
const CLASS_SUFFIX: &str = ".class";

/// Flag that marks a route as asynchronous.
const ASYNC_FLAG: &str = "async";

/// Outcome of applying one classification rule to a chunk.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Claim {
    /// The rule did not apply; the next rule sees the chunk.
    Pass,
    /// The rule consumed the chunk.
    Taken,
    /// The rule recorded the chunk and later rules still see it.
    ///
    /// Only `class#method` does this, which is how a bare `Action#method`
    /// chunk ends up as the alias as well.
    Shared,
}

/// Classifies the chunks of a single logical line.
pub struct LineParser<'c> {
    config: &'c ParserConfig,
}

impl<'c> LineParser<'c> {
    /// Rules in the order they are tried against every chunk.
    const RULES: [fn(&Self, &mut Route, &str) -> Claim; 6] = [
        Self::path_rule,
        Self::flag_rule,
        Self::class_method_rule,
        Self::class_rule,
        Self::http_method_rule,
        Self::alias_rule,
    ];

    /// Create a parser using the given configuration.
    pub fn new(config: &'c ParserConfig) -> Self {
        Self { config }
    }

    /// Reject directive forms the parser does not support.
    ///
    /// `line` is the logical line number used for error reporting.
    pub fn check_directive(&self, text: &str, line: usize) -> Result<()> {
        if text.starts_with('@') && text.ends_with('{') {
            return Err(RouteError::unsupported(line, DirectiveKind::Group, text));
        }
        if text.starts_with('[') && text.ends_with(']') {
            return Err(RouteError::unsupported(line, DirectiveKind::DefaultBlock, text));
        }
        Ok(())
    }

    /// Classify every chunk of a route line.
    ///
    /// The returned route may lack a path, in which case it is not a route.
    pub fn parse_line(&self, text: &str) -> Route {
        let mut route = Route::new();

        for raw in split_chunks(text) {
            let chunk = strip_fixes(raw);

            for rule in Self::RULES {
                match rule(self, &mut route, chunk) {
                    Claim::Taken => break,
                    Claim::Pass | Claim::Shared => {}
                }
            }
        }

        route
    }

    fn path_rule(&self, route: &mut Route, chunk: &str) -> Claim {
        if chunk.starts_with('/') && route.path.is_none() {
            trace!(chunk, "path");
            route.path = Some(chunk.to_string());
            return Claim::Taken;
        }
        Claim::Pass
    }

    fn flag_rule(&self, route: &mut Route, chunk: &str) -> Claim {
        let Some(flag) = chunk.strip_prefix('#') else {
            return Claim::Pass;
        };

        if flag == ASYNC_FLAG {
            trace!(chunk, "async flag");
            route.is_async = true;
        } else {
            debug!(flag, "ignoring unknown route flag");
        }
        Claim::Taken
    }

    fn class_method_rule(&self, route: &mut Route, chunk: &str) -> Claim {
        if !chunk.find('#').is_some_and(|pos| pos > 0) {
            return Claim::Pass;
        }

        let names: Vec<&str> = chunk.split('#').collect();
        if names.len() != 2 {
            debug!(chunk, "skipping chunk with more than one '#'");
            return Claim::Taken;
        }

        trace!(chunk, "action class and method");
        route.action_class = Some(names[0].to_string());
        route.action_method = Some(names[1].to_string());
        Claim::Shared
    }

    fn class_rule(&self, route: &mut Route, chunk: &str) -> Claim {
        match chunk.strip_suffix(CLASS_SUFFIX) {
            Some(class_name) => {
                trace!(chunk, "action class");
                route.action_class = Some(class_name.to_string());
                Claim::Taken
            }
            None => Claim::Pass,
        }
    }

    fn http_method_rule(&self, route: &mut Route, chunk: &str) -> Claim {
        match HttpMethod::from_token(chunk) {
            Some(method) => {
                trace!(chunk, "http method");
                route.http_method = method;
                Claim::Taken
            }
            None => Claim::Pass,
        }
    }

    fn alias_rule(&self, route: &mut Route, chunk: &str) -> Claim {
        if self.config.is_reserved_alias(chunk) {
            return Claim::Pass;
        }
        trace!(chunk, "alias");
        route.alias = Some(chunk.to_string());
        Claim::Taken
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn parse(text: &str) -> Route {
        let config = ParserConfig::default();
        LineParser::new(&config).parse_line(text)
    }

    fn some(s: &str) -> Option<String> {
        Some(s.to_string())
    }

    #[test]
    fn test_parse_async() {
        let route = parse("/helloworld #async");
        assert_eq!(route.path, some("/helloworld"));
        assert!(route.is_async);
        assert_eq!(route.http_method, HttpMethod::Get);
        assert_eq!(route.action_class, None);
        assert_eq!(route.action_method, None);
        assert_eq!(route.alias, None);
    }

    #[test]
    fn test_parse_class_method_and_alias() {
        let route = parse("/helloworld my.app.HelloAction#method /alias");
        assert_eq!(route.path, some("/helloworld"));
        assert_eq!(route.action_class, some("my.app.HelloAction"));
        assert_eq!(route.action_method, some("method"));
        assert_eq!(route.alias, some("/alias"));
        assert!(!route.is_async);
    }

    #[test]
    fn test_class_method_falls_through_to_alias() {
        let route = parse("/helloworld HelloAction#method");
        assert_eq!(route.action_class, some("HelloAction"));
        assert_eq!(route.action_method, some("method"));
        assert_eq!(route.alias, some("HelloAction#method"));
    }

    #[test]
    fn test_bare_word_is_alias() {
        let route = parse("/helloworld HelloAction");
        assert_eq!(route.action_class, None);
        assert_eq!(route.alias, some("HelloAction"));
    }

    #[test]
    fn test_class_suffix() {
        let route = parse("/hello my.app.HelloAction.class");
        assert_eq!(route.action_class, some("my.app.HelloAction"));
        assert_eq!(route.alias, None);
    }

    #[test]
    fn test_too_many_hashes_skipped() {
        let route = parse("/hello a#b#c");
        assert_eq!(route.action_class, None);
        assert_eq!(route.action_method, None);
        assert_eq!(route.alias, None);
    }

    #[rstest]
    #[case("CONNECT", HttpMethod::Connect)]
    #[case("DELETE", HttpMethod::Delete)]
    #[case("GET", HttpMethod::Get)]
    #[case("HEAD", HttpMethod::Head)]
    #[case("OPTIONS", HttpMethod::Options)]
    #[case("PATCH", HttpMethod::Patch)]
    #[case("POST", HttpMethod::Post)]
    #[case("PUT", HttpMethod::Put)]
    #[case("TRACE", HttpMethod::Trace)]
    fn test_http_methods(#[case] token: &str, #[case] expected: HttpMethod) {
        let route = parse(&format!("{} /helloworld", token));
        assert_eq!(route.http_method, expected);
        assert_eq!(route.path, some("/helloworld"));
        assert_eq!(route.alias, None);
    }

    #[test]
    fn test_reserved_alias_ignored() {
        let route = parse("/a -> /b");
        assert_eq!(route.path, some("/a"));
        assert_eq!(route.alias, some("/b"));

        let route = parse("/a ->");
        assert_eq!(route.alias, None);
    }

    #[test]
    fn test_last_alias_wins() {
        let route = parse("/a first second");
        assert_eq!(route.alias, some("second"));
    }

    #[test]
    fn test_unknown_flag_ignored() {
        let route = parse("/a #sync #async");
        assert!(route.is_async);
        assert_eq!(route.alias, None);
    }

    #[test]
    fn test_fixes_stripped_before_classification() {
        let route = parse("\"/hello\" [POST] (my.app.A#run) 'alias',");
        assert_eq!(route.path, some("/hello"));
        assert_eq!(route.http_method, HttpMethod::Post);
        assert_eq!(route.action_class, some("my.app.A"));
        assert_eq!(route.action_method, some("run"));
        assert_eq!(route.alias, some("'alias',"));
    }

    #[test]
    fn test_empty_quoted_alias() {
        let route = parse("/a \"\"");
        assert_eq!(route.path, some("/a"));
        assert_eq!(route.alias, some(""));

        let route = parse("/a x \"");
        assert_eq!(route.alias, some(""));
    }

    #[test]
    fn test_no_path() {
        let route = parse("GET HelloAction#method");
        assert_eq!(route.path, None);
    }

    #[test]
    fn test_directive_rejected() {
        let config = ParserConfig::default();
        let parser = LineParser::new(&config);
        assert!(matches!(
            parser.check_directive("@group /admin {", 3),
            Err(RouteError::UnsupportedDirective { line: 3, kind: DirectiveKind::Group, .. })
        ));
        assert!(matches!(
            parser.check_directive("[defaults]", 1),
            Err(RouteError::UnsupportedDirective { kind: DirectiveKind::DefaultBlock, .. })
        ));
        assert!(parser.check_directive("[GET] /a", 1).is_ok());
        assert!(parser.check_directive("/a", 1).is_ok());
    }
}
