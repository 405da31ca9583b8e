//! Route configurator holding the routes parsed from a definition file.

use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use super::ast::Route;
use super::lexer::LineReader;
use super::parser::LineParser;
use super::variables::{Variables, VARIABLE_SIGIL};
use crate::error::{Result, RouteError};

/// Chunks that are never captured as an alias by default.
pub const DEFAULT_RESERVED_ALIASES: [&str; 1] = ["->"];

/// Leading character of comment lines.
const COMMENT_MARKER: char = '#';

/// Configuration for parsing route definitions.
#[derive(Debug, Clone)]
pub struct ParserConfig {
    /// Chunks that are skipped instead of becoming the alias.
    pub reserved_aliases: Vec<String>,
    /// Fail on `@` lines that are not `name = value` bindings.
    pub strict_bindings: bool,
}

impl Default for ParserConfig {
    fn default() -> Self {
        Self {
            reserved_aliases: DEFAULT_RESERVED_ALIASES
                .iter()
                .map(|alias| alias.to_string())
                .collect(),
            strict_bindings: false,
        }
    }
}

impl ParserConfig {
    /// Create a new configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a reserved alias token.
    pub fn with_reserved_alias(mut self, alias: impl Into<String>) -> Self {
        self.reserved_aliases.push(alias.into());
        self
    }

    /// Reject malformed `@` lines instead of dropping them.
    ///
    /// Off by default: such lines are skipped with a warning.
    pub fn with_strict_bindings(mut self, strict: bool) -> Self {
        self.strict_bindings = strict;
        self
    }

    /// Whether `chunk` is a reserved token that can't be an alias.
    pub fn is_reserved_alias(&self, chunk: &str) -> bool {
        self.reserved_aliases.iter().any(|alias| alias == chunk)
    }
}

/// Loads routes from definition text.
///
/// Each call to [`parse`](Self::parse) starts from a fresh set of variable
/// bindings and replaces the previously parsed routes.
#[derive(Debug, Clone, Default)]
pub struct RouteConfigurator {
    config: ParserConfig,
    routes: Option<Vec<Route>>,
    routes_filepath: Option<PathBuf>,
}

impl RouteConfigurator {
    /// Create a configurator with no routes parsed yet.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a configurator with custom parser configuration.
    pub fn with_config(config: ParserConfig) -> Self {
        Self {
            config,
            ..Self::default()
        }
    }

    /// Parse already loaded definition text.
    ///
    /// `path` is where the text was read from; it is kept for diagnostics
    /// and never read again.
    pub fn from_source(content: &str, path: impl Into<PathBuf>) -> Result<Self> {
        let mut configurator = Self::new();
        configurator.load_source(content, path)?;
        Ok(configurator)
    }

    /// Read and parse a definition file.
    #[cfg(feature = "cli")]
    pub fn from_file(path: &Path) -> Result<Self> {
        let mut configurator = Self::new();
        configurator.load_file(path)?;
        Ok(configurator)
    }

    /// Parse text that was read from `path`.
    pub fn load_source(&mut self, content: &str, path: impl Into<PathBuf>) -> Result<()> {
        self.parse(content)?;
        self.routes_filepath = Some(path.into());
        Ok(())
    }

    /// Read and parse a definition file.
    ///
    /// Relative paths are resolved against the current directory.
    #[cfg(feature = "cli")]
    pub fn load_file(&mut self, path: &Path) -> Result<()> {
        let resolved = std::env::current_dir()
            .map(|cwd| cwd.join(path))
            .unwrap_or_else(|_| path.to_path_buf());
        let content =
            std::fs::read_to_string(&resolved).map_err(|e| RouteError::FileReadError {
                path: resolved.display().to_string(),
                source: e,
            })?;
        self.load_source(&content, resolved)
    }

    /// Parse route definitions, replacing any previously parsed routes.
    ///
    /// On error the previous routes are kept.
    pub fn parse(&mut self, content: &str) -> Result<()> {
        let parser = LineParser::new(&self.config);
        let mut variables = Variables::new();
        let mut routes = Vec::new();
        let mut line_count = 0;

        for logical in LineReader::new(content) {
            line_count += 1;
            let text = logical.text.as_str();

            if text.starts_with(COMMENT_MARKER) {
                continue;
            }

            if let Some((name, value)) = Variables::parse_binding(text) {
                debug!(line = logical.line, name, value, "variable binding");
                variables.define(name, value);
                continue;
            }

            parser.check_directive(text, logical.line)?;

            if text.starts_with(VARIABLE_SIGIL) {
                if self.config.strict_bindings {
                    return Err(RouteError::malformed_binding(logical.line, text));
                }
                warn!(line = logical.line, text, "dropping '@' line without '='");
                continue;
            }

            let line = variables.substitute(text);
            let route = parser.parse_line(&line);
            if route.path.is_none() {
                debug!(line = logical.line, text = line.as_str(), "dropping line without a path");
                continue;
            }
            routes.push(route);
        }

        debug!(lines = line_count, routes = routes.len(), "parsed route definitions");
        self.routes = Some(routes);
        Ok(())
    }

    /// The parsed routes, or `None` if nothing was parsed yet.
    pub fn routes(&self) -> Option<&[Route]> {
        self.routes.as_deref()
    }

    /// Replace the parsed routes.
    pub fn set_routes(&mut self, routes: Vec<Route>) {
        self.routes = Some(routes);
    }

    /// Where the routes were loaded from, if they came from a file.
    pub fn routes_filepath(&self) -> Option<&Path> {
        self.routes_filepath.as_deref()
    }

    pub fn config(&self) -> &ParserConfig {
        &self.config
    }
}
