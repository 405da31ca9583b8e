//! Error types for the route parser and macro compiler.
//!
//! This module provides a unified error type [`RouteError`] that covers
//! all error conditions that can occur while parsing route definitions,
//! compiling path macros, and loading definition files.

use std::fmt;

use thiserror::Error;

/// Result type alias using [`RouteError`].
pub type Result<T> = std::result::Result<T, RouteError>;

/// Directive forms of the definition language that are recognized but rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DirectiveKind {
    /// `@...{` group block
    Group,
    /// `[...]` default-value block
    DefaultBlock,
}

impl fmt::Display for DirectiveKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Group => f.write_str("group definition"),
            Self::DefaultBlock => f.write_str("default block"),
        }
    }
}

/// Unified error type for all route operations.
#[derive(Error, Debug)]
pub enum RouteError {
    // ============ Definition Parsing Errors ============
    /// A directive form this parser does not support
    #[error("Unsupported {kind} at line {line}: '{text}'")]
    UnsupportedDirective {
        line: usize,
        kind: DirectiveKind,
        text: String,
    },

    /// An `@` line that is not a `name = value` binding (strict mode only)
    #[error("Malformed variable binding at line {line}: '{text}' (expected '@name = value')")]
    MalformedBinding { line: usize, text: String },

    // ============ Macro Errors ============
    /// Macro delimiters cannot be used to scan a template
    #[error("Invalid macro delimiters: {message}")]
    InvalidDelimiters { message: String },

    /// The path matcher built from a template is not a valid regex
    #[error("Invalid macro pattern in template '{template}': {source}")]
    InvalidPattern {
        template: String,
        #[source]
        source: regex::Error,
    },

    // ============ I/O Errors ============
    /// Error reading a route definition file
    #[error("Failed to read routes file '{path}': {source}")]
    FileReadError {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// Error rendering routes or parameters as JSON
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl RouteError {
    /// Create an unsupported directive error
    pub fn unsupported(line: usize, kind: DirectiveKind, text: impl Into<String>) -> Self {
        Self::UnsupportedDirective {
            line,
            kind,
            text: text.into(),
        }
    }

    /// Create a malformed binding error
    pub fn malformed_binding(line: usize, text: impl Into<String>) -> Self {
        Self::MalformedBinding {
            line,
            text: text.into(),
        }
    }

    /// Create an invalid pattern error
    pub fn invalid_pattern(template: impl Into<String>, source: regex::Error) -> Self {
        Self::InvalidPattern {
            template: template.into(),
            source,
        }
    }
}
