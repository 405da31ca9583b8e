//! Parser for Madvoc-style route definition files.
//!
//! The format is line-oriented and human-editable. Each non-blank line is a
//! comment, a variable binding, or a route made of whitespace-separated chunks.
//!
//! # Grammar Overview
//!
//! ```text
//! file        = { line }
//! line        = comment | binding | route | empty
//! comment     = '#' { any_char }
//! binding     = '@' name '=' value
//! route       = chunk { chunk }
//! chunk       = [fix_left] text [fix_right]
//! ```
//!
//! A physical line ending in `\` continues on the next line; the two are
//! spliced without inserting whitespace.
//!
//! # Chunk Classification
//!
//! | Chunk | Meaning |
//! |-------|---------|
//! | `/path` | Route path (first one only) |
//! | `#async` | Flag, other flags are ignored |
//! | `my.app.Action#method` | Action class and method, also kept as alias |
//! | `my.app.Action.class` | Action class |
//! | `GET`, `POST`, ... | HTTP method |
//! | anything else except `->` | Alias (last one wins) |
//!
//! Chunks may be wrapped in one of `"…"`, `'…'`, `` `…` ``, `{…}`, `(…)` or
//! `[…]`; the wrapping is stripped before classification. Trailing `,` `;`
//! `:` are kept, and an empty quoted chunk such as `""` is an empty alias.
//!
//! # Example
//!
//! ```text
//! # Hello world
//! @package = my.app
//!
//! /helloworld @package.HelloAction#world
//! POST /user/${id:\d+} @package.UserAction#update #async
//! ```

mod ast;
mod configurator;
mod lexer;
mod parser;
mod variables;

pub use ast::{HttpMethod, Route};
pub use configurator::{ParserConfig, RouteConfigurator, DEFAULT_RESERVED_ALIASES};
pub use lexer::{split_chunks, strip_fixes, LineReader, LogicalLine, IGNORED_FIXES};
pub use parser::LineParser;
pub use variables::Variables;

use crate::error::{Result, RouteError};

/// Parse route definition text into routes.
pub fn parse(input: &str) -> Result<Vec<Route>> {
    let mut configurator = RouteConfigurator::new();
    configurator.parse(input)?;
    Ok(configurator.routes().map(<[Route]>::to_vec).unwrap_or_default())
}

/// Parse a route definition file.
#[cfg(feature = "cli")]
pub fn parse_file(path: &std::path::Path) -> Result<Vec<Route>> {
    let content = std::fs::read_to_string(path).map_err(|e| RouteError::FileReadError {
        path: path.display().to_string(),
        source: e,
    })?;
    parse(&content)
}

/// Render routes as a JSON array.
pub fn to_json(routes: &[Route]) -> Result<String> {
    serde_json::to_string_pretty(routes).map_err(RouteError::from)
}
