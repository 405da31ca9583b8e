//! # Madvoc Route
//!
//! Route definition parsing and path macro matching.
//!
//! This library provides:
//! - A parser for Madvoc-style line-oriented route definition files
//! - Variable bindings (`@name = value`) substituted into later lines
//! - A macro compiler turning path templates such as `/user/${id:\d+}` into
//!   matchers that extract named parameters
//! - Wildcard and shell-glob macro patterns, converted to regex
//!
//! ## Architecture
//!
//! The library is organized into two independent modules:
//!
//! - [`routes`] - Line reader, variable substitution and chunk classification
//!   producing [`Route`] values
//! - [`macros`] - Macro extraction, path matching and template rewriting
//!
//! The route parser keeps macros in paths as plain text; a route's `path`
//! is what [`MacroCompiler`] consumes.
//!
//! ## Usage
//!
//! ### Native CLI
//!
//! ```bash
//! madvoc-route routes routes.txt --json
//! madvoc-route match '/user/${id:\d+}' /user/42
//! ```
//!
//! ### Library
//!
//! ```
//! use madvoc_route::{MacroCompiler, RouteConfigurator};
//!
//! let mut configurator = RouteConfigurator::new();
//! configurator
//!     .parse("@app = my.app\nGET /user/${id} @app.UserAction#view\n")
//!     .unwrap();
//!
//! let route = &configurator.routes().unwrap()[0];
//! assert_eq!(route.action_class.as_deref(), Some("my.app.UserAction"));
//!
//! let compiler = MacroCompiler::new(route.path.as_deref().unwrap()).unwrap();
//! assert_eq!(compiler.extract_params("/user/7").unwrap()["id"], "7");
//! ```

pub mod error;
pub mod macros;
pub mod routes;

// Re-export main types for convenience
pub use error::{DirectiveKind, Result, RouteError};
pub use macros::{Macro, MacroCompiler, MacroDelimiters, PatternDialect};
pub use routes::{HttpMethod, ParserConfig, Route, RouteConfigurator};

// WASM bindings
#[cfg(feature = "wasm")]
mod wasm;

#[cfg(feature = "wasm")]
pub use wasm::{WasmMacroCompiler, WasmRouteConfigurator};
