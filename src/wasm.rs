//! WASM bindings for Madvoc Route.
//!
//! This module provides JavaScript-friendly bindings for parsing route
//! definitions and matching paths in the browser or in Node.
//!
//! ## Usage (JavaScript)
//!
//! ```javascript
//! import init, { WasmRouteConfigurator, WasmMacroCompiler } from 'madvoc_route';
//!
//! await init();
//!
//! const configurator = new WasmRouteConfigurator();
//! configurator.parse('@app = my.app\nGET /user/${id} @app.UserAction#view\n');
//! const routes = JSON.parse(configurator.routes_json());
//!
//! const compiler = new WasmMacroCompiler(routes[0].path, 'regex');
//! compiler.extract_params_json('/user/7'); // '{"id":"7"}'
//! ```

use wasm_bindgen::prelude::*;

use crate::error::RouteError;
use crate::macros::{MacroCompiler, MacroDelimiters, PatternDialect};
use crate::routes::{self, RouteConfigurator};

/// Initialize panic hook for better error messages in browser console.
#[wasm_bindgen(start)]
pub fn init_panic_hook() {
    console_error_panic_hook::set_once();
}

fn to_js(err: RouteError) -> JsValue {
    JsValue::from_str(&err.to_string())
}

/// WASM-compatible route definition parser.
#[wasm_bindgen]
pub struct WasmRouteConfigurator {
    configurator: RouteConfigurator,
}

#[wasm_bindgen]
impl WasmRouteConfigurator {
    /// Create a configurator with no routes parsed yet.
    #[wasm_bindgen(constructor)]
    pub fn new() -> WasmRouteConfigurator {
        WasmRouteConfigurator {
            configurator: RouteConfigurator::new(),
        }
    }

    /// Parse route definitions, replacing any previously parsed routes.
    #[wasm_bindgen]
    pub fn parse(&mut self, content: &str) -> Result<(), JsValue> {
        self.configurator.parse(content).map_err(to_js)
    }

    /// Parsed routes as a JSON array, or `undefined` if nothing was parsed.
    #[wasm_bindgen]
    pub fn routes_json(&self) -> Result<Option<String>, JsValue> {
        self.configurator
            .routes()
            .map(routes::to_json)
            .transpose()
            .map_err(to_js)
    }
}

impl Default for WasmRouteConfigurator {
    fn default() -> Self {
        Self::new()
    }
}

/// WASM-compatible path template matcher.
#[wasm_bindgen]
pub struct WasmMacroCompiler {
    compiler: MacroCompiler,
}

#[wasm_bindgen]
impl WasmMacroCompiler {
    /// Compile a path template.
    ///
    /// # Arguments
    /// * `template` - The path template, e.g. `/user/${id:\d+}`
    /// * `dialect` - `regex`, `wildcard` or `glob`
    /// * `prefix`, `splitter`, `suffix` - Optional custom macro delimiters
    #[wasm_bindgen(constructor)]
    pub fn new(
        template: &str,
        dialect: &str,
        prefix: Option<String>,
        splitter: Option<String>,
        suffix: Option<String>,
    ) -> Result<WasmMacroCompiler, JsValue> {
        let dialect = PatternDialect::from_name(dialect)
            .ok_or_else(|| JsValue::from_str(&format!("unknown pattern dialect: {}", dialect)))?;

        let delimiters = match (prefix, splitter, suffix) {
            (Some(prefix), Some(splitter), Some(suffix)) => {
                MacroDelimiters::new(prefix, splitter, suffix).map_err(to_js)?
            }
            (None, None, None) => MacroDelimiters::default(),
            _ => {
                return Err(JsValue::from_str(
                    "prefix, splitter and suffix must be given together",
                ))
            }
        };

        let compiler = MacroCompiler::with_options(template, dialect, delimiters).map_err(to_js)?;
        Ok(WasmMacroCompiler { compiler })
    }

    /// Whether the path matches the template.
    #[wasm_bindgen]
    pub fn matches(&self, path: &str) -> bool {
        self.compiler.matches(path)
    }

    /// Extracted parameters as a JSON object, or `undefined` on no match.
    #[wasm_bindgen]
    pub fn extract_params_json(&self, path: &str) -> Result<Option<String>, JsValue> {
        self.compiler
            .extract_params(path)
            .map(|params| serde_json::to_string(&params))
            .transpose()
            .map_err(|e| to_js(e.into()))
    }

    /// Macros as a JSON array of `{name, pattern}` objects.
    #[wasm_bindgen]
    pub fn macros_json(&self) -> Result<String, JsValue> {
        serde_json::to_string(self.compiler.macros()).map_err(|e| to_js(e.into()))
    }

    /// Rewrite the template's macros (`$1` = name, `$2` = pattern).
    #[wasm_bindgen]
    pub fn replace_macros(&self, complete_format: &str, single_format: &str) -> String {
        self.compiler.replace_macros(complete_format, single_format)
    }

    /// The anchored regex used for matching.
    #[wasm_bindgen(getter)]
    pub fn path_regex(&self) -> String {
        self.compiler.path_regex().to_string()
    }
}

/// Get the library version.
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}
