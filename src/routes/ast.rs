//! Route descriptor types produced by the definition parser.

use std::fmt;

use serde::Serialize;

/// HTTP methods a route line may name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum HttpMethod {
    Connect,
    Delete,
    #[default]
    Get,
    Head,
    Options,
    Patch,
    Post,
    Put,
    Trace,
}

impl HttpMethod {
    /// All recognized methods, in alphabetical order.
    pub const ALL: [HttpMethod; 9] = [
        Self::Connect,
        Self::Delete,
        Self::Get,
        Self::Head,
        Self::Options,
        Self::Patch,
        Self::Post,
        Self::Put,
        Self::Trace,
    ];

    /// Parse a method from a definition chunk.
    ///
    /// Matching is case-sensitive: `get` is not a method, it is an alias.
    pub fn from_token(token: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|m| m.as_str() == token)
    }

    /// The method token as written in definition files.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Connect => "CONNECT",
            Self::Delete => "DELETE",
            Self::Get => "GET",
            Self::Head => "HEAD",
            Self::Options => "OPTIONS",
            Self::Patch => "PATCH",
            Self::Post => "POST",
            Self::Put => "PUT",
            Self::Trace => "TRACE",
        }
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A route parsed from one logical definition line.
///
/// Only routes with a `path` are ever returned by the parser.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Route {
    /// Action path, may contain macros such as `${id:\d+}`
    pub path: Option<String>,
    /// HTTP method, `GET` unless the line names another one
    pub http_method: HttpMethod,
    /// Fully qualified action class
    pub action_class: Option<String>,
    /// Method invoked on the action class
    pub action_method: Option<String>,
    /// Route alias
    pub alias: Option<String>,
    /// Set by the `#async` flag
    #[serde(rename = "async")]
    pub is_async: bool,
}

impl Route {
    /// Create an empty route with default values.
    pub fn new() -> Self {
        Self::default()
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fn or_null(value: &Option<String>) -> &str {
            value.as_deref().unwrap_or("null")
        }

        write!(
            f,
            "[actionClass={},actionMethod={},alias={},async={},httpMethod={},path={}]",
            or_null(&self.action_class),
            or_null(&self.action_method),
            or_null(&self.alias),
            self.is_async,
            self.http_method,
            or_null(&self.path),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_http_method_tokens() {
        for method in HttpMethod::ALL {
            assert_eq!(HttpMethod::from_token(method.as_str()), Some(method));
        }
        assert_eq!(HttpMethod::from_token("get"), None);
        assert_eq!(HttpMethod::from_token("FETCH"), None);
        assert_eq!(HttpMethod::default(), HttpMethod::Get);
    }

    #[test]
    fn test_route_display() {
        let route = Route {
            path: Some("/helloworld".to_string()),
            is_async: true,
            ..Route::new()
        };
        assert_eq!(
            route.to_string(),
            "[actionClass=null,actionMethod=null,alias=null,async=true,httpMethod=GET,path=/helloworld]"
        );
    }

    #[test]
    fn test_route_json() {
        let route = Route {
            path: Some("/a".to_string()),
            http_method: HttpMethod::Post,
            action_class: Some("my.app.A".to_string()),
            ..Route::new()
        };
        let json = serde_json::to_string(&route).unwrap();
        assert_eq!(
            json,
            r#"{"path":"/a","httpMethod":"POST","actionClass":"my.app.A","actionMethod":null,"alias":null,"async":false}"#
        );
    }
}
