//! Classification of inbound requests into create, resolve or usage.
//!
//! Classification only looks at the shape of the request and does no I/O.
//! Checks are permissive: an empty `targetUrl` is treated as absent and
//! falls through to the code check instead of failing.

/// Normalized request shape, extracted by the HTTP layer.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RequestShape {
    /// Value of the `targetUrl` query parameter, if present.
    pub target_url: Option<String>,
    /// Trailing path segment, if present.
    pub code: Option<String>,
}

impl RequestShape {
    pub fn new(target_url: Option<String>, code: Option<String>) -> Self {
        Self { target_url, code }
    }
}

/// Decision produced by [`classify`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    /// Allocate a new code for `target_url`.
    Create { target_url: String },
    /// Look up `code` and redirect.
    Resolve { code: String },
    /// Neither shape matched; answer with the usage hint.
    Usage,
}

impl Route {
    /// Short label used in log fields.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Create { .. } => "create",
            Self::Resolve { .. } => "resolve",
            Self::Usage => "usage",
        }
    }
}

/// Picks the request path.
///
/// A non-empty target URL wins over a path code when both are present.
pub fn classify(shape: RequestShape) -> Route {
    if let Some(target_url) = shape.target_url.filter(|u| !u.is_empty()) {
        return Route::Create { target_url };
    }

    if let Some(code) = shape.code.filter(|c| !c.is_empty()) {
        return Route::Resolve { code };
    }

    Route::Usage
}

/// Where the request was addressed, used to build absolute short URLs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestContext {
    pub scheme: String,
    pub host: String,
    pub base_path: String,
}

impl RequestContext {
    /// Creates a context. `base_path` is forced to start and end with `/`.
    pub fn new(
        scheme: impl Into<String>,
        host: impl Into<String>,
        base_path: impl AsRef<str>,
    ) -> Self {
        let trimmed = base_path.as_ref().trim_matches('/');
        let base_path = if trimmed.is_empty() {
            "/".to_string()
        } else {
            format!("/{}/", trimmed)
        };

        Self {
            scheme: scheme.into(),
            host: host.into(),
            base_path,
        }
    }

    /// Builds `<scheme>://<host><base_path><code>`.
    pub fn short_url(&self, code: &str) -> String {
        format!("{}://{}{}{}", self.scheme, self.host, self.base_path, code)
    }
}
