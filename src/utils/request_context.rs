//! Extraction of the addressing context from HTTP requests.

use crate::AppError;
use axum::http::{HeaderMap, Uri, header};

const X_FORWARDED_PROTO: &str = "x-forwarded-proto";
const X_FORWARDED_HOST: &str = "x-forwarded-host";

/// Extracts the authority the client addressed.
///
/// Prefers `X-Forwarded-Host` (first entry), then `Host`, then the authority
/// of the request URI. HTTP/2 carries the authority in `:authority`, which
/// lands in the URI and leaves no `Host` header; HTTP/1.1 absolute-form
/// requests do the same. The port is kept, since it is part of the URL a
/// client must call back on.
///
/// # Errors
///
/// Returns [`AppError::BadRequest`] if no source names a host.
pub fn extract_host(headers: &HeaderMap, uri: &Uri) -> Result<String, AppError> {
    if let Some(forwarded) = first_header_value(headers, X_FORWARDED_HOST) {
        return Ok(forwarded);
    }

    if let Some(host) = headers.get(header::HOST) {
        let host = host
            .to_str()
            .map_err(|_| AppError::BadRequest("Invalid Host header".to_string()))?
            .trim();

        if !host.is_empty() {
            return Ok(host.to_string());
        }
    }

    uri.authority()
        .map(|authority| authority.as_str())
        .map(|authority| authority.rsplit_once('@').map_or(authority, |(_, host)| host))
        .filter(|host| !host.is_empty())
        .map(str::to_string)
        .ok_or_else(|| AppError::BadRequest("Missing Host header".to_string()))
}

/// Extracts the scheme from `X-Forwarded-Proto`, falling back to `default_scheme`.
pub fn extract_scheme_from_headers(headers: &HeaderMap, default_scheme: &str) -> String {
    first_header_value(headers, X_FORWARDED_PROTO)
        .map(|s| s.to_ascii_lowercase())
        .unwrap_or_else(|| default_scheme.to_string())
}

/// Derives the base path from the request path by dropping the trailing
/// code segment, if any.
///
/// - `/prod/` -> `/prod/`
/// - `/prod/aB3dE5gH` with code `aB3dE5gH` -> `/prod/`
/// - `/prod` -> `/prod/`
pub fn base_path_of(path: &str, code: Option<&str>) -> String {
    // The code arrives percent-decoded, so cut at the last separator rather
    // than matching the code text against the raw path.
    let prefix = match (code, path.rfind('/')) {
        (Some(code), Some(idx)) if !code.is_empty() => &path[..=idx],
        _ => path,
    };

    if prefix.ends_with('/') {
        prefix.to_string()
    } else {
        format!("{}/", prefix)
    }
}

/// Returns the first comma-separated entry of a header, trimmed and non-empty.
fn first_header_value(headers: &HeaderMap, name: &str) -> Option<String> {
    headers
        .get(name)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.split(',').next())
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    #[test]
    fn test_extract_host_simple() {
        let mut headers = HeaderMap::new();
        headers.insert(header::HOST, HeaderValue::from_static("example.com"));

        assert_eq!(extract_host(&headers, &Uri::from_static("/")).unwrap(), "example.com");
    }

    #[test]
    fn test_extract_host_keeps_port() {
        let mut headers = HeaderMap::new();
        headers.insert(header::HOST, HeaderValue::from_static("localhost:3000"));

        assert_eq!(
            extract_host(&headers, &Uri::from_static("/")).unwrap(),
            "localhost:3000"
        );
    }

    #[test]
    fn test_extract_host_prefers_forwarded() {
        let mut headers = HeaderMap::new();
        headers.insert(header::HOST, HeaderValue::from_static("10.0.0.5:8080"));
        headers.insert(
            X_FORWARDED_HOST,
            HeaderValue::from_static("s.example.com, proxy.internal"),
        );

        assert_eq!(
            extract_host(&headers, &Uri::from_static("/")).unwrap(),
            "s.example.com"
        );
    }

    #[test]
    fn test_extract_host_missing() {
        let headers = HeaderMap::new();
        let result = extract_host(&headers, &Uri::from_static("/"));

        assert!(matches!(result, Err(AppError::BadRequest(_))));
    }

    #[test]
    fn test_extract_host_from_uri_authority() {
        let headers = HeaderMap::new();
        let uri = Uri::from_static("https://abc123.execute-api.us-east-1.amazonaws.com/prod/");

        assert_eq!(
            extract_host(&headers, &uri).unwrap(),
            "abc123.execute-api.us-east-1.amazonaws.com"
        );
    }

    #[test]
    fn test_extract_host_uri_authority_drops_userinfo() {
        let headers = HeaderMap::new();
        let uri = Uri::from_static("http://user:pw@localhost:3000/");

        assert_eq!(extract_host(&headers, &uri).unwrap(), "localhost:3000");
    }

    #[test]
    fn test_extract_host_header_wins_over_uri() {
        let mut headers = HeaderMap::new();
        headers.insert(header::HOST, HeaderValue::from_static("s.example.com"));
        let uri = Uri::from_static("http://localhost/prod/");

        assert_eq!(extract_host(&headers, &uri).unwrap(), "s.example.com");
    }

    #[test]
    fn test_extract_scheme_default() {
        let headers = HeaderMap::new();
        assert_eq!(extract_scheme_from_headers(&headers, "https"), "https");
    }

    #[test]
    fn test_extract_scheme_forwarded() {
        let mut headers = HeaderMap::new();
        headers.insert(X_FORWARDED_PROTO, HeaderValue::from_static("HTTP"));
        assert_eq!(extract_scheme_from_headers(&headers, "https"), "http");
    }

    #[test]
    fn test_base_path_root() {
        assert_eq!(base_path_of("/", None), "/");
        assert_eq!(base_path_of("/aB3dE5gH", Some("aB3dE5gH")), "/");
    }

    #[test]
    fn test_base_path_stage() {
        assert_eq!(base_path_of("/prod/", None), "/prod/");
        assert_eq!(base_path_of("/prod", None), "/prod/");
        assert_eq!(base_path_of("/prod/aB3dE5gH", Some("aB3dE5gH")), "/prod/");
    }

    #[test]
    fn test_base_path_empty_code_is_ignored() {
        assert_eq!(base_path_of("/prod/", Some("")), "/prod/");
    }

    #[test]
    fn test_base_path_encoded_code() {
        assert_eq!(base_path_of("/prod/a%20b", Some("a b")), "/prod/");
    }
}
