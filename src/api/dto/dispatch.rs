//! Query parameters for the dispatch endpoints.

use serde::Deserialize;

const TARGET_URL_PARAM: &str = "targetUrl";

/// Query string of a dispatch request.
///
/// Only `targetUrl` is recognized; other parameters are ignored. The query
/// is read as raw pairs so a repeated key never rejects the request: the
/// last occurrence wins, as with API Gateway's single-value parameters.
#[derive(Debug, Default, Deserialize)]
#[serde(from = "Vec<(String, String)>")]
pub struct DispatchQuery {
    pub target_url: Option<String>,
}

impl From<Vec<(String, String)>> for DispatchQuery {
    fn from(pairs: Vec<(String, String)>) -> Self {
        let target_url = pairs
            .into_iter()
            .rev()
            .find(|(key, _)| key == TARGET_URL_PARAM)
            .map(|(_, value)| value);

        Self { target_url }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pairs(raw: &[(&str, &str)]) -> Vec<(String, String)> {
        raw.iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_target_url_found() {
        let query = DispatchQuery::from(pairs(&[("targetUrl", "https://example.com")]));
        assert_eq!(query.target_url.as_deref(), Some("https://example.com"));
    }

    #[test]
    fn test_repeated_target_url_keeps_last() {
        let query = DispatchQuery::from(pairs(&[
            ("targetUrl", "https://a.example"),
            ("utm", "x"),
            ("targetUrl", "https://b.example"),
        ]));
        assert_eq!(query.target_url.as_deref(), Some("https://b.example"));
    }

    #[test]
    fn test_other_params_ignored() {
        let query = DispatchQuery::from(pairs(&[("targeturl", "https://a.example"), ("x", "1")]));
        assert_eq!(query.target_url, None);
    }
}
