//! Wire-level responses for each dispatch outcome.
//!
//! Text bodies carry `Content-Type: text/plain`. Redirects carry only
//! `Location` and an empty body.

use axum::{
    http::{HeaderValue, StatusCode, header},
    response::{IntoResponse, Response},
};

use crate::error::AppError;

pub const TEXT_PLAIN: &str = "text/plain";

pub const USAGE_TEXT: &str = "usage: ?targetUrl=URL";

/// Plain-text response with the given status.
pub fn text(status: StatusCode, body: impl Into<String>) -> Response {
    (status, [(header::CONTENT_TYPE, TEXT_PLAIN)], body.into()).into_response()
}

/// `200 Created URL: <short_url>`.
pub fn created(short_url: &str) -> Response {
    text(StatusCode::OK, format!("Created URL: {}", short_url))
}

/// `301` to `target_url`.
///
/// # Errors
///
/// Returns [`AppError::Internal`] if the stored target cannot be carried in
/// a header (control characters).
pub fn redirect(target_url: &str) -> Result<Response, AppError> {
    let location = HeaderValue::from_bytes(target_url.as_bytes()).map_err(|_| {
        AppError::Internal(format!("stored target is not a valid header value: {:?}", target_url))
    })?;

    let mut response = StatusCode::MOVED_PERMANENTLY.into_response();
    response.headers_mut().insert(header::LOCATION, location);
    Ok(response)
}

/// Response for a code with no mapping, using the configured status.
pub fn not_found(status: StatusCode, code: &str) -> Response {
    text(status, format!("No redirect found for {}", code))
}

pub fn usage() -> Response {
    text(StatusCode::OK, USAGE_TEXT)
}
