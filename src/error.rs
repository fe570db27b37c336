//! Application error type and its HTTP rendering.
//!
//! Errors render as short `text/plain` bodies. Backend details go to the
//! log, not to the client.

use axum::{
    http::{StatusCode, header},
    response::{IntoResponse, Response},
};
use thiserror::Error;

use crate::api::response::TEXT_PLAIN;
use crate::domain::repositories::StoreError;

#[derive(Debug, Error)]
pub enum AppError {
    /// The request cannot be served as addressed (e.g. no `Host`).
    #[error("{0}")]
    BadRequest(String),

    /// The mapping store could not be reached or timed out.
    #[error(transparent)]
    StoreUnavailable(StoreError),

    /// Every generated code collided with an existing mapping.
    #[error("no free short code after {attempts} attempts")]
    CodeSpaceExhausted { attempts: usize },

    #[error("internal error: {0}")]
    Internal(String),
}

impl From<StoreError> for AppError {
    fn from(e: StoreError) -> Self {
        if e.is_transient() {
            Self::StoreUnavailable(e)
        } else {
            Self::Internal(e.to_string())
        }
    }
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::StoreUnavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
            Self::CodeSpaceExhausted { .. } | Self::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    /// Client-facing message; never includes backend detail.
    fn public_message(&self) -> String {
        match self {
            Self::BadRequest(message) => message.clone(),
            Self::StoreUnavailable(_) => "Mapping store unavailable".to_string(),
            Self::CodeSpaceExhausted { .. } | Self::Internal(_) => {
                "Internal server error".to_string()
            }
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!(error = %self, "request failed");
        }

        (
            status,
            [(header::CONTENT_TYPE, TEXT_PLAIN)],
            self.public_message(),
        )
            .into_response()
    }
}
