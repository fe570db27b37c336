//! Handlers for the create / resolve / usage endpoint.

use axum::{
    extract::{Path, Query, State},
    http::{HeaderMap, Uri},
    response::Response,
};
use tracing::debug;

use crate::api::dto::dispatch::DispatchQuery;
use crate::api::response;
use crate::domain::routing::{RequestContext, RequestShape, Route, classify};
use crate::error::AppError;
use crate::state::AppState;
use crate::utils::request_context::{
    base_path_of, extract_host, extract_scheme_from_headers,
};

/// Handles requests without a path code.
///
/// # Endpoint
///
/// `GET {base}/` and `GET {base}`
///
/// - `?targetUrl=URL` - creates a mapping, `200 Created URL: ...`
/// - anything else - `200 usage: ?targetUrl=URL`
pub async fn root_handler(
    State(state): State<AppState>,
    uri: Uri,
    headers: HeaderMap,
    Query(query): Query<DispatchQuery>,
) -> Result<Response, AppError> {
    dispatch(&state, &uri, &headers, query.target_url, None).await
}

/// Handles requests with a trailing path code.
///
/// # Endpoint
///
/// `GET {base}/{code}`
///
/// - `?targetUrl=URL` - creates a mapping (takes precedence over the code)
/// - known code - `301` with `Location` set to the target
/// - unknown code - configured not-found status, `No redirect found for <code>`
///
/// # Errors
///
/// Returns 503 if the store is unavailable. A store failure is never
/// reported as an unknown code.
pub async fn code_handler(
    State(state): State<AppState>,
    Path(code): Path<String>,
    uri: Uri,
    headers: HeaderMap,
    Query(query): Query<DispatchQuery>,
) -> Result<Response, AppError> {
    dispatch(&state, &uri, &headers, query.target_url, Some(code)).await
}

/// Fallback for requests matching neither shape, e.g. `GET /a/b/c`.
pub async fn usage_handler() -> Response {
    response::usage()
}

async fn dispatch(
    state: &AppState,
    uri: &Uri,
    headers: &HeaderMap,
    target_url: Option<String>,
    code: Option<String>,
) -> Result<Response, AppError> {
    let base_path = base_path_of(uri.path(), code.as_deref());
    let route = classify(RequestShape::new(target_url, code));
    debug!(uri = %uri, route = route.name(), "Dispatching request");

    match route {
        Route::Create { target_url } => {
            let context = RequestContext::new(
                extract_scheme_from_headers(headers, &state.public_scheme),
                extract_host(headers, uri)?,
                base_path,
            );

            let mapping = state.mapping_service.create_mapping(&target_url).await?;
            Ok(response::created(&context.short_url(&mapping.code)))
        }
        Route::Resolve { code } => match state.mapping_service.resolve(&code).await? {
            Some(target_url) => response::redirect(&target_url),
            None => Ok(response::not_found(state.not_found_status, &code)),
        },
        Route::Usage => Ok(response::usage()),
    }
}
