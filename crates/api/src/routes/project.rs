//! HTTP adapter for the project handler.
//!
//! Translates Axum requests into [`ProjectRequest`] events so the handler
//! sees exactly what a function runtime would hand it, including OPTIONS
//! and unsupported methods. Body rejections are answered in the handler's
//! JSON format rather than Axum's plain-text one.

use std::collections::HashMap;
use std::time::Duration;

use axum::body::Bytes;
use axum::extract::rejection::BytesRejection;
use axum::extract::{DefaultBodyLimit, Path, Query, State};
use axum::http::{Method, StatusCode};
use axum::routing::any;
use axum::Router;

use crate::error::{AppError, AppResult};
use crate::event::{ProjectRequest, ProjectResponse};
use crate::state::AppState;

/// Routes mounted at `/projects`, accepting bodies up to `max_body_bytes`.
///
/// ```text
/// GET     /projects         -> list
/// POST    /projects         -> create
/// GET     /projects/{id}    -> get by id
/// PUT     /projects/{id}    -> update
/// DELETE  /projects/{id}    -> delete
/// OPTIONS (either path)     -> CORS preflight
/// ```
pub fn router(max_body_bytes: usize) -> Router<AppState> {
    Router::new()
        .route("/projects", any(invoke_collection))
        .route("/projects/{id}", any(invoke_item))
        .layer(DefaultBodyLimit::max(max_body_bytes))
}

async fn invoke_collection(
    State(state): State<AppState>,
    method: Method,
    Query(query): Query<HashMap<String, String>>,
    body: Result<Bytes, BytesRejection>,
) -> ProjectResponse {
    match read_body(body) {
        Ok(body) => {
            let request = ProjectRequest::new(method.as_str())
                .with_query(query)
                .with_body(body);
            invoke(&state, &request).await
        }
        Err(err) => err.into_project_response(),
    }
}

async fn invoke_item(
    State(state): State<AppState>,
    method: Method,
    Path(id): Path<String>,
    Query(query): Query<HashMap<String, String>>,
    body: Result<Bytes, BytesRejection>,
) -> ProjectResponse {
    match read_body(body) {
        Ok(body) => {
            let request = ProjectRequest::new(method.as_str())
                .with_id(id)
                .with_query(query)
                .with_body(body);
            invoke(&state, &request).await
        }
        Err(err) => err.into_project_response(),
    }
}

/// Run the handler under the configured request timeout. A timed-out
/// invocation is dropped, which rolls back its transaction and returns its
/// connection to the pool.
async fn invoke(state: &AppState, request: &ProjectRequest) -> ProjectResponse {
    let limit = Duration::from_secs(state.config.request_timeout_secs);
    match tokio::time::timeout(limit, state.handler.handle(request)).await {
        Ok(response) => response,
        Err(_) => {
            tracing::warn!(method = %request.http_method, "Project request timed out");
            AppError::Timeout.into_project_response()
        }
    }
}

/// Buffer the body as UTF-8 text.
fn read_body(body: Result<Bytes, BytesRejection>) -> AppResult<String> {
    let bytes = match body {
        Ok(bytes) => bytes,
        Err(rejection) if rejection.status() == StatusCode::PAYLOAD_TOO_LARGE => {
            return Err(AppError::PayloadTooLarge);
        }
        Err(rejection) => return Err(AppError::BadRequest(rejection.body_text())),
    };
    String::from_utf8(bytes.to_vec())
        .map_err(|_| AppError::BadRequest("Request body must be valid UTF-8".to_string()))
}
