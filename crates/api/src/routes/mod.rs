pub mod health;
pub mod project;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// ```text
/// /projects              any method -> project handler
/// /projects/{id}         any method -> project handler
/// ```
pub fn api_routes(max_body_bytes: usize) -> Router<AppState> {
    Router::new().merge(project::router(max_body_bytes))
}
