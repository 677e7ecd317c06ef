pub mod contacts;
pub mod health;

use axum::Router;

use crate::state::AppState;

/// Build the `/api` route tree.
///
/// ```text
/// /contacts      GET list, POST create, PUT update, DELETE delete
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new().merge(contacts::router())
}
