//! Route definitions for the `/contacts` resource.

use axum::routing::get;
use axum::Router;

use crate::handlers::contacts;
use crate::state::AppState;

/// Routes mounted at `/contacts`.
///
/// ```text
/// GET    /contacts    -> list
/// POST   /contacts    -> create
/// PUT    /contacts    -> update   (body carries `_id`)
/// DELETE /contacts    -> delete   (body carries `_id`)
/// ```
pub fn router() -> Router<AppState> {
    Router::new().route(
        "/contacts",
        get(contacts::list)
            .post(contacts::create)
            .put(contacts::update)
            .delete(contacts::delete),
    )
}
