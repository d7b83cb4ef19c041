//! Route definitions for the `/crops` resource.

use axum::routing::get;
use axum::Router;

use crate::handlers::crop;
use crate::state::AppState;

/// Routes mounted at `/crops`.
///
/// ```text
/// GET    /            -> list
/// POST   /            -> create
/// GET    /{id}        -> get_by_id
/// PUT    /{id}        -> update
/// DELETE /{id}        -> delete
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(crop::list).post(crop::create))
        .route(
            "/{id}",
            get(crop::get_by_id).put(crop::update).delete(crop::delete),
        )
}
