//! Route definitions for the `/harvests` resource.

use axum::routing::get;
use axum::Router;

use crate::handlers::harvest;
use crate::state::AppState;

/// Routes mounted at `/harvests`.
///
/// ```text
/// GET    /            -> list
/// POST   /            -> create
/// GET    /{id}        -> get_by_id
/// PUT    /{id}        -> update
/// DELETE /{id}        -> delete
/// GET    /{id}/crops  -> list_crops
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(harvest::list).post(harvest::create))
        .route(
            "/{id}",
            get(harvest::get_by_id)
                .put(harvest::update)
                .delete(harvest::delete),
        )
        .route("/{id}/crops", get(harvest::list_crops))
}
