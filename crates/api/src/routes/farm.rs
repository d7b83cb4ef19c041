//! Route definitions for the `/farms` resource.

use axum::routing::get;
use axum::Router;

use crate::handlers::farm;
use crate::state::AppState;

/// Routes mounted at `/farms`.
///
/// ```text
/// GET    /            -> list
/// POST   /            -> create
/// GET    /{id}        -> get_by_id
/// PUT    /{id}        -> update
/// DELETE /{id}        -> delete
/// GET    /{id}/harvests  -> list_harvests
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(farm::list).post(farm::create))
        .route(
            "/{id}",
            get(farm::get_by_id)
                .put(farm::update)
                .delete(farm::delete),
        )
        .route("/{id}/harvests", get(farm::list_harvests))
}
