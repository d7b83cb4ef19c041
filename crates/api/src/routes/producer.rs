//! Route definitions for the `/producers` resource.

use axum::routing::get;
use axum::Router;

use crate::handlers::producer;
use crate::state::AppState;

/// Routes mounted at `/producers`.
///
/// ```text
/// GET    /            -> list
/// POST   /            -> create
/// GET    /{id}        -> get_by_id
/// PUT    /{id}        -> update
/// DELETE /{id}        -> delete
/// GET    /{id}/farms  -> list_farms
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(producer::list).post(producer::create))
        .route(
            "/{id}",
            get(producer::get_by_id)
                .put(producer::update)
                .delete(producer::delete),
        )
        .route("/{id}/farms", get(producer::list_farms))
}
