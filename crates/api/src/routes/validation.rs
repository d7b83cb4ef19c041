//! Route definitions for the `/validation` resource.

use axum::routing::post;
use axum::Router;

use crate::handlers::validation;
use crate::state::AppState;

/// Routes mounted at `/validation`.
///
/// ```text
/// POST   /tax-id             -> check_tax_id
/// POST   /land-allocation    -> check_land_allocation
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/tax-id", post(validation::check_tax_id))
        .route(
            "/land-allocation",
            post(validation::check_land_allocation),
        )
}
