pub mod crop;
pub mod farm;
pub mod harvest;
pub mod health;
pub mod producer;
pub mod validation;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /producers                          list, create
/// /producers/{id}                     get, update, delete
/// /producers/{id}/farms               farms owned by a producer
///
/// /farms                              list, create
/// /farms/{id}                         get, update, delete
/// /farms/{id}/harvests                harvests of a farm
///
/// /harvests                           list, create
/// /harvests/{id}                      get, update, delete
/// /harvests/{id}/crops                crops planted in a harvest
///
/// /crops                              list, create
/// /crops/{id}                         get, update, delete
///
/// /validation/tax-id                  check a CPF/CNPJ (POST)
/// /validation/land-allocation         check farm areas and state (POST)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        // Rural producers and their farms.
        .nest("/producers", producer::router())
        .nest("/farms", farm::router())
        // Harvest seasons and the crops planted in them.
        .nest("/harvests", harvest::router())
        .nest("/crops", crop::router())
        // Stateless rule evaluation for clients.
        .nest("/validation", validation::router())
}
