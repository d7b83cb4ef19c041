//! Request handlers.
//!
//! Each entity submodule provides async handler functions (create, list,
//! get_by_id, update, delete). Writes validate the payload first, collecting
//! every violation into an [`agro_core::validation::ValidationReport`], then
//! delegate to the corresponding repository in `agro_db`. Errors map to HTTP
//! responses via [`crate::error::AppError`].

pub mod crop;
pub mod farm;
pub mod harvest;
pub mod producer;
pub mod validation;
