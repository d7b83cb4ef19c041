use crate::types::DbId;
use crate::validation::ValidationReport;

#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("Entity not found: {entity} with id {id}")]
    NotFound { entity: &'static str, id: DbId },

    /// One or more field-level violations collected for a single payload.
    #[error("Validation failed: {0}")]
    InvalidPayload(ValidationReport),
}
