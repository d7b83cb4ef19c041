//! Producer entity model and DTOs.

use agro_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

/// Unique constraint guaranteeing one producer per CPF/CNPJ.
pub const UQ_PRODUCERS_DOCUMENT: &str = "uq_producers_document";

/// A producer row from the `producers` table.
///
/// `document` is always the normalized digit string of a valid CPF or CNPJ.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Producer {
    pub id: DbId,
    pub document: String,
    pub name: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a new producer.
///
/// `document` accepts any formatting; the tax ID check and normalization are
/// applied by the caller before insert.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateProducer {
    pub document: String,
    #[validate(length(min = 1, max = 255, message = "name must be between 1 and 255 characters"))]
    pub name: String,
}

/// DTO for updating an existing producer. All fields are optional.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct UpdateProducer {
    pub document: Option<String>,
    #[validate(length(min = 1, max = 255, message = "name must be between 1 and 255 characters"))]
    pub name: Option<String>,
}
