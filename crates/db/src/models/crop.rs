//! Crop entity model and DTOs.

use agro_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

/// Unique constraint guaranteeing a crop name appears once per harvest.
pub const UQ_CROPS_HARVEST_ID_NAME: &str = "uq_crops_harvest_id_name";

/// A crop row from the `crops` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Crop {
    pub id: DbId,
    pub harvest_id: DbId,
    pub name: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a new crop.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateCrop {
    pub harvest_id: DbId,
    #[validate(length(min = 1, max = 255, message = "name must be between 1 and 255 characters"))]
    pub name: String,
}

/// DTO for updating an existing crop. All fields are optional.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct UpdateCrop {
    pub harvest_id: Option<DbId>,
    #[validate(length(min = 1, max = 255, message = "name must be between 1 and 255 characters"))]
    pub name: Option<String>,
}
