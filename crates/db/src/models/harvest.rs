//! Harvest entity model and DTOs.

use agro_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

/// A harvest row from the `harvests` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Harvest {
    pub id: DbId,
    pub farm_id: DbId,
    pub year: i32,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a new harvest.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateHarvest {
    pub farm_id: DbId,
    #[validate(range(min = 1000, max = 9999, message = "year must be a four-digit year"))]
    pub year: i32,
}

/// DTO for updating an existing harvest. All fields are optional.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct UpdateHarvest {
    pub farm_id: Option<DbId>,
    #[validate(range(min = 1000, max = 9999, message = "year must be a four-digit year"))]
    pub year: Option<i32>,
}
