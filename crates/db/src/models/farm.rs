//! Farm entity model and DTOs.

use agro_core::land_allocation::{
    lenient_area, lenient_optional_area, missing_area, LandAllocation,
};
use agro_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

/// Check constraint mirroring the area-sum rule at the storage level.
pub const CK_FARMS_AREA_SUM: &str = "ck_farms_area_sum";

/// A farm row from the `farms` table. Areas are in hectares.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Farm {
    pub id: DbId,
    pub producer_id: DbId,
    pub name: String,
    pub city: String,
    /// Canonical uppercase two-letter state code.
    pub state: String,
    pub total_area: f64,
    pub arable_area: f64,
    pub vegetation_area: f64,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a new farm.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateFarm {
    pub producer_id: DbId,
    #[validate(length(min = 1, max = 255, message = "name must be between 1 and 255 characters"))]
    pub name: String,
    #[validate(length(min = 1, max = 255, message = "city must be between 1 and 255 characters"))]
    pub city: String,
    pub state: String,
    /// Non-numeric or missing areas arrive as NaN and fail the positivity rule.
    #[serde(default = "missing_area", deserialize_with = "lenient_area")]
    pub total_area: f64,
    #[serde(default = "missing_area", deserialize_with = "lenient_area")]
    pub arable_area: f64,
    #[serde(default = "missing_area", deserialize_with = "lenient_area")]
    pub vegetation_area: f64,
}

impl CreateFarm {
    pub fn land_allocation(&self) -> LandAllocation {
        LandAllocation::complete(
            self.total_area,
            self.arable_area,
            self.vegetation_area,
            self.state.clone(),
        )
    }
}

/// DTO for updating an existing farm. All fields are optional.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct UpdateFarm {
    pub producer_id: Option<DbId>,
    #[validate(length(min = 1, max = 255, message = "name must be between 1 and 255 characters"))]
    pub name: Option<String>,
    #[validate(length(min = 1, max = 255, message = "city must be between 1 and 255 characters"))]
    pub city: Option<String>,
    pub state: Option<String>,
    #[serde(default, deserialize_with = "lenient_optional_area")]
    pub total_area: Option<f64>,
    #[serde(default, deserialize_with = "lenient_optional_area")]
    pub arable_area: Option<f64>,
    #[serde(default, deserialize_with = "lenient_optional_area")]
    pub vegetation_area: Option<f64>,
}

impl UpdateFarm {
    /// Only the fields present in the patch.
    pub fn land_allocation(&self) -> LandAllocation {
        LandAllocation {
            total_area: self.total_area,
            arable_area: self.arable_area,
            vegetation_area: self.vegetation_area,
            state: self.state.clone(),
        }
    }
}
