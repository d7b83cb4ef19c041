//! Handlers for the `/validation` resource.
//!
//! Stateless evaluation of the tax ID and land allocation rules, so clients
//! can check a form before submitting it. A well-formed request always
//! answers 200 with the verdict in the body.

use agro_core::land_allocation::LandAllocation;
use agro_core::tax_id::{validate_tax_id, TaxIdError, TaxIdKind};
use agro_core::validation::{FieldViolation, ValidationReport};
use axum::extract::rejection::JsonRejection;
use axum::Json;
use serde::{Deserialize, Serialize};

use crate::error::AppResult;
use crate::extract::extract_json;
use crate::response::DataResponse;

/// Request body for `POST /validation/tax-id`.
#[derive(Debug, Deserialize)]
pub struct TaxIdCheck {
    pub value: String,
}

/// Verdict for a single tax ID.
#[derive(Debug, Serialize)]
#[serde(untagged)]
pub enum TaxIdVerdict {
    Valid {
        ok: bool,
        kind: TaxIdKind,
        normalized: String,
        formatted: String,
    },
    Invalid {
        ok: bool,
        reason: TaxIdError,
        message: String,
    },
}

/// Verdict for a land allocation.
#[derive(Debug, Serialize)]
pub struct LandAllocationVerdict {
    pub ok: bool,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub violations: Vec<FieldViolation>,
}

/// POST /api/v1/validation/tax-id
pub async fn check_tax_id(
    body: Result<Json<TaxIdCheck>, JsonRejection>,
) -> AppResult<Json<DataResponse<TaxIdVerdict>>> {
    let input = extract_json(body)?;
    let verdict = match validate_tax_id(&input.value) {
        Ok(valid) => TaxIdVerdict::Valid {
            ok: true,
            kind: valid.kind(),
            formatted: valid.formatted(),
            normalized: valid.into_normalized(),
        },
        Err(reason) => {
            tracing::debug!(reason = reason.code(), "Tax ID rejected");
            TaxIdVerdict::Invalid {
                ok: false,
                reason,
                message: reason.to_string(),
            }
        }
    };

    Ok(Json(DataResponse { data: verdict }))
}

/// POST /api/v1/validation/land-allocation
///
/// Absent or `null` areas are skipped, matching how a partial farm update is
/// checked. Areas that are not numbers are reported as not positive.
pub async fn check_land_allocation(
    body: Result<Json<LandAllocation>, JsonRejection>,
) -> AppResult<Json<DataResponse<LandAllocationVerdict>>> {
    let input = extract_json(body)?;
    let mut report = ValidationReport::new();
    report.check_land_allocation(&input);

    let verdict = LandAllocationVerdict {
        ok: report.is_empty(),
        violations: report.violations().to_vec(),
    };

    Ok(Json(DataResponse { data: verdict }))
}
