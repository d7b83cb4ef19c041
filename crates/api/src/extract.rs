//! JSON body extraction.
//!
//! Handlers take `Result<Json<T>, JsonRejection>` and pass it through
//! [`extract_json`], so a malformed body is reported in the same
//! `VALIDATION_ERROR` envelope as a rule violation instead of axum's plain
//! text rejection.

use agro_core::error::CoreError;
use agro_core::validation::ValidationReport;
use axum::extract::rejection::JsonRejection;
use axum::Json;

use crate::error::AppError;

/// Field name reported for violations that concern the body as a whole.
pub const BODY_FIELD: &str = "body";

/// Unwrap a JSON body, mapping deserialization failures to a 400 report.
pub fn extract_json<T>(result: Result<Json<T>, JsonRejection>) -> Result<T, AppError> {
    result.map(|Json(value)| value).map_err(|rejection| {
        tracing::debug!(error = %rejection.body_text(), "Request body rejected");
        let mut report = ValidationReport::new();
        report.push(BODY_FIELD, rejection_code(&rejection), rejection.body_text());
        AppError::Core(CoreError::InvalidPayload(report))
    })
}

fn rejection_code(rejection: &JsonRejection) -> &'static str {
    match rejection {
        JsonRejection::MissingJsonContentType(_) => "UNSUPPORTED_CONTENT_TYPE",
        JsonRejection::JsonSyntaxError(_) => "MALFORMED_JSON",
        _ => "INVALID_BODY",
    }
}
