//! Payload validation report.
//!
//! Entity handlers validate a create/update payload before any write by
//! collecting every problem into a [`ValidationReport`]: shape rules from the
//! `validator` derive on the DTO, then the domain rules in
//! [`crate::tax_id`] and [`crate::land_allocation`]. The caller receives all
//! violations at once.

use std::fmt;

use serde::Serialize;
use validator::ValidationErrors;

use crate::error::CoreError;
use crate::land_allocation::{validate_land_allocation, LandAllocation};
use crate::tax_id::{validate_tax_id, ValidTaxId};

/// A single field-level rule violation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldViolation {
    pub field: String,
    pub code: String,
    pub message: String,
}

/// Ordered collection of violations for one payload.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ValidationReport {
    violations: Vec<FieldViolation>,
}

impl ValidationReport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(
        &mut self,
        field: impl Into<String>,
        code: impl Into<String>,
        message: impl Into<String>,
    ) {
        self.violations.push(FieldViolation {
            field: field.into(),
            code: code.into(),
            message: message.into(),
        });
    }

    pub fn is_empty(&self) -> bool {
        self.violations.is_empty()
    }

    pub fn violations(&self) -> &[FieldViolation] {
        &self.violations
    }

    pub fn messages(&self) -> Vec<String> {
        self.violations.iter().map(|v| v.message.clone()).collect()
    }

    /// Fold the result of a `validator::Validate::validate()` call into the report.
    ///
    /// Field order from `validator` is unspecified, so merged entries are
    /// sorted by field name to keep responses stable.
    pub fn merge_validator(&mut self, result: Result<(), ValidationErrors>) {
        let Err(errors) = result else {
            return;
        };

        let mut merged: Vec<FieldViolation> = errors
            .field_errors()
            .into_iter()
            .flat_map(|(field, errs)| {
                let field = field.to_string();
                errs.iter().map(move |err| FieldViolation {
                    field: field.clone(),
                    code: err.code.to_string(),
                    message: err
                        .message
                        .as_ref()
                        .map(|m| m.to_string())
                        .unwrap_or_else(|| format!("{field} is invalid")),
                })
            })
            .collect();
        merged.sort_by(|a, b| a.field.cmp(&b.field));

        self.violations.extend(merged);
    }

    /// Validate a tax ID field, recording a violation on failure.
    pub fn check_tax_id(&mut self, field: &str, raw: &str) -> Option<ValidTaxId> {
        match validate_tax_id(raw) {
            Ok(valid) => Some(valid),
            Err(err) => {
                self.push(field, err.code(), format!("{field} must be a valid CPF or CNPJ: {err}"));
                None
            }
        }
    }

    /// Validate farm area and state fields, recording every violation.
    pub fn check_land_allocation(&mut self, input: &LandAllocation) {
        if let Err(violations) = validate_land_allocation(input) {
            for v in violations {
                self.push(v.field(), v.code(), v.to_string());
            }
        }
    }

    /// Convert the report into a [`CoreError::InvalidPayload`] unconditionally.
    pub fn into_error(self) -> CoreError {
        CoreError::InvalidPayload(self)
    }

    /// `Ok(())` if nothing was recorded, otherwise the report as an error.
    pub fn finish(self) -> Result<(), CoreError> {
        if self.is_empty() {
            Ok(())
        } else {
            Err(self.into_error())
        }
    }
}

impl fmt::Display for ValidationReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.messages().join("; "))
    }
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;
    use validator::Validate;

    use super::*;

    #[derive(Validate)]
    struct Named {
        #[validate(length(min = 1, message = "name must not be empty"))]
        name: String,
        #[validate(range(min = 1000, max = 9999))]
        year: i32,
    }

    #[test]
    fn empty_report_finishes_ok() {
        assert_matches!(ValidationReport::new().finish(), Ok(()));
    }

    #[test]
    fn merges_validator_errors_sorted_by_field() {
        let payload = Named {
            name: String::new(),
            year: 12,
        };
        let mut report = ValidationReport::new();
        report.merge_validator(payload.validate());

        let fields: Vec<_> = report.violations().iter().map(|v| v.field.as_str()).collect();
        assert_eq!(fields, vec!["name", "year"]);
        assert_eq!(report.violations()[0].message, "name must not be empty");
        assert_eq!(report.violations()[1].message, "year is invalid");
    }

    #[test]
    fn check_tax_id_records_reason() {
        let mut report = ValidationReport::new();
        assert!(report.check_tax_id("document", "123").is_none());
        assert_eq!(report.violations()[0].code, "BAD_FORMAT");
        assert_eq!(report.violations()[0].field, "document");
    }

    #[test]
    fn check_tax_id_returns_valid_document() {
        let mut report = ValidationReport::new();
        let valid = report.check_tax_id("document", "529.982.247-25").unwrap();
        assert_eq!(valid.as_str(), "52998224725");
        assert!(report.is_empty());
    }

    #[test]
    fn land_allocation_violations_are_all_reported() {
        let mut report = ValidationReport::new();
        report.check_land_allocation(&LandAllocation::complete(100.0, 0.0, 40.0, "XX"));

        let codes: Vec<_> = report.violations().iter().map(|v| v.code.as_str()).collect();
        assert_eq!(codes, vec!["ARABLE_AREA_NOT_POSITIVE", "UNKNOWN_STATE_CODE"]);
        assert_matches!(report.finish(), Err(CoreError::InvalidPayload(r)) if r.violations().len() == 2);
    }

    #[test]
    fn report_serializes_as_array() {
        let mut report = ValidationReport::new();
        report.push("name", "length", "name must not be empty");
        let json = serde_json::to_value(&report).unwrap();
        assert!(json.is_array());
        assert_eq!(json[0]["field"], "name");
    }
}
