//! Farm land allocation rules.
//!
//! A farm declares a total area and two sub-areas (arable and native
//! vegetation), all in hectares, plus the state it is located in. Every
//! declared area must be positive, the sub-areas together must fit inside the
//! declared total (equality allowed), and the state must be one of the 27
//! codes in [`StateCode`].
//!
//! Fields are optional so that partial updates can be checked with the same
//! function: an absent field skips its own rule, and the sum rule only runs
//! when the total and at least one sub-area are present.

use serde::de::IgnoredAny;
use serde::{Deserialize, Deserializer, Serialize};

use crate::states::StateCode;

/// Smallest area treated as positive. Values that round to zero are rejected.
pub const MIN_AREA: f64 = 0.0001;

/// Slack allowed when comparing the sub-area sum with the total, so decimal
/// inputs such as 0.1 + 0.2 against 0.3 are not rejected by rounding noise.
/// `ck_farms_area_sum` uses the same value.
pub const AREA_SUM_TOLERANCE: f64 = 1e-9;

/// Area and location fields of a farm payload.
///
/// `null` or an absent area skips its rules; any other non-number is kept as
/// NaN so it is reported as not positive.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LandAllocation {
    #[serde(default, deserialize_with = "lenient_optional_area")]
    pub total_area: Option<f64>,
    #[serde(default, deserialize_with = "lenient_optional_area")]
    pub arable_area: Option<f64>,
    #[serde(default, deserialize_with = "lenient_optional_area")]
    pub vegetation_area: Option<f64>,
    pub state: Option<String>,
}

impl LandAllocation {
    /// A fully specified allocation, as submitted on create.
    pub fn complete(
        total_area: f64,
        arable_area: f64,
        vegetation_area: f64,
        state: impl Into<String>,
    ) -> Self {
        Self {
            total_area: Some(total_area),
            arable_area: Some(arable_area),
            vegetation_area: Some(vegetation_area),
            state: Some(state.into()),
        }
    }

    /// The state in canonical form, if present and valid.
    pub fn state_code(&self) -> Option<StateCode> {
        self.state.as_deref().and_then(StateCode::parse)
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawArea {
    Number(f64),
    Other(IgnoredAny),
}

impl RawArea {
    fn into_area(self) -> f64 {
        match self {
            Self::Number(value) => value,
            Self::Other(_) => f64::NAN,
        }
    }
}

/// Deserialize a required area, turning anything that is not a JSON number
/// (including `null`) into NaN.
pub fn lenient_area<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    RawArea::deserialize(deserializer).map(RawArea::into_area)
}

/// Deserialize an optional area: `null` is absent, other non-numbers are NaN.
pub fn lenient_optional_area<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<RawArea>::deserialize(deserializer).map(|raw| raw.map(RawArea::into_area))
}

/// Default for a required area missing from the payload.
pub fn missing_area() -> f64 {
    f64::NAN
}

/// A single broken land allocation rule.
#[derive(Debug, Clone, PartialEq, thiserror::Error, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum AreaViolation {
    #[error("total_area must be greater than zero")]
    TotalAreaNotPositive,

    #[error("arable_area must be greater than zero")]
    ArableAreaNotPositive,

    #[error("vegetation_area must be greater than zero")]
    VegetationAreaNotPositive,

    #[error("sum of arable_area and vegetation_area ({sum}) must not exceed total_area ({limit})")]
    AreaSumExceedsTotal { sum: f64, limit: f64 },

    #[error("state '{value}' is not a valid Brazilian state abbreviation")]
    UnknownStateCode { value: String },
}

impl AreaViolation {
    /// The payload field the violation is reported against.
    pub fn field(&self) -> &'static str {
        match self {
            Self::TotalAreaNotPositive => "total_area",
            Self::ArableAreaNotPositive => "arable_area",
            Self::VegetationAreaNotPositive => "vegetation_area",
            Self::AreaSumExceedsTotal { .. } => "total_area",
            Self::UnknownStateCode { .. } => "state",
        }
    }

    pub fn code(&self) -> &'static str {
        match self {
            Self::TotalAreaNotPositive => "TOTAL_AREA_NOT_POSITIVE",
            Self::ArableAreaNotPositive => "ARABLE_AREA_NOT_POSITIVE",
            Self::VegetationAreaNotPositive => "VEGETATION_AREA_NOT_POSITIVE",
            Self::AreaSumExceedsTotal { .. } => "AREA_SUM_EXCEEDS_TOTAL",
            Self::UnknownStateCode { .. } => "UNKNOWN_STATE_CODE",
        }
    }
}

/// Check every rule and return all violations found, in field order.
pub fn validate_land_allocation(input: &LandAllocation) -> Result<(), Vec<AreaViolation>> {
    let mut violations = Vec::new();

    let positivity = [
        (input.total_area, AreaViolation::TotalAreaNotPositive),
        (input.arable_area, AreaViolation::ArableAreaNotPositive),
        (input.vegetation_area, AreaViolation::VegetationAreaNotPositive),
    ];
    for (value, violation) in positivity {
        if matches!(value, Some(v) if !is_positive_area(v)) {
            violations.push(violation);
        }
    }

    if let Some(limit) = input.total_area {
        if input.arable_area.is_some() || input.vegetation_area.is_some() {
            let sum = input.arable_area.unwrap_or(0.0) + input.vegetation_area.unwrap_or(0.0);
            if sum > limit + AREA_SUM_TOLERANCE {
                violations.push(AreaViolation::AreaSumExceedsTotal { sum, limit });
            }
        }
    }

    if let Some(state) = &input.state {
        if StateCode::parse(state).is_none() {
            violations.push(AreaViolation::UnknownStateCode {
                value: state.clone(),
            });
        }
    }

    if violations.is_empty() {
        Ok(())
    } else {
        Err(violations)
    }
}

/// NaN and infinities are never valid areas.
fn is_positive_area(value: f64) -> bool {
    value.is_finite() && value >= MIN_AREA
}
