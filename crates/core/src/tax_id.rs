//! Brazilian taxpayer identifier validation (CPF and CNPJ).
//!
//! A candidate is normalized by dropping every non-digit character, then
//! classified by digit count (11 = CPF, 14 = CNPJ) and checked against its
//! two trailing check digits. Sequences of one repeated digit are rejected
//! even though they satisfy the checksum arithmetic.

use std::fmt;

use serde::Serialize;

/// Digit count of a normalized CPF.
pub const CPF_LEN: usize = 11;

/// Digit count of a normalized CNPJ.
pub const CNPJ_LEN: usize = 14;

/// Which identifier scheme a normalized document belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum TaxIdKind {
    /// Individual taxpayer (Cadastro de Pessoas Físicas), 11 digits.
    Cpf,
    /// Legal entity (Cadastro Nacional da Pessoa Jurídica), 14 digits.
    Cnpj,
}

impl TaxIdKind {
    /// Classify a normalized digit string by its length.
    pub fn from_digit_count(len: usize) -> Option<Self> {
        match len {
            CPF_LEN => Some(Self::Cpf),
            CNPJ_LEN => Some(Self::Cnpj),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Cpf => "CPF",
            Self::Cnpj => "CNPJ",
        }
    }
}

impl fmt::Display for TaxIdKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Why a candidate was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TaxIdError {
    /// Not 11 or 14 digits after normalization (includes empty input).
    #[error("must contain 11 digits (CPF) or 14 digits (CNPJ)")]
    BadFormat,

    #[error("must not be a single repeated digit")]
    Degenerate,

    #[error("check digits do not match")]
    ChecksumMismatch,
}

impl TaxIdError {
    /// Stable machine-readable code for API responses.
    pub fn code(self) -> &'static str {
        match self {
            Self::BadFormat => "BAD_FORMAT",
            Self::Degenerate => "DEGENERATE",
            Self::ChecksumMismatch => "CHECKSUM_MISMATCH",
        }
    }
}

/// A document that passed validation.
///
/// Holds the normalized digit string, which is the form persisted in the
/// `producers.document` column.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct ValidTaxId {
    kind: TaxIdKind,
    normalized: String,
}

impl ValidTaxId {
    pub fn kind(&self) -> TaxIdKind {
        self.kind
    }

    /// The normalized digits, e.g. `52998224725`.
    pub fn as_str(&self) -> &str {
        &self.normalized
    }

    pub fn into_normalized(self) -> String {
        self.normalized
    }

    /// Display mask: `000.000.000-00` for CPF, `00.000.000/0000-00` for CNPJ.
    pub fn formatted(&self) -> String {
        let d = self.normalized.as_str();
        match self.kind {
            TaxIdKind::Cpf => format!("{}.{}.{}-{}", &d[..3], &d[3..6], &d[6..9], &d[9..]),
            TaxIdKind::Cnpj => format!(
                "{}.{}.{}/{}-{}",
                &d[..2],
                &d[2..5],
                &d[5..8],
                &d[8..12],
                &d[12..]
            ),
        }
    }
}

impl fmt::Display for ValidTaxId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.formatted())
    }
}

/// Strip every character that is not an ASCII decimal digit.
///
/// Idempotent: normalizing an already-normalized string returns it unchanged.
pub fn normalize(raw: &str) -> String {
    raw.chars().filter(char::is_ascii_digit).collect()
}

/// Validate a raw CPF or CNPJ candidate.
///
/// # Examples
///
/// ```
/// use agro_core::tax_id::{validate_tax_id, TaxIdError, TaxIdKind};
///
/// let cpf = validate_tax_id("529.982.247-25").unwrap();
/// assert_eq!(cpf.kind(), TaxIdKind::Cpf);
/// assert_eq!(cpf.as_str(), "52998224725");
///
/// assert_eq!(validate_tax_id("123"), Err(TaxIdError::BadFormat));
/// ```
pub fn validate_tax_id(raw: &str) -> Result<ValidTaxId, TaxIdError> {
    let normalized = normalize(raw);
    let kind = TaxIdKind::from_digit_count(normalized.len()).ok_or(TaxIdError::BadFormat)?;

    let digits: Vec<u8> = normalized.bytes().map(|b| b - b'0').collect();

    if digits.windows(2).all(|pair| pair[0] == pair[1]) {
        return Err(TaxIdError::Degenerate);
    }

    let expected = match kind {
        TaxIdKind::Cpf => cpf_check_digits(&leading::<9>(&digits)),
        TaxIdKind::Cnpj => cnpj_check_digits(&leading::<12>(&digits)),
    };

    if digits[digits.len() - 2..] != expected {
        return Err(TaxIdError::ChecksumMismatch);
    }

    Ok(ValidTaxId { kind, normalized })
}

/// Compute the two CPF check digits for a nine-digit base.
pub fn cpf_check_digits(base: &[u8; 9]) -> [u8; 2] {
    let first = cpf_digit(base);

    let mut extended = [0u8; 10];
    extended[..9].copy_from_slice(base);
    extended[9] = first;

    [first, cpf_digit(&extended)]
}

/// Compute the two CNPJ check digits for a twelve-digit base.
pub fn cnpj_check_digits(base: &[u8; 12]) -> [u8; 2] {
    let first = cnpj_digit(base);

    let mut extended = [0u8; 13];
    extended[..12].copy_from_slice(base);
    extended[12] = first;

    [first, cnpj_digit(&extended)]
}

/// Weights run from `len + 1` down to 2; a remainder of 10 maps to 0.
fn cpf_digit(digits: &[u8]) -> u8 {
    let top = digits.len() as u32 + 1;
    let sum: u32 = digits
        .iter()
        .enumerate()
        .map(|(i, &d)| u32::from(d) * (top - i as u32))
        .sum();

    match (sum * 10) % 11 {
        10 => 0,
        r => r as u8,
    }
}

/// Weights cycle 2..=9 starting from the rightmost digit.
fn cnpj_digit(digits: &[u8]) -> u8 {
    let sum: u32 = digits
        .iter()
        .rev()
        .zip((2..=9u32).cycle())
        .map(|(&d, weight)| u32::from(d) * weight)
        .sum();

    match sum % 11 {
        r if r < 2 => 0,
        r => (11 - r) as u8,
    }
}

/// Copy the first `N` digits into a fixed array. Callers guarantee the length.
fn leading<const N: usize>(digits: &[u8]) -> [u8; N] {
    let mut out = [0u8; N];
    out.copy_from_slice(&digits[..N]);
    out
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;

    fn digits_of(s: &str) -> Vec<u8> {
        s.bytes().map(|b| b - b'0').collect()
    }

    #[test]
    fn accepts_formatted_cpf() {
        let id = validate_tax_id("529.982.247-25").unwrap();
        assert_eq!(id.kind(), TaxIdKind::Cpf);
        assert_eq!(id.as_str(), "52998224725");
    }

    #[test]
    fn rejects_cpf_with_altered_last_digit() {
        assert_eq!(
            validate_tax_id("529.982.247-26"),
            Err(TaxIdError::ChecksumMismatch)
        );
    }

    #[test]
    fn rejects_cpf_with_altered_first_check_digit() {
        assert_eq!(
            validate_tax_id("529.982.247-35"),
            Err(TaxIdError::ChecksumMismatch)
        );
    }

    #[test]
    fn accepts_formatted_cnpj() {
        let id = validate_tax_id("11.222.333/0001-81").unwrap();
        assert_eq!(id.kind(), TaxIdKind::Cnpj);
        assert_eq!(id.as_str(), "11222333000181");
    }

    #[test]
    fn rejects_cnpj_with_altered_last_digit() {
        assert_eq!(
            validate_tax_id("11.222.333/0001-82"),
            Err(TaxIdError::ChecksumMismatch)
        );
    }

    #[test]
    fn accepts_unformatted_digits() {
        assert_matches!(validate_tax_id("52998224725"), Ok(_));
        assert_matches!(validate_tax_id("11222333000181"), Ok(_));
    }

    #[test]
    fn short_input_is_bad_format() {
        assert_eq!(validate_tax_id("123"), Err(TaxIdError::BadFormat));
    }

    #[test]
    fn empty_and_non_numeric_are_bad_format() {
        assert_eq!(validate_tax_id(""), Err(TaxIdError::BadFormat));
        assert_eq!(validate_tax_id("abc.def.ghi-jk"), Err(TaxIdError::BadFormat));
    }

    #[test]
    fn twelve_and_thirteen_digits_are_bad_format() {
        assert_eq!(validate_tax_id("529982247251"), Err(TaxIdError::BadFormat));
        assert_eq!(validate_tax_id("1122233300018"), Err(TaxIdError::BadFormat));
    }

    #[test]
    fn every_repeated_digit_sequence_is_degenerate() {
        for d in '0'..='9' {
            let cpf: String = std::iter::repeat(d).take(CPF_LEN).collect();
            let cnpj: String = std::iter::repeat(d).take(CNPJ_LEN).collect();
            assert_eq!(validate_tax_id(&cpf), Err(TaxIdError::Degenerate), "{cpf}");
            assert_eq!(validate_tax_id(&cnpj), Err(TaxIdError::Degenerate), "{cnpj}");
        }
    }

    #[test]
    fn degenerate_check_applies_after_normalization() {
        assert_eq!(
            validate_tax_id("111.111.111-11"),
            Err(TaxIdError::Degenerate)
        );
    }

    #[test]
    fn normalize_is_idempotent() {
        let once = normalize("11.222.333/0001-81");
        assert_eq!(once, "11222333000181");
        assert_eq!(normalize(&once), once);
    }

    #[test]
    fn validation_is_deterministic() {
        for input in ["529.982.247-25", "529.982.247-26", "123", "00000000000"] {
            assert_eq!(validate_tax_id(input), validate_tax_id(input));
        }
    }

    #[test]
    fn recomputed_cpf_check_digits_match_accepted_document() {
        for raw in ["529.982.247-25", "153.509.460-56", "111.444.777-35"] {
            let id = validate_tax_id(raw).unwrap();
            let digits = digits_of(id.as_str());
            let base: [u8; 9] = digits[..9].try_into().unwrap();
            assert_eq!(cpf_check_digits(&base), [digits[9], digits[10]], "{raw}");
        }
    }

    #[test]
    fn recomputed_cnpj_check_digits_match_accepted_document() {
        let id = validate_tax_id("11.222.333/0001-81").unwrap();
        let digits = digits_of(id.as_str());
        let base: [u8; 12] = digits[..12].try_into().unwrap();
        assert_eq!(cnpj_check_digits(&base), [8, 1]);
    }

    #[test]
    fn formatted_applies_display_mask() {
        let cpf = validate_tax_id("52998224725").unwrap();
        assert_eq!(cpf.formatted(), "529.982.247-25");

        let cnpj = validate_tax_id("11222333000181").unwrap();
        assert_eq!(cnpj.to_string(), "11.222.333/0001-81");
    }

    #[test]
    fn kind_serializes_uppercase() {
        assert_eq!(serde_json::to_value(TaxIdKind::Cnpj).unwrap(), "CNPJ");
    }
}
