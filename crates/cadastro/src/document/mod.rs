//! Brazilian fiscal identifiers.
//!
//! Both CPF and CNPJ end in two check digits computed with the same
//! modulo-11 rule over a weighted sum of the preceding digits; they differ
//! only in length and weights. The typed [`Cpf`] and [`Cnpj`] values can
//! only be constructed from digit sequences whose check digits match.

pub mod cnpj;
pub mod cpf;

use std::fmt;

pub use cnpj::{validate_cnpj, Cnpj};
pub use cpf::{validate_cpf, Cpf};

use crate::error::DocumentError;

/// Which identifier a value or error refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum DocumentKind {
    /// Individual taxpayer registry (11 digits).
    Cpf,
    /// Company taxpayer registry (14 digits).
    Cnpj,
}

impl DocumentKind {
    /// Parses `input` as this kind of document, keeping only the verdict.
    pub fn check(self, input: &str) -> Result<(), DocumentError> {
        match self {
            DocumentKind::Cpf => Cpf::parse(input).map(drop),
            DocumentKind::Cnpj => Cnpj::parse(input).map(drop),
        }
    }

    /// Validates `input` as this kind of document.
    pub fn validate(self, input: &str) -> bool {
        self.check(input).is_ok()
    }

    /// Masks `input` as this kind of document.
    pub fn mask(self, input: &str) -> String {
        match self {
            DocumentKind::Cpf => crate::mask::mask_cpf(input),
            DocumentKind::Cnpj => crate::mask::mask_cnpj(input),
        }
    }
}

impl fmt::Display for DocumentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DocumentKind::Cpf => f.write_str("CPF"),
            DocumentKind::Cnpj => f.write_str("CNPJ"),
        }
    }
}

/// Computes a modulo-11 check digit.
///
/// `digits` and `weights` are zipped; the remainder of the weighted sum
/// modulo 11 maps to `0` when below 2 and to `11 - remainder` otherwise.
pub(crate) fn check_digit(digits: &[u8], weights: &[u32]) -> u8 {
    let sum: u32 = digits
        .iter()
        .zip(weights)
        .map(|(&d, &w)| u32::from(d) * w)
        .sum();
    let remainder = sum % 11;
    if remainder < 2 { 0 } else { (11 - remainder) as u8 }
}

/// Collects the ASCII digits of `input` as values 0-9.
///
/// Returns every digit found, so the caller can report the actual count
/// when it doesn't match.
pub(crate) fn digit_values(input: &str) -> Vec<u8> {
    input
        .bytes()
        .filter(u8::is_ascii_digit)
        .map(|b| b - b'0')
        .collect()
}
