//! CNPJ (Cadastro Nacional da Pessoa Jurídica).
//!
//! ```text
//! 11.222.333/0001-81
//! └ root ─┘ └br┘ └┴─ check digits
//! ```
//!
//! Check digits use the weights 5..2,9..2 over the 12 base digits, then
//! 6..2,9..2 over the base plus the first check digit.

use std::fmt;
use std::str::FromStr;

use crate::document::{check_digit, digit_values, DocumentKind};
use crate::error::DocumentError;
use crate::mask::{mask_cnpj, CNPJ_DIGITS};

const FIRST_WEIGHTS: [u32; 12] = [5, 4, 3, 2, 9, 8, 7, 6, 5, 4, 3, 2];
const SECOND_WEIGHTS: [u32; 13] = [6, 5, 4, 3, 2, 9, 8, 7, 6, 5, 4, 3, 2];

/// A CNPJ whose check digits are known to be correct.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Cnpj([u8; CNPJ_DIGITS]);

impl Cnpj {
    /// Parses a CNPJ, masked or not. Non-digit characters are ignored.
    pub fn parse(input: &str) -> Result<Self, DocumentError> {
        let values = digit_values(input);
        let digits: [u8; CNPJ_DIGITS] =
            values
                .as_slice()
                .try_into()
                .map_err(|_| DocumentError::WrongLength {
                    kind: DocumentKind::Cnpj,
                    expected: CNPJ_DIGITS,
                    found: values.len(),
                })?;

        let (first, second) = check_digits(&digits[..12]);
        for (position, expected, found) in [(1, first, digits[12]), (2, second, digits[13])] {
            if expected != found {
                return Err(DocumentError::CheckDigitMismatch {
                    kind: DocumentKind::Cnpj,
                    position,
                    expected,
                    found,
                });
            }
        }

        Ok(Self(digits))
    }

    /// Builds a CNPJ from its 12 base digits (root and branch).
    ///
    /// Base values above 9 are reduced modulo 10.
    pub fn from_base(base: [u8; 12]) -> Self {
        let mut digits = [0u8; CNPJ_DIGITS];
        for (slot, d) in digits.iter_mut().zip(base) {
            *slot = d % 10;
        }
        let (first, second) = check_digits(&digits[..12]);
        digits[12] = first;
        digits[13] = second;
        Self(digits)
    }

    pub fn digits(&self) -> &[u8; CNPJ_DIGITS] {
        &self.0
    }

    /// The 4-digit branch number (`0001` for the head office).
    pub fn branch(&self) -> u16 {
        self.0[8..12]
            .iter()
            .fold(0u16, |acc, &d| acc * 10 + u16::from(d))
    }

    pub fn to_digit_string(&self) -> String {
        self.0.iter().map(|&d| char::from(b'0' + d)).collect()
    }
}

impl fmt::Display for Cnpj {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&mask_cnpj(&self.to_digit_string()))
    }
}

impl FromStr for Cnpj {
    type Err = DocumentError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

fn check_digits(base: &[u8]) -> (u8, u8) {
    let first = check_digit(base, &FIRST_WEIGHTS);
    let mut extended = [0u8; 13];
    extended[..12].copy_from_slice(base);
    extended[12] = first;
    let second = check_digit(&extended, &SECOND_WEIGHTS);
    (first, second)
}

/// Returns true if `input` holds a CNPJ with correct check digits.
///
/// Punctuation is ignored; anything without exactly 14 digits is invalid.
pub fn validate_cnpj(input: &str) -> bool {
    Cnpj::parse(input).is_ok()
}
