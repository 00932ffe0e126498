//! CPF (Cadastro de Pessoas Físicas).
//!
//! ```text
//! 111.444.777-35
//! └─ base ──┘ └┴─ check digits
//! ```
//!
//! The first check digit weighs the 9 base digits 10..=2; the second weighs
//! the base plus the first check digit 11..=2.

use std::fmt;
use std::str::FromStr;

use crate::document::{check_digit, digit_values, DocumentKind};
use crate::error::DocumentError;
use crate::mask::{mask_cpf, CPF_DIGITS};

const FIRST_WEIGHTS: [u32; 9] = [10, 9, 8, 7, 6, 5, 4, 3, 2];
const SECOND_WEIGHTS: [u32; 10] = [11, 10, 9, 8, 7, 6, 5, 4, 3, 2];

/// A CPF whose check digits are known to be correct.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Cpf([u8; CPF_DIGITS]);

impl Cpf {
    /// Parses a CPF, masked or not.
    ///
    /// Every non-digit character is ignored.
    pub fn parse(input: &str) -> Result<Self, DocumentError> {
        let values = digit_values(input);
        let digits: [u8; CPF_DIGITS] =
            values
                .as_slice()
                .try_into()
                .map_err(|_| DocumentError::WrongLength {
                    kind: DocumentKind::Cpf,
                    expected: CPF_DIGITS,
                    found: values.len(),
                })?;

        if digits.iter().all(|&d| d == digits[0]) {
            return Err(DocumentError::RepeatedDigits {
                kind: DocumentKind::Cpf,
            });
        }

        let (first, second) = check_digits(&digits[..9]);
        if first != digits[9] {
            return Err(DocumentError::CheckDigitMismatch {
                kind: DocumentKind::Cpf,
                position: 1,
                expected: first,
                found: digits[9],
            });
        }
        if second != digits[10] {
            return Err(DocumentError::CheckDigitMismatch {
                kind: DocumentKind::Cpf,
                position: 2,
                expected: second,
                found: digits[10],
            });
        }

        Ok(Self(digits))
    }

    /// Builds a CPF from its 9 base digits, appending the check digits.
    ///
    /// Base values above 9 are reduced modulo 10. Fails only when the
    /// result would consist of eleven equal digits.
    pub fn from_base(base: [u8; 9]) -> Result<Self, DocumentError> {
        let mut digits = [0u8; CPF_DIGITS];
        for (slot, d) in digits.iter_mut().zip(base) {
            *slot = d % 10;
        }
        let (first, second) = check_digits(&digits[..9]);
        digits[9] = first;
        digits[10] = second;
        if digits.iter().all(|&d| d == digits[0]) {
            return Err(DocumentError::RepeatedDigits {
                kind: DocumentKind::Cpf,
            });
        }
        Ok(Self(digits))
    }

    /// Returns the 11 digits as values 0-9.
    pub fn digits(&self) -> &[u8; CPF_DIGITS] {
        &self.0
    }

    /// Returns the digits without punctuation.
    pub fn to_digit_string(&self) -> String {
        self.0.iter().map(|&d| char::from(b'0' + d)).collect()
    }
}

impl fmt::Display for Cpf {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&mask_cpf(&self.to_digit_string()))
    }
}

impl FromStr for Cpf {
    type Err = DocumentError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

/// Computes both check digits for a 9-digit base.
fn check_digits(base: &[u8]) -> (u8, u8) {
    let first = check_digit(base, &FIRST_WEIGHTS);
    let mut extended = [0u8; 10];
    extended[..9].copy_from_slice(base);
    extended[9] = first;
    let second = check_digit(&extended, &SECOND_WEIGHTS);
    (first, second)
}

/// Returns true if `input` holds a CPF with correct check digits.
///
/// Punctuation is ignored. Inputs without exactly 11 digits and inputs
/// whose digits are all equal (such as `000.000.000-00`) are invalid.
pub fn validate_cpf(input: &str) -> bool {
    Cpf::parse(input).is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_valid() {
        assert!(validate_cpf("11144477735"));
        assert!(validate_cpf("111.444.777-35"));
        assert!(validate_cpf("529.982.247-25"));
    }

    #[test]
    fn test_tampered_last_digit() {
        assert!(!validate_cpf("11144477736"));
        assert_eq!(
            Cpf::parse("11144477736"),
            Err(DocumentError::CheckDigitMismatch {
                kind: DocumentKind::Cpf,
                position: 2,
                expected: 5,
                found: 6,
            })
        );
    }

    #[test]
    fn test_tampered_first_check_digit() {
        let err = Cpf::parse("111.444.777-45").unwrap_err();
        assert!(matches!(
            err,
            DocumentError::CheckDigitMismatch { position: 1, expected: 3, found: 4, .. }
        ));
    }

    #[test]
    fn test_repeated_digits_rejected() {
        for d in 0..=9u8 {
            let s: String = std::iter::repeat(char::from(b'0' + d)).take(11).collect();
            assert!(!validate_cpf(&s), "{s} should be invalid");
        }
        assert_eq!(
            Cpf::parse("111.111.111-11"),
            Err(DocumentError::RepeatedDigits { kind: DocumentKind::Cpf })
        );
    }

    #[test]
    fn test_wrong_length() {
        assert!(!validate_cpf(""));
        assert!(!validate_cpf("111.444.777-3"));
        assert!(!validate_cpf("111444777350"));
        assert_eq!(
            Cpf::parse("123"),
            Err(DocumentError::WrongLength {
                kind: DocumentKind::Cpf,
                expected: 11,
                found: 3,
            })
        );
    }

    #[test]
    fn test_punctuation_does_not_matter() {
        assert!(validate_cpf("111 444 777 35"));
        assert!(validate_cpf("111/444/777/35"));
        assert!(validate_cpf("cpf: 111.444.777-35"));
    }

    #[test]
    fn test_from_base() {
        let cpf = Cpf::from_base([1, 1, 1, 4, 4, 4, 7, 7, 7]).unwrap();
        assert_eq!(cpf.to_digit_string(), "11144477735");
        assert_eq!(cpf.to_string(), "111.444.777-35");
        assert_eq!(Cpf::parse(&cpf.to_string()), Ok(cpf));
    }

    #[test]
    fn test_from_base_repeated() {
        assert_eq!(
            Cpf::from_base([0; 9]),
            Err(DocumentError::RepeatedDigits { kind: DocumentKind::Cpf })
        );
        // Values are reduced modulo 10.
        assert_eq!(
            Cpf::from_base([11, 1, 1, 4, 4, 4, 7, 7, 7]).unwrap().to_digit_string(),
            "11144477735"
        );
    }

    #[test]
    fn test_from_str() {
        let cpf: Cpf = "529.982.247-25".parse().unwrap();
        assert_eq!(cpf.digits(), &[5, 2, 9, 9, 8, 2, 2, 4, 7, 2, 5]);
        assert!("529.982.247-26".parse::<Cpf>().is_err());
    }
}
