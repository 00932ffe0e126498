//! Error types for identifier parsing and date handling.
//!
//! The masking and boolean validation functions never fail; these errors
//! back the typed APIs ([`Cpf::parse`](crate::Cpf::parse),
//! [`Cnpj::parse`](crate::Cnpj::parse), [`Date::parse_iso`](crate::Date::parse_iso))
//! that explain *why* an input was rejected.

use thiserror::Error;

use crate::document::DocumentKind;

/// Error while parsing a CPF or CNPJ.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum DocumentError {
    #[error("{kind} deve ter {expected} dígitos, encontrados {found}")]
    WrongLength {
        kind: DocumentKind,
        expected: usize,
        found: usize,
    },

    #[error("{kind} com todos os dígitos iguais é inválido")]
    RepeatedDigits { kind: DocumentKind },

    #[error("{kind}: dígito verificador {position} deveria ser {expected}, encontrado {found}")]
    CheckDigitMismatch {
        kind: DocumentKind,
        /// 1 for the first check digit, 2 for the second.
        position: u8,
        expected: u8,
        found: u8,
    },
}

impl DocumentError {
    /// Returns the document kind the error refers to.
    pub fn kind(&self) -> DocumentKind {
        match self {
            DocumentError::WrongLength { kind, .. }
            | DocumentError::RepeatedDigits { kind }
            | DocumentError::CheckDigitMismatch { kind, .. } => *kind,
        }
    }
}

/// Error while parsing a calendar date.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DateParseError {
    #[error("Data inválida: {input:?} (formato esperado AAAA-MM-DD)")]
    Format { input: String },

    #[error("Ano {year} fora do intervalo na data {input:?}")]
    Year { input: String, year: i32 },

    #[error("Mês {month} inválido na data {input:?}")]
    Month { input: String, month: u32 },

    #[error("Dia {day} inválido na data {input:?}")]
    Day { input: String, day: u32 },
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Cnpj, Cpf};

    #[test]
    fn test_document_error_kind() {
        assert_eq!(Cpf::parse("123").unwrap_err().kind(), DocumentKind::Cpf);
        assert_eq!(Cpf::parse("111.111.111-11").unwrap_err().kind(), DocumentKind::Cpf);
        assert_eq!(Cnpj::parse("11.222.333/0001-80").unwrap_err().kind(), DocumentKind::Cnpj);
    }

    #[test]
    fn test_messages() {
        let err = Cpf::parse("111.444.777-36").unwrap_err();
        assert_eq!(err.to_string(), "CPF: dígito verificador 2 deveria ser 5, encontrado 6");
        let err = DateParseError::Year {
            input: "x".into(),
            year: 1_000_000,
        };
        assert_eq!(err.to_string(), "Ano 1000000 fora do intervalo na data \"x\"");
    }
}
