//! Masking, check-digit validation and form state for Brazilian registry
//! identifiers.
//!
//! This crate provides the data-entry layer of a university administration
//! front-end: input masks and check-digit validation for CPF and CNPJ,
//! phone and CEP masks, currency and date formatting, and the registration
//! forms built on top of them.
//!
//! # Quick Start
//!
//! ```rust
//! use cadastro::{mask_cpf, validate_cpf, mask_cnpj, validate_cnpj, format_currency};
//!
//! // Masks are applied incrementally as the user types
//! assert_eq!(mask_cpf("1114"), "111.4");
//! assert_eq!(mask_cpf("11144477735"), "111.444.777-35");
//!
//! // Validation only looks at the digits
//! assert!(validate_cpf("111.444.777-35"));
//! assert!(!validate_cpf("111.444.777-36"));
//!
//! assert_eq!(mask_cnpj("11222333000181"), "11.222.333/0001-81");
//! assert!(validate_cnpj("11.222.333/0001-81"));
//!
//! assert_eq!(format_currency(1250.0), "R$ 1.250,00");
//! ```
//!
//! # Modules
//!
//! - [`mask`]: Incremental input masks (CPF, CNPJ, phone, CEP)
//! - [`document`]: CPF/CNPJ check digits and the typed [`Cpf`] / [`Cnpj`] values
//! - [`format`]: Currency, dates, e-mail shape, generated registration codes
//! - [`catalog`]: Static course, discipline and state data
//! - [`form`]: Registration form state, enrollment flow, demo login
//! - [`error`]: Error types
//!
//! # Totality
//!
//! The masking and `validate_*` functions never fail and never panic: bad
//! input yields a best-effort partial mask or `false`. The typed APIs
//! ([`Cpf::parse`], [`Cnpj::parse`], [`Date::parse_iso`]) return errors that
//! say what was wrong.

pub mod catalog;
pub mod document;
pub mod error;
pub mod form;
pub mod format;
pub mod mask;
pub mod util;

// Re-export commonly used items at crate root
pub use document::{validate_cnpj, validate_cpf, Cnpj, Cpf, DocumentKind};
pub use error::{DateParseError, DocumentError};
pub use format::{
    format_currency, format_date, format_date_iso, generate_id, generate_matricula,
    generate_professor_id, parse_currency, validate_email, IdConfig,
};
pub use mask::{mask_cep, mask_cnpj, mask_cpf, mask_phone, only_digits};
pub use util::Date;

/// Crate version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
