//! Synthetic registration codes.
//!
//! Codes are a fixed prefix, optionally the current year, and a random
//! zero-padded numeric suffix taken from a v4 UUID. There is no collision
//! avoidance and nothing is persisted: codes are unlikely to repeat within
//! one session, and that is all they promise.

use uuid::Uuid;

use crate::util::Date;

/// Upper bound on suffix digits (a v4 UUID carries 122 random bits).
const MAX_SUFFIX_DIGITS: u32 = 30;

/// Shape of a generated code.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct IdConfig {
    /// Literal text at the start of every code.
    pub prefix: String,
    /// Insert the current four-digit year after the prefix.
    pub include_year: bool,
    /// Number of random digits, clamped to `1..=30`.
    pub suffix_digits: u32,
}

impl Default for IdConfig {
    fn default() -> Self {
        Self::matricula()
    }
}

impl IdConfig {
    /// Student enrollment codes: `MAT2025` followed by 6 digits.
    pub fn matricula() -> Self {
        Self {
            prefix: "MAT".to_string(),
            include_year: true,
            suffix_digits: 6,
        }
    }

    /// Teacher codes: `PROF` followed by 4 digits.
    pub fn professor() -> Self {
        Self {
            prefix: "PROF".to_string(),
            include_year: false,
            suffix_digits: 4,
        }
    }

    /// Length of every code produced with this config.
    pub fn code_len(&self) -> usize {
        let year = if self.include_year { 4 } else { 0 };
        self.prefix.len() + year + self.suffix_digits.clamp(1, MAX_SUFFIX_DIGITS) as usize
    }
}

/// Generates a code for `config` stamped with `year`.
pub(crate) fn generate_id_for_year(config: &IdConfig, year: i32) -> String {
    let digits = config.suffix_digits.clamp(1, MAX_SUFFIX_DIGITS);
    let suffix = Uuid::new_v4().as_u128() % 10u128.pow(digits);

    let mut code = String::with_capacity(config.code_len());
    code.push_str(&config.prefix);
    if config.include_year {
        code.push_str(&format!("{:04}", year.rem_euclid(10_000)));
    }
    code.push_str(&format!("{:0width$}", suffix, width = digits as usize));
    code
}

/// Generates a code shaped by `config`, using today's year.
pub fn generate_id(config: &IdConfig) -> String {
    generate_id_for_year(config, Date::today().year())
}

/// Generates a student enrollment code such as `MAT2025048213`.
pub fn generate_matricula() -> String {
    generate_id(&IdConfig::matricula())
}

/// Generates a teacher code such as `PROF0421`.
pub fn generate_professor_id() -> String {
    generate_id(&IdConfig::professor())
}
