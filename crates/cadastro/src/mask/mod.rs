//! Incremental input masks.
//!
//! Every mask works the same way: keep only the ASCII digits of the input,
//! truncate them to the pattern's capacity, then insert the pattern's
//! literal separators in front of the digits they precede. Separators are
//! only emitted once the digit they precede exists, so a partially typed
//! value yields a prefix of the full pattern:
//!
//! ```text
//! "1"            -> "1"
//! "1114"         -> "111.4"
//! "11144477735"  -> "111.444.777-35"
//! ```
//!
//! Because the output depends only on the digit sequence, re-masking a
//! masked string reproduces it exactly.

/// CPF digit count.
pub const CPF_DIGITS: usize = 11;
/// CNPJ digit count.
pub const CNPJ_DIGITS: usize = 14;
/// CEP digit count.
pub const CEP_DIGITS: usize = 8;
/// Maximum phone digit count (area code + 9-digit mobile number).
pub const PHONE_DIGITS: usize = 11;

/// Literal text inserted before the digit at a 0-based index.
type Separator = (usize, &'static str);

const CPF_PATTERN: &[Separator] = &[(3, "."), (6, "."), (9, "-")];
const CNPJ_PATTERN: &[Separator] = &[(2, "."), (5, "."), (8, "/"), (12, "-")];
const CEP_PATTERN: &[Separator] = &[(5, "-")];
const LANDLINE_PATTERN: &[Separator] = &[(0, "("), (2, ") "), (6, "-")];
const MOBILE_PATTERN: &[Separator] = &[(0, "("), (2, ") "), (7, "-")];

/// Returns the ASCII digits of `raw`, in order.
pub fn only_digits(raw: &str) -> String {
    raw.chars().filter(char::is_ascii_digit).collect()
}

/// Extracts at most `max` digits from `raw`.
fn take_digits(raw: &str, max: usize) -> String {
    raw.chars().filter(char::is_ascii_digit).take(max).collect()
}

/// Interleaves `digits` with the separators of `pattern`.
fn apply_pattern(digits: &str, pattern: &[Separator]) -> String {
    let extra: usize = pattern.iter().map(|(_, text)| text.len()).sum();
    let mut out = String::with_capacity(digits.len() + extra);
    let mut seps = pattern.iter().peekable();

    for (i, digit) in digits.chars().enumerate() {
        while let Some((_, text)) = seps.next_if(|(before, _)| *before == i) {
            out.push_str(text);
        }
        out.push(digit);
    }
    out
}

/// Masks a CPF as `000.000.000-00`, incrementally.
pub fn mask_cpf(raw: &str) -> String {
    apply_pattern(&take_digits(raw, CPF_DIGITS), CPF_PATTERN)
}

/// Masks a CNPJ as `00.000.000/0000-00`, incrementally.
pub fn mask_cnpj(raw: &str) -> String {
    apply_pattern(&take_digits(raw, CNPJ_DIGITS), CNPJ_PATTERN)
}

/// Masks a CEP as `00000-000`, incrementally.
pub fn mask_cep(raw: &str) -> String {
    apply_pattern(&take_digits(raw, CEP_DIGITS), CEP_PATTERN)
}

/// Masks a phone number.
///
/// Up to 10 digits are laid out as a landline, `(00) 0000-0000`; the 11th
/// digit switches to the mobile layout, `(00) 00000-0000`.
pub fn mask_phone(raw: &str) -> String {
    let digits = take_digits(raw, PHONE_DIGITS);
    let pattern = if digits.len() == PHONE_DIGITS {
        MOBILE_PATTERN
    } else {
        LANDLINE_PATTERN
    };
    apply_pattern(&digits, pattern)
}
