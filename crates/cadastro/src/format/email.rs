//! E-mail shape check.

/// Returns true if `value` looks like `local@domain.tld`.
///
/// This is a shape check, not RFC 5322 parsing: the value must contain no
/// whitespace, exactly one `@` with a non-empty local part, and a domain
/// with at least one `.` that has characters on both sides.
pub fn validate_email(value: &str) -> bool {
    if value.chars().any(char::is_whitespace) {
        return false;
    }
    let Some((local, domain)) = value.split_once('@') else {
        return false;
    };
    if local.is_empty() || domain.contains('@') {
        return false;
    }
    domain
        .char_indices()
        .any(|(i, c)| c == '.' && i > 0 && i + 1 < domain.len())
}
