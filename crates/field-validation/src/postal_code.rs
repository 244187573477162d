//! Postal-code (CEP) formatting and validation.

use {crate::digits, regex::Regex, std::sync::LazyLock};

const MAX_DIGITS: usize = 8;

static VALID: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^\d{8}$").unwrap());

/// Formats up to 8 digits as `DDDDD-DDD`, inserting the separator as soon as
/// the input reaches it.
pub fn mask(input: &str) -> String {
    let digits: String = digits(input).chars().take(MAX_DIGITS).collect();
    if digits.len() <= 5 {
        return digits;
    }
    let (prefix, suffix) = digits.split_at(5);
    format!("{prefix}-{suffix}")
}

/// Strips the mask, keeping only the digits.
pub fn unmask(input: &str) -> String {
    digits(input)
}

pub fn is_valid(input: &str) -> bool {
    VALID.is_match(&unmask(input))
}
