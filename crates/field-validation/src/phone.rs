//! Phone-number formatting and validation (area code plus 8- or 9-digit
//! subscriber number).

use {crate::digits, regex::Regex, std::sync::LazyLock};

const MAX_DIGITS: usize = 11;

static VALID: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[1-9]{2}(?:[2-9]\d{7}|9\d{8})$").unwrap());

/// Formats up to 11 digits as `(DD) DDDD-DDDD` or `(DD) DDDDD-DDDD`,
/// inserting separators as far as the input reaches.
pub fn mask(input: &str) -> String {
    let digits: String = digits(input).chars().take(MAX_DIGITS).collect();
    if digits.is_empty() {
        return digits;
    }
    let (area, subscriber) = digits.split_at(digits.len().min(2));
    let mut out = String::with_capacity(15);
    out.push('(');
    out.push_str(area);
    if subscriber.is_empty() {
        return out;
    }
    out.push_str(") ");
    // Nine-digit subscriber numbers break after the fifth digit, eight-digit
    // ones after the fourth.
    let split = if subscriber.len() > 8 { 5 } else { 4 };
    if subscriber.len() <= split {
        out.push_str(subscriber);
    } else {
        let (prefix, suffix) = subscriber.split_at(split);
        out.push_str(prefix);
        out.push('-');
        out.push_str(suffix);
    }
    out
}

/// Strips the mask, keeping only the digits.
pub fn unmask(input: &str) -> String {
    digits(input)
}

/// A number is valid with a two-digit area code and either an eight-digit
/// fixed line or a nine-digit mobile number starting with 9.
pub fn is_valid(input: &str) -> bool {
    VALID.is_match(&unmask(input))
}
