//! Pure formatters and validators for the form fields collected by the
//! donation wizard.
//!
//! Every `mask` function accepts arbitrary input, keeps only its digits up to
//! the field's maximum length and re-inserts the display separators, so
//! callers can run it on each keystroke. `unmask` strips everything except
//! digits. Validators work on masked or unmasked input alike.

pub mod cpf;
pub mod phone;
pub mod postal_code;

/// Digits of `input`, in order, nothing else.
pub(crate) fn digits(input: &str) -> String {
    input.chars().filter(char::is_ascii_digit).collect()
}
