//! National-ID (CPF) formatting and checksum validation.

use crate::digits;

const MAX_DIGITS: usize = 11;

/// Formats up to 11 digits as `000.000.000-00`, inserting separators as far
/// as the input reaches. Digits beyond the eleventh are dropped.
pub fn mask(input: &str) -> String {
    let mut out = String::with_capacity(14);
    for (i, c) in digits(input).chars().take(MAX_DIGITS).enumerate() {
        match i {
            3 | 6 => out.push('.'),
            9 => out.push('-'),
            _ => {}
        }
        out.push(c);
    }
    out
}

/// Strips the mask, keeping only the digits.
pub fn unmask(input: &str) -> String {
    digits(input)
}

/// Validates the two check digits.
///
/// A CPF is 11 digits; each check digit is the weighted sum of the digits
/// before it, multiplied by ten, modulo eleven, with a remainder above nine
/// counting as zero. Sequences of a single repeated digit pass that formula,
/// so they are rejected up front.
pub fn is_valid(input: &str) -> bool {
    let digits = unmask(input);
    if digits.len() != MAX_DIGITS {
        return false;
    }
    let digits: Vec<u32> = digits.chars().filter_map(|c| c.to_digit(10)).collect();
    if digits.windows(2).all(|pair| pair[0] == pair[1]) {
        return false;
    }
    digits[9] == check_digit(&digits[..9]) && digits[10] == check_digit(&digits[..10])
}

fn check_digit(prefix: &[u32]) -> u32 {
    let weights = (2..=prefix.len() as u32 + 1).rev();
    let sum: u32 = prefix.iter().zip(weights).map(|(digit, weight)| digit * weight).sum();
    match (sum * 10) % 11 {
        rest if rest > 9 => 0,
        rest => rest,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mask_is_progressive() {
        assert_eq!(mask(""), "");
        assert_eq!(mask("5"), "5");
        assert_eq!(mask("529"), "529");
        assert_eq!(mask("5299"), "529.9");
        assert_eq!(mask("529982"), "529.982");
        assert_eq!(mask("5299822"), "529.982.2");
        assert_eq!(mask("529982247"), "529.982.247");
        assert_eq!(mask("5299822472"), "529.982.247-2");
        assert_eq!(mask("52998224725"), "529.982.247-25");
    }

    #[test]
    fn mask_ignores_excess_and_non_digits() {
        assert_eq!(mask("529.982.247-25999"), "529.982.247-25");
        assert_eq!(mask("a5b2c9"), "529");
    }

    #[test]
    fn unmask_round_trips_mask() {
        for input in ["", "5", "52998", "52998224725"] {
            assert_eq!(unmask(&mask(input)), input);
        }
    }

    #[test]
    fn accepts_valid_documents() {
        for cpf in ["52998224725", "529.982.247-25", "11144477735", "93541134780"] {
            assert!(is_valid(cpf), "{cpf} should be valid");
        }
    }

    #[test]
    fn rejects_wrong_check_digits() {
        assert!(!is_valid("52998224726"));
        assert!(!is_valid("52998224735"));
        assert!(!is_valid("11144477734"));
    }

    #[test]
    fn rejects_repeated_digit_sequences() {
        for d in 0..=9 {
            let cpf: String = std::iter::repeat_n(char::from_digit(d, 10).unwrap(), 11).collect();
            assert!(!is_valid(&cpf), "{cpf} should be rejected");
        }
    }

    #[test]
    fn rejects_wrong_lengths() {
        assert!(!is_valid(""));
        assert!(!is_valid("5299822472"));
        assert!(!is_valid("529982247255"));
    }

    #[test]
    fn verdict_matches_independent_recomputation() {
        // Brute recomputation of both check digits with the textbook
        // formula, over a spread of bases.
        for base in [123456789u64, 987654320, 550104733, 405850329, 111222333] {
            let prefix: Vec<u32> = format!("{base:09}")
                .chars()
                .map(|c| c.to_digit(10).unwrap())
                .collect();
            let d1 = {
                let sum: u32 = prefix.iter().zip((2..=10).rev()).map(|(d, w)| d * w).sum();
                let rest = (sum * 10) % 11;
                if rest > 9 { 0 } else { rest }
            };
            let mut with_d1 = prefix.clone();
            with_d1.push(d1);
            let d2 = {
                let sum: u32 = with_d1.iter().zip((2..=11).rev()).map(|(d, w)| d * w).sum();
                let rest = (sum * 10) % 11;
                if rest > 9 { 0 } else { rest }
            };
            let cpf: String = with_d1
                .iter()
                .chain(std::iter::once(&d2))
                .map(|d| char::from_digit(*d, 10).unwrap())
                .collect();
            let uniform = cpf.chars().all(|c| c == cpf.chars().next().unwrap());
            assert_eq!(is_valid(&cpf), !uniform, "{cpf}");

            // Any single-digit perturbation of a check digit must flip the
            // verdict to invalid.
            let mut broken: Vec<char> = cpf.chars().collect();
            broken[10] = char::from_digit((d2 + 1) % 10, 10).unwrap();
            let broken: String = broken.into_iter().collect();
            assert!(!is_valid(&broken), "{broken}");
        }
    }
}
