//! Check characters for control numbers.
//!
//! A control number is ten digits: a two-digit prefix and an eight-digit
//! serial. Its check character is `ALPHABET[(prefix * 10^8 + serial) % 23]`.

use std::sync::OnceLock;

use regex::Regex;

use crate::nist::types::error::{NistError, Result};

/// Letters with I, O and S removed.
pub const ALPHABET: &[u8; 23] = b"ZABCDEFGHJKLMNPQRTUVWXY";

const PREFIX_DIGITS: usize = 2;
const SERIAL_MODULUS: u64 = 100_000_000;

static CONTROL_NUMBER_PATTERN: OnceLock<Regex> = OnceLock::new();

fn control_number_regex() -> &'static Regex {
    CONTROL_NUMBER_PATTERN
        .get_or_init(|| Regex::new(r"^[0-9]{10}$").expect("Invalid control number regex pattern"))
}

/// Computes the check character for a ten-digit control number.
pub fn check_digit(digits: &str) -> Result<char> {
    if !control_number_regex().is_match(digits) {
        return Err(NistError::InvalidControlNumber(digits.to_owned()));
    }
    let (prefix, serial) = digits.split_at(PREFIX_DIGITS);
    let parse = |part: &str| {
        part.parse::<u64>()
            .map_err(|_| NistError::InvalidControlNumber(digits.to_owned()))
    };
    let value = parse(prefix)? * SERIAL_MODULUS + parse(serial)?;
    Ok(ALPHABET[(value % ALPHABET.len() as u64) as usize] as char)
}

/// Appends the check character to a ten-digit control number.
pub fn with_check_digit(digits: &str) -> Result<String> {
    let check = check_digit(digits)?;
    Ok(format!("{}{}", digits, check))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_maps_to_first_symbol() {
        assert_eq!(check_digit("0000000000").unwrap(), 'Z');
        assert_eq!(check_digit("0000000023").unwrap(), 'Z');
        assert_eq!(check_digit("0000000022").unwrap(), 'Y');
    }

    #[test]
    fn rejects_non_ascii_digits() {
        assert!(check_digit("١٢٣٤٥٦٧٨٩٠").is_err());
    }
}
