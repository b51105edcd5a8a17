//! Phone number helpers
//!
//! Accounts are keyed by the international form without `+`, e.g. `6281234567890`.

use regex::Regex;
use std::sync::LazyLock;

static PHONE_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^62\d{9,15}$").expect("phone pattern is a valid regex"));

/// Strip everything but digits and turn a local `0…` prefix into `62…`
pub fn normalize_phone_number(raw: &str) -> String {
    let digits: String = raw.chars().filter(|c| c.is_ascii_digit()).collect();
    match digits.strip_prefix('0') {
        Some(rest) => format!("62{rest}"),
        None => digits,
    }
}

/// `62` followed by 9 to 15 digits
pub fn is_valid_phone_number(phone: &str) -> bool {
    PHONE_PATTERN.is_match(phone)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_local_prefix() {
        assert_eq!(normalize_phone_number("081234567890"), "6281234567890");
        assert_eq!(normalize_phone_number("0812-3456-7890"), "6281234567890");
    }

    #[test]
    fn test_normalize_international() {
        assert_eq!(normalize_phone_number("+62 812 3456 7890"), "6281234567890");
        assert_eq!(normalize_phone_number("6281234567890"), "6281234567890");
    }

    #[test]
    fn test_phone_pattern() {
        assert!(is_valid_phone_number("6281234567890"));
        assert!(is_valid_phone_number("62812345678"));
        assert!(!is_valid_phone_number("6281234"));
        assert!(!is_valid_phone_number("081234567890"));
        assert!(!is_valid_phone_number("62812345678901234567"));
        assert!(!is_valid_phone_number("62-812-3456-7890"));
    }
}
