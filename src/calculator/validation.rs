/// True when `raw` is a positive integer written without sign, decimal
/// point or leading zero (`^[1-9][0-9]*$`).
pub fn is_valid_positive_int(raw: &str) -> bool {
    let bytes = raw.as_bytes();
    match bytes.split_first() {
        Some((first, rest)) => {
            matches!(first, b'1'..=b'9') && rest.iter().all(|b| b.is_ascii_digit())
        }
        None => false,
    }
}

/// Parses a quantity, rate or price. Returns `None` for anything the
/// predicate rejects and for values that do not fit in `u64`.
pub fn parse_positive_int(raw: &str) -> Option<u64> {
    if !is_valid_positive_int(raw) {
        return None;
    }
    raw.parse().ok()
}

/// Parses the discount input. Empty, unparseable or negative text yields `None`.
pub fn parse_discount_value(raw: &str) -> Option<u64> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }
    if let Ok(value) = trimmed.parse::<i64>() {
        return u64::try_from(value).ok();
    }
    // Unsigned digits past the i64 range still mean "as much as possible".
    let digits = trimmed.strip_prefix('+').unwrap_or(trimmed);
    if !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit()) {
        return Some(digits.parse().unwrap_or(u64::MAX));
    }
    None
}

/// Trims `raw` and uppercases its first character.
pub fn capitalize_first(raw: &str) -> String {
    let trimmed = raw.trim();
    let mut chars = trimmed.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn positive_int_rejects_malformed_text() {
        for raw in ["0", "", "01", "-5", "3.5", "+7", " 4", "4 ", "1e3", "١٢"] {
            assert!(!is_valid_positive_int(raw), "{raw:?} should be rejected");
        }
        for raw in ["1", "42", "100", "9007199254740993"] {
            assert!(is_valid_positive_int(raw), "{raw:?} should be accepted");
        }
    }

    #[test]
    fn parse_positive_int_rejects_overflow() {
        assert_eq!(parse_positive_int("18446744073709551615"), Some(u64::MAX));
        assert_eq!(parse_positive_int("18446744073709551616"), None);
    }

    #[test]
    fn discount_value_parsing() {
        assert_eq!(parse_discount_value(""), None);
        assert_eq!(parse_discount_value("  "), None);
        assert_eq!(parse_discount_value("0"), Some(0));
        assert_eq!(parse_discount_value(" 15 "), Some(15));
        assert_eq!(parse_discount_value("-4"), None);
        assert_eq!(parse_discount_value("12.5"), None);
        assert_eq!(parse_discount_value("ten"), None);
        assert_eq!(parse_discount_value("99999999999999999999"), Some(u64::MAX));
        assert_eq!(parse_discount_value("-99999999999999999999"), None);
    }

    #[test]
    fn capitalize_first_trims_and_keeps_rest() {
        assert_eq!(capitalize_first("  john smith "), "John smith");
        assert_eq!(capitalize_first("éclair"), "Éclair");
        assert_eq!(capitalize_first("ACME"), "ACME");
        assert_eq!(capitalize_first("   "), "");
    }
}
