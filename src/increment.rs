//! "Next" button logic: bump the trailing number of a rule
//!
//! `EXEM-0009` becomes `EXEM-0010`, `EXEM-999` becomes `EXEM-1000`.
//! Text without a trailing ASCII digit run is returned unchanged.

use regex::Regex;
use std::sync::LazyLock;
use thiserror::Error;

/// Lazy prefix so the digit group captures the longest trailing run
static TRAILING_NUMBER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)^(.*?)([0-9]+)$").expect("valid trailing number pattern"));

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum IncrementError {
    /// Digit run does not fit in u64, or is u64::MAX already
    #[error("trailing number {digits} cannot be incremented within 64 bits")]
    Overflow { digits: String },
}

/// Increment the trailing number of `text`, keeping its zero-padded width.
///
/// Returns the text unchanged when it has no trailing digits.
pub fn increment(text: &str) -> Result<String, IncrementError> {
    let Some(caps) = TRAILING_NUMBER.captures(text) else {
        return Ok(text.to_string());
    };

    let prefix = &caps[1];
    let digits = &caps[2];

    let next = digits
        .parse::<u64>()
        .ok()
        .and_then(|n| n.checked_add(1))
        .ok_or_else(|| IncrementError::Overflow {
            digits: digits.to_string(),
        })?;

    Ok(format!("{prefix}{next:0>width$}", width = digits.len()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_increment_preserves_width() {
        assert_eq!(increment("EXEM-0009").unwrap(), "EXEM-0010");
        assert_eq!(increment("009").unwrap(), "010");
    }

    #[test]
    fn test_increment_grows_past_width() {
        assert_eq!(increment("EXEM-999").unwrap(), "EXEM-1000");
        assert_eq!(increment("9").unwrap(), "10");
    }

    #[test]
    fn test_increment_seed_rule() {
        assert_eq!(
            increment("EXEM-5601350S000000000010").unwrap(),
            "EXEM-5601350S000000000011"
        );
    }

    #[test]
    fn test_increment_uses_longest_trailing_run() {
        // Digits inside the prefix are left alone
        assert_eq!(increment("A1B22").unwrap(), "A1B23");
        assert_eq!(increment("12-3499").unwrap(), "12-3500");
    }

    #[test]
    fn test_increment_without_trailing_digits_is_identity() {
        assert_eq!(increment("ABC").unwrap(), "ABC");
        assert_eq!(increment("123A").unwrap(), "123A");
        assert_eq!(increment("").unwrap(), "");
    }

    #[test]
    fn test_increment_ignores_non_ascii_digits() {
        // Arabic-Indic digits are not part of the pattern
        assert_eq!(increment("ID-٣").unwrap(), "ID-٣");
    }

    #[test]
    fn test_increment_all_zeros() {
        assert_eq!(increment("X000").unwrap(), "X001");
    }

    #[test]
    fn test_increment_overflow_at_u64_max() {
        let text = format!("N{}", u64::MAX);
        assert_eq!(
            increment(&text),
            Err(IncrementError::Overflow {
                digits: u64::MAX.to_string()
            })
        );
    }

    #[test]
    fn test_increment_overflow_when_run_exceeds_u64() {
        let err = increment("N99999999999999999999999").unwrap_err();
        assert!(matches!(err, IncrementError::Overflow { .. }));
    }

    #[test]
    fn test_increment_long_zero_padded_run_fits() {
        // 25 digits but the value itself is small
        let text = "0000000000000000000000042";
        assert_eq!(increment(text).unwrap(), "0000000000000000000000043");
    }

    proptest! {
        #[test]
        fn prop_increment_matches_padded_successor(
            prefix in "[A-Za-z_-]{0,8}",
            n in 0u64..1_000_000_000,
            extra_zeros in 0usize..6,
        ) {
            let digits = format!("{}{}", "0".repeat(extra_zeros), n);
            let text = format!("{prefix}{digits}");
            let expected = format!("{prefix}{:0>width$}", n + 1, width = digits.len());
            prop_assert_eq!(increment(&text).unwrap(), expected);
        }

        #[test]
        fn prop_increment_identity_without_trailing_digit(text in ".*[^0-9]") {
            prop_assert_eq!(increment(&text).unwrap(), text);
        }
    }
}
