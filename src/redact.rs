//! Redaction of card digits for logs and debug output.
//!
//! Field states hold partially typed card numbers. Whenever one is printed
//! through `Debug` or a log line it goes through [`redact_digits`] first, so
//! only the last four digits of a long enough number are ever visible.

/// Number of trailing digits left visible.
pub const VISIBLE_DIGITS: usize = 4;

/// Masks every digit except the last four.
///
/// Inputs of four digits or fewer are masked completely. Non-digit
/// characters are dropped.
///
/// # Example
///
/// ```
/// use payfield::redact::redact_digits;
///
/// assert_eq!(redact_digits("4111 1111 1111 1111"), "************1111");
/// assert_eq!(redact_digits("411"), "***");
/// ```
#[inline]
pub fn redact_digits(input: &str) -> String {
    let digits: Vec<char> = input.chars().filter(|c| c.is_ascii_digit()).collect();
    let len = digits.len();

    if len <= VISIBLE_DIGITS {
        return "*".repeat(len);
    }

    let mut result = String::with_capacity(len);
    for _ in 0..len - VISIBLE_DIGITS {
        result.push('*');
    }
    result.extend(&digits[len - VISIBLE_DIGITS..]);
    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_redact_full_number() {
        let redacted = redact_digits("4111111111111111");
        assert_eq!(redacted, "************1111");
        assert!(!redacted.contains("4111111111111111"));
    }

    #[test]
    fn test_redact_short_input() {
        assert_eq!(redact_digits(""), "");
        assert_eq!(redact_digits("4"), "*");
        assert_eq!(redact_digits("4111"), "****");
        assert_eq!(redact_digits("41112"), "*1112");
    }

    #[test]
    fn test_redact_ignores_separators() {
        assert_eq!(redact_digits("12/25"), "****");
        assert_eq!(redact_digits("3782 822463 10005"), "***********0005");
    }
}
