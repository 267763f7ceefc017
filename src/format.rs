//! Masked input formatting.
//!
//! Formats a field value in place as the user types. After every keystroke
//! the host passes the value it showed before the keystroke and the value
//! the browser produced; [`apply_mask`] returns what should be displayed.
//!
//! # Rules
//!
//! - Typing forward regroups the digits and puts a separator right after
//!   every full group, including a trailing one, as long as the value stays
//!   below the maximum length.
//! - Deleting regroups the digits without adding a trailing separator. A
//!   trailing separator that the deletion exposed stays until the next
//!   backspace removes it.
//! - A backspace that lands on a separator inside the value also removes the
//!   digit before it, so every keystroke deletes something visible.
//! - Digits beyond the maximum length are dropped.
//! - Input containing anything other than digits and the separator is
//!   returned unchanged.
//!
//! # Example
//!
//! ```
//! use payfield::format::MaskSpec;
//!
//! let spec = MaskSpec::EXPIRY;
//! assert_eq!(spec.apply("1", "12"), "12/");
//! assert_eq!(spec.apply("12/2", "12/25"), "12/25");
//! assert_eq!(spec.apply("12/25", "12/2"), "12/2");
//! assert_eq!(spec.apply("12/", "12"), "12");
//! ```

use crate::error::PayfieldError;

/// Grouping parameters for one field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "config-json", derive(serde::Serialize, serde::Deserialize))]
pub struct MaskSpec {
    group_size: usize,
    separator: char,
    max_length: usize,
}

impl MaskSpec {
    /// Card number: `4111 1111 1111 1111`.
    pub const CARD_NUMBER: MaskSpec = MaskSpec {
        group_size: 4,
        separator: ' ',
        max_length: 19,
    };

    /// Expiration date: `MM/YY`.
    pub const EXPIRY: MaskSpec = MaskSpec {
        group_size: 2,
        separator: '/',
        max_length: 5,
    };

    /// Three-digit security code.
    pub const CVV: MaskSpec = MaskSpec {
        group_size: 0,
        separator: ' ',
        max_length: 3,
    };

    /// Creates a spec. A `group_size` of zero disables separators.
    ///
    /// # Errors
    ///
    /// Fails if `separator` is a digit or `max_length` is zero.
    pub fn new(group_size: usize, separator: char, max_length: usize) -> Result<Self, PayfieldError> {
        if separator.is_ascii_digit() {
            return Err(PayfieldError::InvalidSeparator { separator });
        }
        if max_length == 0 {
            return Err(PayfieldError::InvalidMaxLength);
        }
        Ok(Self {
            group_size,
            separator,
            max_length,
        })
    }

    /// Number of digits per group.
    #[inline]
    pub const fn group_size(&self) -> usize {
        self.group_size
    }

    /// The group separator.
    #[inline]
    pub const fn separator(&self) -> char {
        self.separator
    }

    /// Maximum number of characters in the formatted value.
    #[inline]
    pub const fn max_length(&self) -> usize {
        self.max_length
    }

    /// Returns a copy with a different maximum length.
    #[inline]
    pub const fn with_max_length(self, max_length: usize) -> Self {
        Self { max_length, ..self }
    }

    /// Largest number of digits that fits in `max_length`.
    ///
    /// Every `group_size + 1` characters hold one separator.
    pub fn digit_capacity(&self) -> usize {
        if self.group_size == 0 {
            return self.max_length;
        }
        match self.group_size.checked_add(1) {
            Some(stride) => self.max_length - self.max_length / stride,
            None => self.max_length,
        }
    }

    /// Returns true if `value` holds only digits and the separator.
    #[inline]
    pub fn is_well_formed(&self, value: &str) -> bool {
        value
            .chars()
            .all(|c| c.is_ascii_digit() || c == self.separator)
    }

    /// Returns true if `value` is well formed and has reached the maximum
    /// length.
    #[inline]
    pub fn is_complete(&self, value: &str) -> bool {
        self.is_well_formed(value) && value.chars().count() >= self.max_length
    }

    /// Formats the digits of `input` for display, without a trailing
    /// separator. Non-digit characters are ignored.
    ///
    /// ```
    /// use payfield::format::MaskSpec;
    ///
    /// assert_eq!(MaskSpec::CARD_NUMBER.format("4111-1111-1111-1111"), "4111 1111 1111 1111");
    /// assert_eq!(MaskSpec::EXPIRY.format("1225"), "12/25");
    /// ```
    pub fn format(&self, input: &str) -> String {
        let digits: Vec<char> = input.chars().filter(|c| c.is_ascii_digit()).collect();
        self.group(&digits, false)
    }

    /// Computes the value to display after an edit turned `previous` into
    /// `edited`.
    pub fn apply(&self, previous: &str, edited: &str) -> String {
        if previous == edited || !self.is_usable() {
            return edited.to_string();
        }

        if !self.is_well_formed(edited) {
            tracing::trace!(separator = ?self.separator, "left input with foreign characters unchanged");
            return edited.to_string();
        }

        let digits: Vec<char> = edited.chars().filter(|c| c.is_ascii_digit()).collect();

        if edited.chars().count() >= previous.chars().count() {
            return self.group(&digits, true);
        }

        let mut value = self.group(&digits, false);
        if edited.ends_with(self.separator) && self.ends_on_boundary(digits.len()) {
            self.push_trailing(&mut value);
        }

        if value == previous {
            // Only an interior separator went away and regrouping put it back.
            let edit_at = previous
                .chars()
                .zip(edited.chars())
                .take_while(|(a, b)| a == b)
                .count();
            let digits_before = previous
                .chars()
                .take(edit_at)
                .filter(|c| c.is_ascii_digit())
                .count();
            if digits_before > 0 {
                let mut digits = digits;
                digits.remove(digits_before - 1);
                value = self.group(&digits, false);
            }
        }

        value
    }

    fn is_usable(&self) -> bool {
        !self.separator.is_ascii_digit() && self.max_length > 0
    }

    fn separators_between(&self, digit_count: usize) -> usize {
        if self.group_size == 0 || digit_count == 0 {
            0
        } else {
            (digit_count - 1) / self.group_size
        }
    }

    fn ends_on_boundary(&self, digit_count: usize) -> bool {
        self.group_size > 0 && digit_count > 0 && digit_count % self.group_size == 0
    }

    fn push_trailing(&self, value: &mut String) {
        if value.chars().count() < self.max_length {
            value.push(self.separator);
        }
    }

    fn group(&self, digits: &[char], trailing: bool) -> String {
        let digits = &digits[..digits.len().min(self.digit_capacity())];

        let separators = self.separators_between(digits.len()) + usize::from(trailing);
        let mut result = String::with_capacity(digits.len() + separators * self.separator.len_utf8());
        for (i, &c) in digits.iter().enumerate() {
            if i > 0 && self.ends_on_boundary(i) {
                result.push(self.separator);
            }
            result.push(c);
        }

        if trailing && self.ends_on_boundary(digits.len()) {
            self.push_trailing(&mut result);
        }

        result
    }
}

/// Free-function form of [`MaskSpec::apply`].
///
/// A digit separator or a zero `max_length` leaves `edited` unchanged.
///
/// ```
/// use payfield::format::apply_mask;
///
/// assert_eq!(apply_mask("411", "4111", 4, ' ', 19), "4111 ");
/// assert_eq!(apply_mask("4111 1111 1111 1111", "4111 1111 1111 111", 4, ' ', 19), "4111 1111 1111 111");
/// ```
pub fn apply_mask(
    previous: &str,
    edited: &str,
    group_size: usize,
    separator: char,
    max_length: usize,
) -> String {
    MaskSpec {
        group_size,
        separator,
        max_length,
    }
    .apply(previous, edited)
}

/// Strips everything but ASCII digits.
///
/// ```
/// use payfield::format::strip_formatting;
///
/// assert_eq!(strip_formatting("4111 1111 1111 1111"), "4111111111111111");
/// assert_eq!(strip_formatting("12/25"), "1225");
/// ```
pub fn strip_formatting(input: &str) -> String {
    input.chars().filter(|c| c.is_ascii_digit()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Types `keys` one at a time, returning every displayed value.
    fn type_keys(spec: MaskSpec, start: &str, keys: &str) -> Vec<String> {
        let mut shown = start.to_string();
        let mut history = Vec::new();
        for key in keys.chars() {
            let mut edited = shown.clone();
            if key == '<' {
                edited.pop();
            } else {
                edited.push(key);
            }
            shown = spec.apply(&shown, &edited);
            history.push(shown.clone());
        }
        history
    }

    #[test]
    fn test_card_number_typing() {
        let history = type_keys(MaskSpec::CARD_NUMBER, "", "4111111111111111");
        assert_eq!(history[2], "411");
        assert_eq!(history[3], "4111 ");
        assert_eq!(history[4], "4111 1");
        assert_eq!(history[7], "4111 1111 ");
        assert_eq!(history.last().unwrap(), "4111 1111 1111 1111");
    }

    #[test]
    fn test_card_number_full_rejects_more() {
        let spec = MaskSpec::CARD_NUMBER;
        let full = "4111 1111 1111 1111";
        assert_eq!(spec.apply(full, "4111 1111 1111 11112"), full);
    }

    #[test]
    fn test_card_number_delete_last_digit() {
        let spec = MaskSpec::CARD_NUMBER;
        assert_eq!(
            spec.apply("4111 1111 1111 1111", "4111 1111 1111 111"),
            "4111 1111 1111 111"
        );
    }

    #[test]
    fn test_expiry_typing() {
        let history = type_keys(MaskSpec::EXPIRY, "", "1225");
        assert_eq!(history, vec!["1", "12/", "12/2", "12/25"]);
    }

    #[test]
    fn test_expiry_backspacing() {
        let history = type_keys(MaskSpec::EXPIRY, "12/25", "<<<<<");
        assert_eq!(history, vec!["12/2", "12/", "12", "1", ""]);
    }

    #[test]
    fn test_interior_separator_backspace_removes_digit() {
        let spec = MaskSpec::CARD_NUMBER;
        // Cursor right after the first space, backspace removes it
        assert_eq!(spec.apply("4111 1111", "41111111"), "4111 111");
    }

    #[test]
    fn test_interior_digit_delete_regroups() {
        let spec = MaskSpec::CARD_NUMBER;
        assert_eq!(spec.apply("4111 2222 3", "411 2222 3"), "4112 2223");
    }

    #[test]
    fn test_paste_is_regrouped_and_truncated() {
        let spec = MaskSpec::CARD_NUMBER;
        assert_eq!(
            spec.apply("", "41111111111111112222"),
            "4111 1111 1111 1111"
        );
        assert_eq!(MaskSpec::EXPIRY.apply("", "122599"), "12/25");
    }

    #[test]
    fn test_foreign_characters_unchanged() {
        let spec = MaskSpec::CARD_NUMBER;
        assert_eq!(spec.apply("4111", "4111a"), "4111a");
        assert_eq!(MaskSpec::EXPIRY.apply("12/", "12-"), "12-");
    }

    #[test]
    fn test_same_value_is_noop() {
        let spec = MaskSpec::EXPIRY;
        assert_eq!(spec.apply("12", "12"), "12");
        assert_eq!(spec.apply("12/", "12/"), "12/");
    }

    #[test]
    fn test_cvv_never_separates() {
        let history = type_keys(MaskSpec::CVV, "", "1234");
        assert_eq!(history, vec!["1", "12", "123", "123"]);
    }

    #[test]
    fn test_digit_capacity() {
        assert_eq!(MaskSpec::CARD_NUMBER.digit_capacity(), 16);
        assert_eq!(MaskSpec::EXPIRY.digit_capacity(), 4);
        assert_eq!(MaskSpec::CVV.digit_capacity(), 3);
        assert_eq!(MaskSpec::CARD_NUMBER.with_max_length(23).digit_capacity(), 19);
    }

    #[test]
    fn test_is_complete() {
        assert!(MaskSpec::CARD_NUMBER.is_complete("4111 1111 1111 1111"));
        assert!(!MaskSpec::CARD_NUMBER.is_complete("4111 1111 1111 111"));
        assert!(MaskSpec::EXPIRY.is_complete("12/25"));
    }

    #[test]
    fn test_foreign_characters_never_complete() {
        let spec = MaskSpec::CARD_NUMBER;
        assert!(!spec.is_well_formed("4111 1111 1111 111a"));
        assert!(!spec.is_complete("4111 1111 1111 111a"));
        assert!(!spec.is_complete("4111 1111 1111 111a1"));
        assert!(spec.is_well_formed("4111 "));
        assert!(!MaskSpec::EXPIRY.is_complete("12-25"));
    }

    #[test]
    fn test_digit_capacity_huge_max_length() {
        let spec = MaskSpec::CARD_NUMBER.with_max_length(200_000_000);
        assert_eq!(spec.digit_capacity(), 160_000_000);
        assert_eq!(MaskSpec::CARD_NUMBER.with_max_length(usize::MAX).digit_capacity(), usize::MAX - usize::MAX / 5);
        assert_eq!(MaskSpec::CVV.with_max_length(usize::MAX).digit_capacity(), usize::MAX);
        assert_eq!(MaskSpec::new(usize::MAX, ' ', usize::MAX).unwrap().digit_capacity(), usize::MAX);
    }

    #[test]
    fn test_huge_max_length_formats_like_any_other() {
        assert_eq!(apply_mask("", "1", 4, ' ', 200_000_000), "1");
        assert_eq!(apply_mask("123", "1234", 4, ' ', usize::MAX), "1234 ");
        assert_eq!(apply_mask("1234 ", "1234", 4, ' ', usize::MAX), "1234");
        assert!(!MaskSpec::CARD_NUMBER.with_max_length(usize::MAX).is_complete("1234 5678"));
    }

    #[test]
    fn test_format() {
        assert_eq!(MaskSpec::CARD_NUMBER.format("4111111111"), "4111 1111 11");
        assert_eq!(MaskSpec::CARD_NUMBER.format("4111"), "4111");
        assert_eq!(MaskSpec::CARD_NUMBER.format(""), "");
        assert_eq!(MaskSpec::EXPIRY.format("12/25"), "12/25");
    }

    #[test]
    fn test_new_rejects_bad_specs() {
        assert_eq!(
            MaskSpec::new(4, '1', 19).unwrap_err(),
            PayfieldError::InvalidSeparator { separator: '1' }
        );
        assert_eq!(
            MaskSpec::new(4, ' ', 0).unwrap_err(),
            PayfieldError::InvalidMaxLength
        );
        assert_eq!(MaskSpec::new(4, ' ', 19).unwrap(), MaskSpec::CARD_NUMBER);
    }

    #[test]
    fn test_apply_mask_with_digit_separator_is_unchanged() {
        assert_eq!(apply_mask("411", "4111", 4, '0', 19), "4111");
    }

    #[test]
    fn test_multibyte_separator() {
        let spec = MaskSpec::new(2, '·', 5).unwrap();
        assert_eq!(spec.apply("1", "12"), "12·");
        assert_eq!(spec.apply("12·2", "12·25"), "12·25");
    }
}
