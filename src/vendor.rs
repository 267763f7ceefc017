//! Card vendor detection using ordered prefix patterns.
//!
//! A [`VendorTable`] is an ordered list of [`VendorRule`]s. Each rule pairs a
//! vendor name with a regular expression that is matched against the leading
//! digits of a card number. The first rule that matches wins, so the order of
//! the table is part of its meaning: a rule added later with a colliding
//! prefix never shadows an earlier one.
//!
//! # Example
//!
//! ```
//! use payfield::vendor::{match_vendor, VendorTable, NO_VENDOR};
//!
//! let table = VendorTable::standard();
//! assert_eq!(match_vendor("4111", table), "visa");
//! assert_eq!(match_vendor("378282246310005", table), "amex");
//! assert_eq!(match_vendor("9999", table), NO_VENDOR);
//! ```

use crate::error::PayfieldError;
use once_cell::sync::Lazy;
use regex::Regex;
use std::fmt;

/// Name returned when no rule matches.
pub const NO_VENDOR: &str = "none";

/// Default rules, in match order.
pub const DEFAULT_RULES: [(&str, &str); 4] = [
    ("visa", "^4"),
    ("mastercard", "^5[1-5]"),
    ("amex", "^3[47]"),
    ("discover", "^6011"),
];

static STANDARD_TABLE: Lazy<VendorTable> = Lazy::new(|| {
    VendorTable::from_pairs(DEFAULT_RULES).expect("default vendor rules are valid")
});

/// A named prefix pattern.
///
/// The pattern is anchored to the start of the input when compiled, so
/// `"4"` and `"^4"` behave the same.
#[derive(Clone)]
pub struct VendorRule {
    name: String,
    source: String,
    pattern: Regex,
}

impl VendorRule {
    /// Compiles a rule.
    ///
    /// # Errors
    ///
    /// Fails if the name is empty or reserved, or if the pattern is not a
    /// valid regular expression.
    pub fn new(name: impl Into<String>, pattern: &str) -> Result<Self, PayfieldError> {
        let name = name.into();
        if name.is_empty() {
            return Err(PayfieldError::EmptyVendorName);
        }
        if name == NO_VENDOR {
            return Err(PayfieldError::ReservedVendorName);
        }

        let anchored = format!("^(?:{})", pattern);
        let compiled = Regex::new(&anchored).map_err(|e| PayfieldError::InvalidPattern {
            vendor: name.clone(),
            pattern: pattern.to_string(),
            reason: e.to_string(),
        })?;

        Ok(Self {
            name,
            source: pattern.to_string(),
            pattern: compiled,
        })
    }

    /// Returns the vendor name.
    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the pattern as it was supplied.
    #[inline]
    pub fn pattern(&self) -> &str {
        &self.source
    }

    /// Returns true if the pattern matches a prefix of `digits`.
    #[inline]
    pub fn matches(&self, digits: &str) -> bool {
        self.pattern.is_match(digits)
    }
}

impl fmt::Debug for VendorRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("VendorRule")
            .field("name", &self.name)
            .field("pattern", &self.source)
            .finish()
    }
}

/// An ordered sequence of vendor rules. First match wins.
#[derive(Debug, Clone, Default)]
pub struct VendorTable {
    rules: Vec<VendorRule>,
}

impl VendorTable {
    /// Builds a table from already-compiled rules.
    ///
    /// # Errors
    ///
    /// Fails if two rules share a name.
    pub fn new(rules: Vec<VendorRule>) -> Result<Self, PayfieldError> {
        for (i, rule) in rules.iter().enumerate() {
            if rules[..i].iter().any(|r| r.name == rule.name) {
                return Err(PayfieldError::DuplicateVendor {
                    name: rule.name.clone(),
                });
            }
        }
        Ok(Self { rules })
    }

    /// Builds a table from `(name, pattern)` pairs, keeping their order.
    pub fn from_pairs<I, N, P>(pairs: I) -> Result<Self, PayfieldError>
    where
        I: IntoIterator<Item = (N, P)>,
        N: Into<String>,
        P: AsRef<str>,
    {
        let rules = pairs
            .into_iter()
            .map(|(name, pattern)| VendorRule::new(name, pattern.as_ref()))
            .collect::<Result<Vec<_>, _>>()?;
        Self::new(rules)
    }

    /// Returns the shared default table: visa, mastercard, amex, discover.
    pub fn standard() -> &'static VendorTable {
        &STANDARD_TABLE
    }

    /// Returns the first rule matching `digits`, if any.
    ///
    /// The empty string never matches.
    pub fn detect(&self, digits: &str) -> Option<&VendorRule> {
        if digits.is_empty() {
            return None;
        }
        self.rules.iter().find(|rule| rule.matches(digits))
    }

    /// Returns the rules in match order.
    pub fn rules(&self) -> &[VendorRule] {
        &self.rules
    }

    /// Returns the number of rules.
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    /// Returns true if the table has no rules.
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

/// Returns the name of the first vendor whose pattern matches a prefix of
/// `digits`, or [`NO_VENDOR`].
///
/// # Example
///
/// ```
/// use payfield::vendor::{match_vendor, VendorTable};
///
/// let table = VendorTable::standard();
/// assert_eq!(match_vendor("5500", table), "mastercard");
/// assert_eq!(match_vendor("6011", table), "discover");
/// assert_eq!(match_vendor("", table), "none");
/// ```
#[inline]
pub fn match_vendor<'a>(digits: &str, rules: &'a VendorTable) -> &'a str {
    rules.detect(digits).map_or(NO_VENDOR, VendorRule::name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_visa_detection() {
        let table = VendorTable::standard();
        assert_eq!(match_vendor("4", table), "visa");
        assert_eq!(match_vendor("4111111111111111", table), "visa");
        assert_eq!(match_vendor("4222222222222", table), "visa");
    }

    #[test]
    fn test_mastercard_detection() {
        let table = VendorTable::standard();
        for prefix in ["51", "52", "53", "54", "55"] {
            assert_eq!(match_vendor(prefix, table), "mastercard");
        }
        assert_eq!(match_vendor("5500000000000004", table), "mastercard");
        assert_eq!(match_vendor("50", table), NO_VENDOR);
        assert_eq!(match_vendor("56", table), NO_VENDOR);
        // A single 5 is not enough to decide
        assert_eq!(match_vendor("5", table), NO_VENDOR);
    }

    #[test]
    fn test_amex_detection() {
        let table = VendorTable::standard();
        assert_eq!(match_vendor("34", table), "amex");
        assert_eq!(match_vendor("378282246310005", table), "amex");
        assert_eq!(match_vendor("35", table), NO_VENDOR);
    }

    #[test]
    fn test_discover_detection() {
        let table = VendorTable::standard();
        assert_eq!(match_vendor("6011", table), "discover");
        assert_eq!(match_vendor("6011111111111117", table), "discover");
        assert_eq!(match_vendor("601", table), NO_VENDOR);
        assert_eq!(match_vendor("6012", table), NO_VENDOR);
    }

    #[test]
    fn test_empty_input() {
        assert_eq!(match_vendor("", VendorTable::standard()), NO_VENDOR);

        // Even a pattern that accepts the empty string does not match it
        let table = VendorTable::from_pairs([("anything", ".*")]).unwrap();
        assert_eq!(match_vendor("", &table), NO_VENDOR);
        assert_eq!(match_vendor("1", &table), "anything");
    }

    #[test]
    fn test_first_match_wins() {
        let table =
            VendorTable::from_pairs([("visa", "4"), ("visa-electron", "4026")]).unwrap();
        assert_eq!(match_vendor("4026", &table), "visa");

        let table =
            VendorTable::from_pairs([("visa-electron", "4026"), ("visa", "4")]).unwrap();
        assert_eq!(match_vendor("4026", &table), "visa-electron");
        assert_eq!(match_vendor("4111", &table), "visa");
    }

    #[test]
    fn test_patterns_are_prefix_anchored() {
        let table = VendorTable::from_pairs([("discover", "6011")]).unwrap();
        assert_eq!(match_vendor("16011", &table), NO_VENDOR);
        assert_eq!(match_vendor("60110", &table), "discover");
    }

    #[test]
    fn test_invalid_pattern() {
        let err = VendorRule::new("broken", "5[1-").unwrap_err();
        match err {
            PayfieldError::InvalidPattern {
                vendor, pattern, ..
            } => {
                assert_eq!(vendor, "broken");
                assert_eq!(pattern, "5[1-");
            }
            _ => panic!("Expected InvalidPattern"),
        }
    }

    #[test]
    fn test_rejected_names() {
        assert_eq!(
            VendorRule::new("", "4").unwrap_err(),
            PayfieldError::EmptyVendorName
        );
        assert_eq!(
            VendorRule::new(NO_VENDOR, "4").unwrap_err(),
            PayfieldError::ReservedVendorName
        );
    }

    #[test]
    fn test_duplicate_names() {
        let err = VendorTable::from_pairs([("visa", "4"), ("visa", "5")]).unwrap_err();
        assert_eq!(
            err,
            PayfieldError::DuplicateVendor {
                name: "visa".into()
            }
        );
    }

    #[test]
    fn test_standard_table_order() {
        let names: Vec<&str> = VendorTable::standard()
            .rules()
            .iter()
            .map(VendorRule::name)
            .collect();
        assert_eq!(names, vec!["visa", "mastercard", "amex", "discover"]);
    }

    #[test]
    fn test_empty_table() {
        let table = VendorTable::default();
        assert!(table.is_empty());
        assert_eq!(match_vendor("4111", &table), NO_VENDOR);
    }
}
