//! Error types for building vendor tables, mask specs and configuration.
//!
//! The formatter and matcher themselves never fail. Errors only surface when
//! a caller supplies configuration that cannot be used.

use std::fmt;

/// Errors that can occur while building a payfield configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PayfieldError {
    /// A vendor pattern failed to compile as a regular expression.
    InvalidPattern {
        /// The vendor the pattern belongs to.
        vendor: String,
        /// The pattern as supplied.
        pattern: String,
        /// The compiler's description of the problem.
        reason: String,
    },

    /// A vendor rule was given an empty name.
    EmptyVendorName,

    /// A vendor rule used the name reserved for "no match".
    ReservedVendorName,

    /// Two rules in one table share a name.
    DuplicateVendor {
        /// The repeated name.
        name: String,
    },

    /// The group separator is a digit and could not be told apart from input.
    InvalidSeparator {
        /// The rejected separator.
        separator: char,
    },

    /// The maximum field length is zero.
    InvalidMaxLength,

    /// The configuration document could not be parsed.
    Config(String),
}

impl fmt::Display for PayfieldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidPattern {
                vendor,
                pattern,
                reason,
            } => {
                write!(
                    f,
                    "invalid pattern '{}' for vendor '{}': {}",
                    pattern.escape_default(),
                    vendor,
                    reason
                )
            }

            Self::EmptyVendorName => write!(f, "vendor name is empty"),

            Self::ReservedVendorName => {
                write!(
                    f,
                    "vendor name '{}' is reserved for unmatched numbers",
                    crate::vendor::NO_VENDOR
                )
            }

            Self::DuplicateVendor { name } => {
                write!(f, "vendor '{}' appears more than once in the table", name)
            }

            Self::InvalidSeparator { separator } => {
                write!(
                    f,
                    "separator '{}' is a digit (separators must not be digits)",
                    separator.escape_default()
                )
            }

            Self::InvalidMaxLength => write!(f, "maximum field length must be at least 1"),

            Self::Config(message) => write!(f, "invalid configuration: {}", message),
        }
    }
}

impl std::error::Error for PayfieldError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        assert_eq!(
            PayfieldError::EmptyVendorName.to_string(),
            "vendor name is empty"
        );

        assert_eq!(
            PayfieldError::ReservedVendorName.to_string(),
            "vendor name 'none' is reserved for unmatched numbers"
        );

        assert_eq!(
            PayfieldError::DuplicateVendor {
                name: "visa".into()
            }
            .to_string(),
            "vendor 'visa' appears more than once in the table"
        );

        assert_eq!(
            PayfieldError::InvalidSeparator { separator: '7' }.to_string(),
            "separator '7' is a digit (separators must not be digits)"
        );
    }

    #[test]
    fn test_invalid_pattern_display() {
        let err = PayfieldError::InvalidPattern {
            vendor: "visa".into(),
            pattern: "4(".into(),
            reason: "unclosed group".into(),
        };
        assert_eq!(
            err.to_string(),
            "invalid pattern '4(' for vendor 'visa': unclosed group"
        );
    }

    #[test]
    fn test_error_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<PayfieldError>();
    }
}
