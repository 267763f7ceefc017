//! Widget configuration.
//!
//! Defaults reproduce the stock widget: the `payfield` class prefix, the
//! visa/mastercard/amex/discover table and the standard field geometry.
//! Per-widget options replace defaults field by field.
//!
//! With the `config-json` feature a configuration can be read from a
//! partial JSON document:
//!
//! ```
//! # #[cfg(feature = "config-json")]
//! # {
//! use payfield::config::PayfieldConfig;
//!
//! let config = PayfieldConfig::from_json(r#"{ "class_prefix": "checkout" }"#).unwrap();
//! assert_eq!(config.class_prefix, "checkout");
//! assert_eq!(config.vendors.len(), 4);
//! # }
//! ```

use crate::error::PayfieldError;
use crate::format::MaskSpec;
use crate::vendor::{VendorTable, DEFAULT_RULES};

/// A vendor rule as written in configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "config-json", derive(serde::Serialize, serde::Deserialize))]
pub struct VendorPattern {
    /// Vendor name, used in the icon class (`type-<name>`).
    pub name: String,
    /// Prefix regular expression.
    pub pattern: String,
}

impl VendorPattern {
    /// Creates a pattern entry.
    pub fn new(name: impl Into<String>, pattern: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            pattern: pattern.into(),
        }
    }
}

/// Configuration for one widget.
///
/// Completion is a length check against `card_number.max_length`. A
/// 15-digit amex number formats to 18 characters and never completes the
/// default 19-character field, so the auxiliary fields are not revealed for
/// amex, the only default entry of `long_cvv_vendors`. Hosts accepting amex
/// either show the security code themselves or shorten `card_number` for
/// that vendor.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(
    feature = "config-json",
    derive(serde::Serialize, serde::Deserialize),
    serde(default, deny_unknown_fields)
)]
pub struct PayfieldConfig {
    /// Prefix of every CSS class the widget emits.
    pub class_prefix: String,
    /// Vendor rules in match order.
    pub vendors: Vec<VendorPattern>,
    /// Card number field geometry.
    pub card_number: MaskSpec,
    /// Expiration date field geometry.
    pub expiry: MaskSpec,
    /// Security code field geometry.
    pub cvv: MaskSpec,
    /// Security code geometry for the vendors in `long_cvv_vendors`.
    pub long_cvv: MaskSpec,
    /// Vendors printing a four-digit security code. See the note above on
    /// when the card number completes for them.
    pub long_cvv_vendors: Vec<String>,
}

impl Default for PayfieldConfig {
    fn default() -> Self {
        Self {
            class_prefix: "payfield".to_string(),
            vendors: DEFAULT_RULES
                .iter()
                .map(|&(name, pattern)| VendorPattern::new(name, pattern))
                .collect(),
            card_number: MaskSpec::CARD_NUMBER,
            expiry: MaskSpec::EXPIRY,
            cvv: MaskSpec::CVV,
            long_cvv: MaskSpec::CVV.with_max_length(4),
            long_cvv_vendors: vec!["amex".to_string()],
        }
    }
}

impl PayfieldConfig {
    /// Replaces the vendor table, keeping everything else.
    pub fn with_vendors(mut self, vendors: Vec<VendorPattern>) -> Self {
        self.vendors = vendors;
        self
    }

    /// Compiles the vendor rules.
    ///
    /// # Errors
    ///
    /// Fails on an invalid pattern, an empty or reserved name, or a
    /// duplicate name.
    pub fn vendor_table(&self) -> Result<VendorTable, PayfieldError> {
        VendorTable::from_pairs(
            self.vendors
                .iter()
                .map(|v| (v.name.as_str(), v.pattern.as_str())),
        )
    }

    /// Checks every field spec and compiles the vendor table.
    pub fn validate(&self) -> Result<VendorTable, PayfieldError> {
        for spec in [&self.card_number, &self.expiry, &self.cvv, &self.long_cvv] {
            MaskSpec::new(spec.group_size(), spec.separator(), spec.max_length())?;
        }
        self.vendor_table()
    }

    /// Security code geometry for a vendor name.
    pub fn cvv_spec_for(&self, vendor: &str) -> MaskSpec {
        if self.long_cvv_vendors.iter().any(|v| v == vendor) {
            self.long_cvv
        } else {
            self.cvv
        }
    }

    /// Class of the wrapping container.
    pub fn container_class(&self) -> String {
        format!("{}-container", self.class_prefix)
    }

    /// Class added to the card number input.
    pub fn input_class(&self) -> String {
        format!("{}-input", self.class_prefix)
    }

    /// Base class of the vendor icon.
    pub fn icon_class(&self) -> String {
        format!("{}-icon", self.class_prefix)
    }

    /// Parses a JSON document. Absent fields keep their defaults.
    ///
    /// # Errors
    ///
    /// Fails if the document is malformed or describes an unusable
    /// configuration.
    #[cfg(feature = "config-json")]
    pub fn from_json(json: &str) -> Result<Self, PayfieldError> {
        let config: Self =
            serde_json::from_str(json).map_err(|e| PayfieldError::Config(e.to_string()))?;
        let table = config.validate()?;
        tracing::debug!(
            class_prefix = %config.class_prefix,
            vendors = table.len(),
            "loaded payfield configuration"
        );
        Ok(config)
    }

    /// Reads and parses a JSON configuration file.
    #[cfg(feature = "config-json")]
    pub fn from_json_file(path: impl AsRef<std::path::Path>) -> Result<Self, PayfieldError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)
            .map_err(|e| PayfieldError::Config(format!("{}: {}", path.display(), e)))?;
        Self::from_json(&json)
    }
}
