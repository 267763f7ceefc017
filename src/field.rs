//! Per-field state and the keystroke state machine.
//!
//! A [`FieldState`] is a value: every keystroke produces a new state from the
//! old one through [`FieldState::apply_input`], and the host keeps whichever
//! state belongs to which element. The vendor is recomputed from the digits
//! each time a state is produced, so it cannot drift from them.
//!
//! ```text
//! EMPTY --first character--> PARTIAL --reaches max length--> COMPLETE
//!   ^                          |  ^                              |
//!   +------- cleared ----------+  +---- deletion below max ------+
//! ```
//!
//! # Example
//!
//! ```
//! use payfield::field::{FieldEvent, FieldState, FieldStatus};
//! use payfield::format::MaskSpec;
//! use payfield::vendor::VendorTable;
//!
//! let spec = MaskSpec::CARD_NUMBER;
//! let vendors = Some(VendorTable::standard());
//!
//! let outcome = FieldState::new().apply_input("4", &spec, vendors);
//! assert_eq!(outcome.state.vendor(), "visa");
//! assert_eq!(outcome.state.status(), FieldStatus::Partial);
//!
//! let outcome = FieldState::new().apply_input("4111111111111111", &spec, vendors);
//! assert_eq!(outcome.state.value(), "4111 1111 1111 1111");
//! assert!(outcome.events.contains(&FieldEvent::Completed));
//! ```

use crate::format::{strip_formatting, MaskSpec};
use crate::redact::redact_digits;
use crate::vendor::{VendorTable, NO_VENDOR};
use std::fmt;
use zeroize::Zeroize;

/// Where a field is in its fill cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum FieldStatus {
    /// Nothing typed.
    #[default]
    Empty,
    /// Some characters, below the maximum length.
    Partial,
    /// Maximum length reached with nothing but digits and the separator.
    Complete,
}

impl FieldStatus {
    /// Classifies a formatted value against its spec.
    pub fn of(value: &str, spec: &MaskSpec) -> Self {
        if value.is_empty() {
            Self::Empty
        } else if spec.is_complete(value) {
            Self::Complete
        } else {
            Self::Partial
        }
    }
}

/// Something the host should react to after a keystroke.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldEvent {
    /// The field just reached its maximum length.
    Completed,
    /// The field was complete and an edit took it below the maximum length.
    Reopened,
    /// The detected vendor changed. Names are [`NO_VENDOR`] when unmatched.
    VendorChanged {
        /// Vendor before the keystroke.
        from: String,
        /// Vendor after the keystroke.
        to: String,
    },
}

/// The result of feeding one edit to a field.
#[derive(Debug, Clone)]
pub struct InputOutcome {
    /// The state to keep for the next keystroke.
    pub state: FieldState,
    /// Events raised by this edit, in the order they happened.
    pub events: Vec<FieldEvent>,
}

impl InputOutcome {
    /// Returns true if this edit completed the field.
    pub fn completed(&self) -> bool {
        self.events.contains(&FieldEvent::Completed)
    }

    /// Returns true if this edit reopened a complete field.
    pub fn reopened(&self) -> bool {
        self.events.contains(&FieldEvent::Reopened)
    }
}

/// State of one input element.
///
/// Digits are zeroed on drop and `Debug` shows them redacted.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct FieldState {
    value: String,
    digits: String,
    status: FieldStatus,
    vendor: Option<String>,
}

impl FieldState {
    /// Creates an empty field.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates the state for an element that already holds `value`, such as
    /// a field the browser autofilled before the widget attached.
    pub fn from_value(value: &str, spec: &MaskSpec, vendors: Option<&VendorTable>) -> Self {
        Self::build(spec.format(value), spec, vendors)
    }

    fn build(value: String, spec: &MaskSpec, vendors: Option<&VendorTable>) -> Self {
        let digits = strip_formatting(&value);
        let vendor = vendors.and_then(|table| table.detect(&digits).map(|rule| rule.name().to_string()));
        let status = FieldStatus::of(&value, spec);
        Self {
            value,
            digits,
            status,
            vendor,
        }
    }

    /// The formatted value to display.
    #[inline]
    pub fn value(&self) -> &str {
        &self.value
    }

    /// The digits of the value without separators.
    #[inline]
    pub fn digits(&self) -> &str {
        &self.digits
    }

    /// Current status.
    #[inline]
    pub fn status(&self) -> FieldStatus {
        self.status
    }

    /// Returns true if the field has reached its maximum length.
    #[inline]
    pub fn is_complete(&self) -> bool {
        self.status == FieldStatus::Complete
    }

    /// The matched vendor name, or [`NO_VENDOR`].
    #[inline]
    pub fn vendor(&self) -> &str {
        self.vendor.as_deref().unwrap_or(NO_VENDOR)
    }

    /// Feeds the value the element holds after a keystroke.
    ///
    /// `vendors` is only passed for fields whose digits identify a vendor,
    /// i.e. the card number.
    pub fn apply_input(
        &self,
        edited: &str,
        spec: &MaskSpec,
        vendors: Option<&VendorTable>,
    ) -> InputOutcome {
        let value = spec.apply(&self.value, edited);
        let state = Self::build(value, spec, vendors);

        let mut events = Vec::new();

        if state.vendor != self.vendor {
            tracing::trace!(from = self.vendor(), to = state.vendor(), "vendor changed");
            events.push(FieldEvent::VendorChanged {
                from: self.vendor().to_string(),
                to: state.vendor().to_string(),
            });
        }

        match (self.status, state.status) {
            (FieldStatus::Complete, FieldStatus::Complete) => {}
            (_, FieldStatus::Complete) => {
                tracing::debug!(digits = %redact_digits(&state.digits), "field completed");
                events.push(FieldEvent::Completed);
            }
            (FieldStatus::Complete, _) => {
                tracing::debug!(digits = %redact_digits(&state.digits), "field reopened");
                events.push(FieldEvent::Reopened);
            }
            _ => {}
        }

        InputOutcome { state, events }
    }
}

impl fmt::Debug for FieldState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FieldState")
            .field("digits", &redact_digits(&self.digits))
            .field("status", &self.status)
            .field("vendor", &self.vendor())
            .finish()
    }
}

impl Drop for FieldState {
    fn drop(&mut self) {
        self.value.zeroize();
        self.digits.zeroize();
    }
}
