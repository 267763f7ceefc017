//! # payfield
//!
//! Logic core of a single-input credit card widget: detects the card vendor
//! from the number prefix, formats the field in place as the user types, and
//! tells the page when to reveal the expiration and security code fields.
//!
//! ## Features
//!
//! - Vendor detection from an ordered table of prefix patterns
//! - In-place masking with separators for card number and expiry fields
//! - Explicit per-field state with completion events
//! - Icon class and auxiliary field visibility for the host page
//! - Multiple interfaces: library, CLI, WASM
//!
//! ## Quick Start
//!
//! ```rust
//! use payfield::{match_vendor, apply_mask, VendorTable};
//!
//! let table = VendorTable::standard();
//! assert_eq!(match_vendor("4111", table), "visa");
//! assert_eq!(match_vendor("", table), "none");
//!
//! // Typing the fourth digit adds a separator
//! assert_eq!(apply_mask("411", "4111", 4, ' ', 19), "4111 ");
//!
//! // Backspacing over an expiry date
//! assert_eq!(apply_mask("12/25", "12/2", 2, '/', 5), "12/2");
//! ```
//!
//! ## Driving a Widget
//!
//! ```rust
//! use payfield::{FieldKind, PayForm};
//!
//! let mut form = PayForm::standard();
//! let update = form.input(FieldKind::CardNumber, "5500000000000004");
//! assert_eq!(update.value, "5500 0000 0000 0004");
//! assert_eq!(update.icon_class, "payfield-icon type-mastercard");
//! assert!(update.auxiliary_visible);
//! ```
//!
//! ## Default Vendors
//!
//! | Vendor | Pattern |
//! |--------|---------|
//! | visa | `^4` |
//! | mastercard | `^5[1-5]` |
//! | amex | `^3[47]` |
//! | discover | `^6011` |
//!
//! ## Feature Flags
//!
//! | Feature | Description |
//! |---------|-------------|
//! | `config-json` | JSON configuration loader |
//! | `cli` | Command-line tool |
//! | `wasm` | WebAssembly bindings |
//!
//! ## Security
//!
//! - Field digits are zeroized when a state is dropped
//! - `Debug` output and log lines show redacted numbers only
//! - No unsafe code (`#![deny(unsafe_code)]`)

#![warn(missing_docs)]
#![warn(clippy::all)]
#![deny(unsafe_code)]

pub mod config;
pub mod error;
pub mod field;
pub mod form;
pub mod format;
pub mod redact;
pub mod vendor;

#[cfg(feature = "wasm")]
mod wasm;

// Re-export main types at crate root
pub use config::{PayfieldConfig, VendorPattern};
pub use error::PayfieldError;
pub use field::{FieldEvent, FieldState, FieldStatus, InputOutcome};
pub use form::{FieldKind, FieldRegistry, FormUpdate, PayForm};
pub use format::{apply_mask, MaskSpec};
pub use vendor::{match_vendor, VendorRule, VendorTable, NO_VENDOR};

#[cfg(test)]
mod tests {
    use super::*;

    const VISA: &str = "4111111111111111";
    const MASTERCARD: &str = "5500000000000004";
    const AMEX: &str = "378282246310005";
    const DISCOVER: &str = "6011111111111117";

    #[test]
    fn test_default_vendors() {
        let table = VendorTable::standard();
        assert_eq!(match_vendor(VISA, table), "visa");
        assert_eq!(match_vendor(MASTERCARD, table), "mastercard");
        assert_eq!(match_vendor(AMEX, table), "amex");
        assert_eq!(match_vendor(DISCOVER, table), "discover");
        assert_eq!(match_vendor("3530111333300000", table), NO_VENDOR);
    }

    #[test]
    fn test_card_number_roundtrip() {
        let mut form = PayForm::standard();
        let update = form.input(FieldKind::CardNumber, VISA);
        assert_eq!(update.value, "4111 1111 1111 1111");

        let update = form.input(FieldKind::CardNumber, "4111 1111 1111 111");
        assert_eq!(update.value, "4111 1111 1111 111");
        assert!(update.events.contains(&FieldEvent::Reopened));
    }

    #[test]
    fn test_amex_stays_partial() {
        // Fifteen digits never reach the nineteen-character card field
        let mut form = PayForm::standard();
        let update = form.input(FieldKind::CardNumber, AMEX);
        assert_eq!(update.value, "3782 8224 6310 005");
        assert_eq!(update.status, FieldStatus::Partial);
        assert!(!update.auxiliary_visible);
    }

    #[test]
    fn test_thread_safety() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<VendorTable>();
        assert_send_sync::<PayForm>();
        assert_send_sync::<PayfieldError>();
        assert_send_sync::<FieldRegistry<u64>>();
    }
}
