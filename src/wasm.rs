//! WebAssembly bindings for the browser widget.
//!
//! The page creates one `PayField` per widget element and forwards every
//! `input` event to it, writing the returned value back into the element.
//!
//! # Usage from JavaScript
//!
//! ```javascript
//! import init, { PayField } from 'payfield';
//!
//! await init();
//!
//! const field = new PayField();
//! input.addEventListener('input', () => {
//!     const update = field.input('card', input.value);
//!     input.value = update.value;
//!     icon.className = update.icon_class;
//!     extras.hidden = !update.auxiliary_visible;
//!     if (update.cvv_value !== undefined) {
//!         cvvInput.value = update.cvv_value;
//!     }
//!     if (update.completed) {
//!         expiryInput.focus();
//!     }
//! });
//! ```

#![cfg(feature = "wasm")]

use crate::form::{FieldKind, FormUpdate, PayForm};
use crate::{FieldEvent, FieldStatus, PayfieldConfig};
use wasm_bindgen::prelude::*;

/// Result of one keystroke, returned to JavaScript.
#[wasm_bindgen]
pub struct InputResult {
    value: String,
    vendor: String,
    icon_class: String,
    status: String,
    completed: bool,
    reopened: bool,
    auxiliary_visible: bool,
    cvv_value: Option<String>,
}

#[wasm_bindgen]
impl InputResult {
    #[wasm_bindgen(getter)]
    pub fn value(&self) -> String {
        self.value.clone()
    }

    #[wasm_bindgen(getter)]
    pub fn vendor(&self) -> String {
        self.vendor.clone()
    }

    #[wasm_bindgen(getter)]
    pub fn icon_class(&self) -> String {
        self.icon_class.clone()
    }

    #[wasm_bindgen(getter)]
    pub fn status(&self) -> String {
        self.status.clone()
    }

    #[wasm_bindgen(getter)]
    pub fn completed(&self) -> bool {
        self.completed
    }

    #[wasm_bindgen(getter)]
    pub fn reopened(&self) -> bool {
        self.reopened
    }

    #[wasm_bindgen(getter)]
    pub fn auxiliary_visible(&self) -> bool {
        self.auxiliary_visible
    }

    /// Security code rewritten by a vendor change, `undefined` otherwise.
    #[wasm_bindgen(getter)]
    pub fn cvv_value(&self) -> Option<String> {
        self.cvv_value.clone()
    }
}

impl From<FormUpdate> for InputResult {
    fn from(update: FormUpdate) -> Self {
        let status = match update.status {
            FieldStatus::Empty => "empty",
            FieldStatus::Partial => "partial",
            FieldStatus::Complete => "complete",
        };
        Self {
            completed: update.events.contains(&FieldEvent::Completed),
            reopened: update.events.contains(&FieldEvent::Reopened),
            status: status.to_string(),
            value: update.value,
            vendor: update.vendor,
            icon_class: update.icon_class,
            auxiliary_visible: update.auxiliary_visible,
            cvv_value: update.cvv_value,
        }
    }
}

/// One widget instance.
#[wasm_bindgen]
pub struct PayField {
    form: PayForm,
}

#[wasm_bindgen]
impl PayField {
    /// Creates a widget with the stock configuration.
    #[wasm_bindgen(constructor)]
    pub fn new() -> PayField {
        PayField {
            form: PayForm::standard(),
        }
    }

    /// Creates a widget from a JSON configuration document.
    pub fn with_config(json: &str) -> Result<PayField, JsValue> {
        let config =
            PayfieldConfig::from_json(json).map_err(|e| JsValue::from_str(&e.to_string()))?;
        let form = PayForm::new(config).map_err(|e| JsValue::from_str(&e.to_string()))?;
        Ok(PayField { form })
    }

    /// Feeds the value of an element after an input event.
    ///
    /// `field` is one of `card`, `expiry` or `cvv`.
    pub fn input(&mut self, field: &str, value: &str) -> Result<InputResult, JsValue> {
        let kind: FieldKind = field.parse().map_err(|e: String| JsValue::from_str(&e))?;
        Ok(self.form.input(kind, value).into())
    }

    /// Current icon class list.
    #[wasm_bindgen(getter)]
    pub fn icon_class(&self) -> String {
        self.form.icon_class()
    }

    /// Whether the expiry and security code fields are shown.
    #[wasm_bindgen(getter)]
    pub fn auxiliary_visible(&self) -> bool {
        self.form.auxiliary_visible()
    }

    /// Class names for wrapping the input: `[container, input, icon]`.
    pub fn class_names(&self) -> js_sys::Array {
        let config = self.form.config();
        [
            config.container_class(),
            config.input_class(),
            config.icon_class(),
        ]
        .iter()
        .map(|name| JsValue::from_str(name))
        .collect()
    }

    /// Clears every field.
    pub fn reset(&mut self) {
        self.form.reset();
    }
}

impl Default for PayField {
    fn default() -> Self {
        Self::new()
    }
}

/// Detects the vendor of a (partial) card number with the stock table.
///
/// # Example
/// ```javascript
/// match_vendor("4111")  // "visa"
/// ```
#[wasm_bindgen]
pub fn match_vendor(card_number: &str) -> String {
    let digits = crate::format::strip_formatting(card_number);
    crate::match_vendor(&digits, crate::VendorTable::standard()).to_string()
}

/// Formats one edit. See `MaskSpec::apply`.
#[wasm_bindgen]
pub fn apply_mask(
    previous: &str,
    edited: &str,
    group_size: usize,
    separator: char,
    max_length: usize,
) -> String {
    crate::format::apply_mask(previous, edited, group_size, separator, max_length)
}
