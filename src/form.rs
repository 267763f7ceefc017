//! A complete payment widget: card number, expiration date and security code.
//!
//! [`PayForm`] runs every keystroke through the formatter and the field state
//! machine, and turns the results into what the page needs to render: the
//! vendor icon class and whether the auxiliary fields are shown. The page
//! keeps one form per widget element; [`FieldRegistry`] does that
//! bookkeeping for hosts that address elements by an identifier.
//!
//! # Example
//!
//! ```
//! use payfield::form::{FieldKind, PayForm};
//!
//! let mut form = PayForm::standard();
//! assert_eq!(form.icon_class(), "payfield-icon type-credit");
//!
//! let update = form.input(FieldKind::CardNumber, "4");
//! assert_eq!(update.icon_class, "payfield-icon type-visa");
//! assert!(!update.auxiliary_visible);
//!
//! let update = form.input(FieldKind::CardNumber, "4111111111111111");
//! assert_eq!(update.value, "4111 1111 1111 1111");
//! assert!(update.auxiliary_visible);
//! ```

use crate::config::PayfieldConfig;
use crate::error::PayfieldError;
use crate::field::{FieldEvent, FieldState, FieldStatus};
use crate::format::MaskSpec;
use crate::vendor::{VendorTable, NO_VENDOR};
use std::collections::HashMap;
use std::fmt;
use std::hash::Hash;
use std::str::FromStr;

/// The inputs of one widget.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldKind {
    /// The primary card number input.
    CardNumber,
    /// Expiration date, revealed once the card number is complete.
    Expiry,
    /// Security code, revealed once the card number is complete.
    Cvv,
}

impl FieldKind {
    /// All kinds, in tab order.
    pub const ALL: [FieldKind; 3] = [Self::CardNumber, Self::Expiry, Self::Cvv];

    /// Short name used by the CLI and the WASM bindings.
    pub const fn name(&self) -> &'static str {
        match self {
            Self::CardNumber => "card",
            Self::Expiry => "expiry",
            Self::Cvv => "cvv",
        }
    }

    /// Returns true for the fields hidden until the card number completes.
    pub const fn is_auxiliary(&self) -> bool {
        !matches!(self, Self::CardNumber)
    }
}

impl fmt::Display for FieldKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl FromStr for FieldKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "card" | "card-number" | "number" => Ok(Self::CardNumber),
            "expiry" | "expiration" | "exp" => Ok(Self::Expiry),
            "cvv" | "cvc" | "cid" => Ok(Self::Cvv),
            _ => Err(format!("unknown field: {}", s)),
        }
    }
}

/// What the page should render after one keystroke.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormUpdate {
    /// The field that was edited.
    pub kind: FieldKind,
    /// Value to write back into the element.
    pub value: String,
    /// Status of the edited field.
    pub status: FieldStatus,
    /// Events raised by the edit.
    pub events: Vec<FieldEvent>,
    /// Vendor detected from the card number, or `"none"`.
    pub vendor: String,
    /// Class list for the vendor icon.
    pub icon_class: String,
    /// Whether the expiry and security code fields should be shown.
    pub auxiliary_visible: bool,
    /// New security code when a vendor change rewrote it.
    pub cvv_value: Option<String>,
}

/// State of one widget.
#[derive(Debug, Clone)]
pub struct PayForm {
    config: PayfieldConfig,
    vendors: VendorTable,
    card_number: FieldState,
    expiry: FieldState,
    cvv: FieldState,
    card_touched: bool,
    auxiliary_visible: bool,
}

impl PayForm {
    /// Creates a form from configuration.
    ///
    /// # Errors
    ///
    /// Fails if the configuration does not validate.
    pub fn new(config: PayfieldConfig) -> Result<Self, PayfieldError> {
        let vendors = config.validate()?;
        Ok(Self::with_table(config, vendors))
    }

    /// Creates a form with the stock configuration.
    pub fn standard() -> Self {
        Self::with_table(PayfieldConfig::default(), VendorTable::standard().clone())
    }

    fn with_table(config: PayfieldConfig, vendors: VendorTable) -> Self {
        Self {
            config,
            vendors,
            card_number: FieldState::new(),
            expiry: FieldState::new(),
            cvv: FieldState::new(),
            card_touched: false,
            auxiliary_visible: false,
        }
    }

    /// The configuration this form was built from.
    pub fn config(&self) -> &PayfieldConfig {
        &self.config
    }

    /// Current state of one field.
    pub fn field(&self, kind: FieldKind) -> &FieldState {
        match kind {
            FieldKind::CardNumber => &self.card_number,
            FieldKind::Expiry => &self.expiry,
            FieldKind::Cvv => &self.cvv,
        }
    }

    fn field_mut(&mut self, kind: FieldKind) -> &mut FieldState {
        match kind {
            FieldKind::CardNumber => &mut self.card_number,
            FieldKind::Expiry => &mut self.expiry,
            FieldKind::Cvv => &mut self.cvv,
        }
    }

    /// Geometry of one field. The security code length follows the vendor.
    pub fn spec_for(&self, kind: FieldKind) -> MaskSpec {
        match kind {
            FieldKind::CardNumber => self.config.card_number,
            FieldKind::Expiry => self.config.expiry,
            FieldKind::Cvv => self.config.cvv_spec_for(self.vendor()),
        }
    }

    /// Vendor detected from the card number, or `"none"`.
    pub fn vendor(&self) -> &str {
        self.card_number.vendor()
    }

    /// Whether the expiry and security code fields are shown.
    pub fn auxiliary_visible(&self) -> bool {
        self.auxiliary_visible
    }

    /// Returns true once all three fields are complete.
    pub fn is_complete(&self) -> bool {
        FieldKind::ALL.iter().all(|&kind| self.field(kind).is_complete())
    }

    /// Class list for the vendor icon.
    ///
    /// Before the card number is first edited the icon shows the generic
    /// card; afterwards it carries `type-<vendor>` when a vendor matched.
    pub fn icon_class(&self) -> String {
        let base = self.config.icon_class();
        if !self.card_touched {
            return format!("{} type-credit", base);
        }
        match self.vendor() {
            NO_VENDOR => base,
            vendor => format!("{} type-{}", base, vendor),
        }
    }

    /// Feeds the value an element holds after a keystroke.
    pub fn input(&mut self, kind: FieldKind, edited: &str) -> FormUpdate {
        let spec = self.spec_for(kind);
        let vendors = (kind == FieldKind::CardNumber).then_some(&self.vendors);
        let outcome = self.field(kind).apply_input(edited, &spec, vendors);

        if kind == FieldKind::CardNumber {
            self.card_touched = true;
            if outcome.completed() {
                tracing::debug!(vendor = outcome.state.vendor(), "revealing auxiliary fields");
                self.auxiliary_visible = true;
            } else if outcome.reopened() {
                tracing::debug!("hiding auxiliary fields");
                self.auxiliary_visible = false;
            }
        }

        let status = outcome.state.status();
        let value = outcome.state.value().to_string();
        *self.field_mut(kind) = outcome.state;

        let cvv_value = if kind == FieldKind::CardNumber {
            self.refit_cvv()
        } else {
            None
        };

        FormUpdate {
            kind,
            value,
            status,
            events: outcome.events,
            vendor: self.vendor().to_string(),
            icon_class: self.icon_class(),
            auxiliary_visible: self.auxiliary_visible,
            cvv_value,
        }
    }

    /// Clears every field and hides the auxiliary fields.
    pub fn reset(&mut self) {
        for kind in FieldKind::ALL {
            *self.field_mut(kind) = FieldState::new();
        }
        self.card_touched = false;
        self.auxiliary_visible = false;
    }

    /// Re-formats the security code when a vendor change altered its length.
    /// Returns the new value if it changed.
    fn refit_cvv(&mut self) -> Option<String> {
        let spec = self.spec_for(FieldKind::Cvv);
        if self.cvv.status() == FieldStatus::of(self.cvv.value(), &spec)
            && self.cvv.value() == spec.format(self.cvv.value())
        {
            return None;
        }
        let refit = FieldState::from_value(self.cvv.digits(), &spec, None);
        let changed = refit.value() != self.cvv.value();
        self.cvv = refit;
        changed.then(|| {
            tracing::debug!(vendor = self.vendor(), "security code refit to vendor");
            self.cvv.value().to_string()
        })
    }
}

impl Default for PayForm {
    fn default() -> Self {
        Self::standard()
    }
}

/// Forms keyed by element identity.
///
/// A widget attaches to an element at most once; attaching again keeps the
/// existing state. Detaching drops it.
#[derive(Debug)]
pub struct FieldRegistry<K> {
    config: PayfieldConfig,
    vendors: VendorTable,
    forms: HashMap<K, PayForm>,
}

impl<K: Eq + Hash> FieldRegistry<K> {
    /// Creates a registry whose forms share one configuration.
    pub fn new(config: PayfieldConfig) -> Result<Self, PayfieldError> {
        let vendors = config.validate()?;
        Ok(Self {
            config,
            vendors,
            forms: HashMap::new(),
        })
    }

    /// Attaches a form to `key`. Returns false if one was already attached.
    pub fn attach(&mut self, key: K) -> bool {
        if self.forms.contains_key(&key) {
            return false;
        }
        let form = PayForm::with_table(self.config.clone(), self.vendors.clone());
        self.forms.insert(key, form);
        true
    }

    /// Removes the form attached to `key`.
    pub fn detach(&mut self, key: &K) -> Option<PayForm> {
        self.forms.remove(key)
    }

    /// The form attached to `key`.
    pub fn get(&self, key: &K) -> Option<&PayForm> {
        self.forms.get(key)
    }

    /// Routes a keystroke to the form attached to `key`.
    pub fn input(&mut self, key: &K, kind: FieldKind, edited: &str) -> Option<FormUpdate> {
        self.forms.get_mut(key).map(|form| form.input(kind, edited))
    }

    /// Number of attached forms.
    pub fn len(&self) -> usize {
        self.forms.len()
    }

    /// Returns true if nothing is attached.
    pub fn is_empty(&self) -> bool {
        self.forms.is_empty()
    }
}

impl<K: Eq + Hash> Default for FieldRegistry<K> {
    fn default() -> Self {
        Self {
            config: PayfieldConfig::default(),
            vendors: VendorTable::standard().clone(),
            forms: HashMap::new(),
        }
    }
}
