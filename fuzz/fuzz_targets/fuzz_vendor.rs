//! Fuzz target for vendor matching and field state.
//!
//! Tests that matching never panics and the field vendor never drifts.

#![no_main]

use libfuzzer_sys::fuzz_target;
use payfield::{match_vendor, FieldState, MaskSpec, VendorTable};

fuzz_target!(|data: &str| {
    let table = VendorTable::standard();
    let _ = match_vendor(data, table);

    let state = FieldState::from_value(data, &MaskSpec::CARD_NUMBER, Some(table));
    assert_eq!(state.vendor(), match_vendor(state.digits(), table));

    let outcome = state.apply_input(data, &MaskSpec::CARD_NUMBER, Some(table));
    assert_eq!(
        outcome.state.vendor(),
        match_vendor(outcome.state.digits(), table)
    );
});
