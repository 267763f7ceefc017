//! Fuzz target for the masked input formatter.
//!
//! Tests that formatting never panics and stays within the field.

#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use payfield::{format::apply_mask, MaskSpec};

#[derive(Debug, Arbitrary)]
struct Edit<'a> {
    previous: &'a str,
    edited: &'a str,
    group_size: u8,
    separator: char,
    max_length: u8,
}

fuzz_target!(|edit: Edit<'_>| {
    // Never panics, whatever the parameters
    let _ = apply_mask(
        edit.previous,
        edit.edited,
        edit.group_size as usize,
        edit.separator,
        edit.max_length as usize,
    );

    for spec in [MaskSpec::CARD_NUMBER, MaskSpec::EXPIRY, MaskSpec::CVV] {
        let out = spec.apply(edit.previous, edit.edited);
        assert_eq!(spec.apply(&out, &out), out, "Re-applying must not change output");

        let well_formed = out
            .chars()
            .all(|c| c.is_ascii_digit() || c == spec.separator());
        if well_formed && edit.previous != edit.edited {
            assert!(
                out.chars().count() <= spec.max_length(),
                "Formatted value must fit the field"
            );
        }
    }
});
