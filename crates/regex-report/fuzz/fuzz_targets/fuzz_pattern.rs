//! Fuzz target for PrefixPattern.
//!
//! Checks that compiling arbitrary registry patterns and matching arbitrary
//! identifiers never panics, and that a full match is never looser than the
//! pattern itself.

#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use regex_report::PrefixPattern;

#[derive(Debug, Arbitrary)]
struct Input<'a> {
    pattern: &'a str,
    identifier: &'a str,
}

fuzz_target!(|input: Input<'_>| {
    let Ok(pattern) = PrefixPattern::new(input.pattern) else {
        return;
    };

    let full = pattern.is_full_match(input.identifier);
    if full {
        if let Ok(unanchored) = regex::Regex::new(input.pattern) {
            assert!(unanchored.is_match(input.identifier));
        }
    }
    let _ = pattern.to_string();
});
