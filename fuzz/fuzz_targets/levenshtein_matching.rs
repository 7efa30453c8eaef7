// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Fuzz target for the bounded edit-distance check.
//!
//! The early-exit check must agree with the full distance for every bound,
//! and the distance must stay symmetric.

#![no_main]

use arbitrary::Arbitrary;
use capsule_search::{edit_distance, is_fuzzy_match, levenshtein_within};
use libfuzzer_sys::fuzz_target;

#[derive(Debug, Arbitrary)]
struct MatchInput {
    query: String,
    target: String,
    max: u8,
}

fuzz_target!(|input: MatchInput| {
    // Cap lengths to avoid timeouts
    let query: String = input.query.chars().take(50).collect();
    let target: String = input.target.chars().take(100).collect();
    let max = (input.max % 8) as usize;

    let distance = edit_distance(&query, &target);
    assert_eq!(distance, edit_distance(&target, &query));
    assert_eq!(
        levenshtein_within(&query, &target, max),
        distance <= max,
        "bound {} disagrees with distance {} for {:?} / {:?}",
        max,
        distance,
        query,
        target
    );

    let q_len = query.chars().count();
    let t_len = target.chars().count();
    assert!(distance >= q_len.abs_diff(t_len));
    assert!(distance <= q_len.max(t_len));

    // Never panics, whatever the input
    let _ = is_fuzzy_match(&query, &target);
});
