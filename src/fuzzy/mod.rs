// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Fuzzy matching: typo tolerance via edit distance.
//!
//! Both search paths go through here. Postings lookup asks "is this indexed
//! term close enough to the query term?", suggestion ranking asks "how far is
//! this candidate from what the user typed?". One distance function answers
//! both.

mod levenshtein;

pub use levenshtein::*;
