// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Edit distance with an early-exit optimization.
//!
//! The key insight: `|len(a) - len(b)|` is a lower bound on edit distance.
//! If two strings differ in length by more than the threshold, skip the O(nm) DP.
//! Postings lookup compares the query term against every key in a map, so the
//! bounded check is what runs in practice; the full distance is only needed to
//! rank suggestions.
//!
//! # The threshold
//!
//! A query term of `n` characters tolerates `max(1, floor(n * 0.2))` edits:
//!
//! | term length | edits allowed |
//! |-------------|---------------|
//! | 1..=9       | 1             |
//! | 10..=14     | 2             |
//! | 15..=19     | 3             |
//!
//! The floor of 1 means even one- and two-character terms like "ml" or "ai"
//! accept a single edit.

/// Classic Levenshtein distance: unit-cost insertion, deletion, substitution.
///
/// Counts Unicode scalar values, not bytes.
pub fn edit_distance(a: &str, b: &str) -> usize {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();

    if a.is_empty() {
        return b.len();
    }
    if b.is_empty() {
        return a.len();
    }

    // Two-row DP
    let mut prev: Vec<usize> = (0..=b.len()).collect();
    let mut curr = vec![0; b.len() + 1];

    for (i, ac) in a.iter().enumerate() {
        curr[0] = i + 1;
        for (j, bc) in b.iter().enumerate() {
            let cost = usize::from(ac != bc);
            curr[j + 1] = (prev[j + 1] + 1) // deletion
                .min(curr[j] + 1) // insertion
                .min(prev[j] + cost); // substitution
        }
        std::mem::swap(&mut prev, &mut curr);
    }

    prev[b.len()]
}

/// Are these strings within `max` edits of each other?
///
/// Bounded Levenshtein with two early-exit paths:
/// 1. If length difference exceeds `max`, return false immediately
/// 2. If minimum row value exceeds `max`, abandon the DP early
///
/// Both are sound: `levenshtein_within(a, b, k) == (edit_distance(a, b) <= k)`.
pub fn levenshtein_within(a: &str, b: &str, max: usize) -> bool {
    // Use character counts, not byte lengths, for Unicode correctness
    let a_len = a.chars().count();
    let b_len = b.chars().count();

    // Early-exit: length difference is a lower bound on edit distance
    if a_len.abs_diff(b_len) > max {
        return false;
    }

    let mut dp: Vec<usize> = (0..=b_len).collect();
    for (i, ac) in a.chars().enumerate() {
        let mut prev = dp[0];
        dp[0] = i + 1;
        let mut min_row = dp[0];

        for (j, bc) in b.chars().enumerate() {
            let temp = dp[j + 1];
            let cost = usize::from(ac != bc);
            dp[j + 1] = (dp[j + 1] + 1).min(dp[j] + 1).min(prev + cost);
            prev = temp;
            if dp[j + 1] < min_row {
                min_row = dp[j + 1];
            }
        }

        // Early-exit: if minimum in this row exceeds max, no point continuing
        if min_row > max {
            return false;
        }
    }

    dp[b_len] <= max
}

/// Edits tolerated for a query term: `max(1, floor(chars * 0.2))`.
#[inline]
pub fn fuzzy_threshold(term: &str) -> usize {
    (term.chars().count() / 5).max(1)
}

/// Does `candidate` fuzzily match the query `term`?
///
/// The threshold comes from the query term, not the candidate, so the
/// relation is not symmetric.
#[inline]
pub fn is_fuzzy_match(term: &str, candidate: &str) -> bool {
    levenshtein_within(term, candidate, fuzzy_threshold(term))
}

/// Order candidates by edit distance to `query`, closest first, keeping at
/// most `limit`. Equal distances fall back to lexicographic order so the
/// output doesn't depend on how candidates were collected.
pub fn rank_by_distance<I, S>(query: &str, candidates: I, limit: usize) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    let mut scored: Vec<(usize, String)> = candidates
        .into_iter()
        .map(Into::into)
        .map(|c| (edit_distance(query, &c), c))
        .collect();
    scored.sort_by(|a, b| a.0.cmp(&b.0).then_with(|| a.1.cmp(&b.1)));
    scored.dedup_by(|a, b| a.1 == b.1);
    scored.into_iter().take(limit).map(|(_, c)| c).collect()
}
