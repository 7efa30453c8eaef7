// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Result ranking: how search results get sorted.
//!
//! Every sort here is stable. Equal keys keep the order in which results were
//! produced (input section order, store capsule order), which is what makes
//! repeated searches return identical lists even when scoring ran in parallel.

use crate::aggregate::{EnhancedSearchResult, SortBy};
use std::cmp::Ordering;

/// Higher score first. NaN never appears in practice, but `total_cmp` keeps
/// the order total anyway.
#[inline]
pub fn compare_scores(a: f64, b: f64) -> Ordering {
    b.total_cmp(&a)
}

/// Stable sort, score descending.
pub fn sort_by_score<T, F>(items: &mut [T], score: F)
where
    F: Fn(&T) -> f64,
{
    items.sort_by(|a, b| compare_scores(score(a), score(b)));
}

/// Compare two capsules for the requested ordering.
///
/// | `SortBy`     | Key                                 | Direction |
/// |--------------|-------------------------------------|-----------|
/// | `Relevance`  | `total_relevance_score`             | desc      |
/// | `Date`       | `metadata.created_at`               | desc      |
/// | `Title`      | `video_title`                       | asc       |
/// | `Importance` | sum of matched sections' importance | desc      |
pub fn compare_capsules(
    a: &EnhancedSearchResult,
    b: &EnhancedSearchResult,
    sort_by: SortBy,
) -> Ordering {
    match sort_by {
        SortBy::Relevance => compare_scores(a.total_relevance_score, b.total_relevance_score),
        SortBy::Date => b.metadata.created_at.cmp(&a.metadata.created_at),
        SortBy::Title => a.video_title.cmp(&b.video_title),
        SortBy::Importance => compare_scores(a.total_importance(), b.total_importance()),
    }
}
