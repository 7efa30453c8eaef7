// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Filter application for the indexed engine.
//!
//! Filters intersect progressively: each present filter narrows the set left
//! by the previous one. Values inside one list are OR'ed, separate filters are
//! AND'ed. An empty list behaves like an absent filter.

use crate::index::{NotesIndex, Postings};
use crate::types::SearchFilters;
use std::collections::HashSet;

pub fn apply_filters<'a>(
    mut candidates: HashSet<&'a str>,
    filters: &SearchFilters,
    index: &NotesIndex,
) -> HashSet<&'a str> {
    if let Some(tags) = non_empty(&filters.tags) {
        retain_posted(&mut candidates, index.tags(), tags.iter().map(|t| t.to_lowercase()));
    }
    if let Some(categories) = non_empty(&filters.categories) {
        retain_posted(
            &mut candidates,
            index.categories(),
            categories.iter().map(|c| c.to_lowercase()),
        );
    }
    if let Some(types) = non_empty(&filters.section_types) {
        retain_posted(
            &mut candidates,
            index.section_types(),
            types.iter().map(|t| t.as_str().to_string()),
        );
    }
    if let Some(wanted) = filters.has_timestamp {
        candidates.retain(|id| {
            index
                .metadata(id)
                .is_some_and(|m| m.timestamp.is_some() == wanted)
        });
    }
    if let Some(wanted) = filters.has_highlights {
        candidates.retain(|id| {
            index
                .metadata(id)
                .is_some_and(|m| !m.highlights.is_empty() == wanted)
        });
    }
    if filters.date_range.is_some() {
        // Sections carry no dates of their own; the range only applies across
        // capsules.
        log::debug!("dateRange ignored by the single-capsule engine");
    }
    candidates
}

fn non_empty<T>(list: &Option<Vec<T>>) -> Option<&[T]> {
    list.as_deref().filter(|l| !l.is_empty())
}

/// Keep candidates posted under at least one of `keys`.
fn retain_posted<I>(candidates: &mut HashSet<&str>, postings: &Postings, keys: I)
where
    I: Iterator<Item = String>,
{
    let allowed: HashSet<&str> = keys
        .filter_map(|key| postings.get(&key))
        .flatten()
        .map(String::as_str)
        .collect();
    candidates.retain(|id| allowed.contains(id));
}
