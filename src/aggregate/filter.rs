// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Capsule pre-filter: drop capsules that can never match before scoring them.

use super::types::CapsuleFilters;
use crate::types::{Capsule, OrganizedNotes};

/// Does this capsule pass every supplied capsule-level filter?
///
/// String comparisons are case-insensitive. Empty lists behave like absent
/// filters. `date_range` is not checked here; the store already applied it.
pub fn capsule_matches(capsule: &Capsule, notes: &OrganizedNotes, filters: &CapsuleFilters) -> bool {
    let categorization = &notes.categorization;

    if let Some(ids) = non_empty(&filters.capsule_ids) {
        if !ids.iter().any(|id| *id == capsule.capsule_id) {
            return false;
        }
    }
    if let Some(wanted) = non_empty(&filters.categories) {
        if !overlaps(wanted, categorization.all_categories()) {
            return false;
        }
    }
    if let Some(levels) = non_empty(&filters.difficulty) {
        if !levels.contains(&notes.metadata.difficulty) {
            return false;
        }
    }
    if let Some(wanted) = non_empty(&filters.subjects) {
        if !overlaps(wanted, categorization.subjects.iter().map(String::as_str)) {
            return false;
        }
    }
    if let Some(wanted) = non_empty(&filters.tags) {
        let section_tags = notes
            .sections
            .iter()
            .flat_map(|s| s.section.tags.iter().map(String::as_str));
        let tags = categorization.tags.iter().map(String::as_str).chain(section_tags);
        if !overlaps(wanted, tags) {
            return false;
        }
    }
    if let Some(wanted) = filters.has_timestamp {
        let any = notes.sections.iter().any(|s| s.section.timestamp.is_some());
        if any != wanted {
            return false;
        }
    }
    true
}

fn non_empty<T>(list: &Option<Vec<T>>) -> Option<&[T]> {
    list.as_deref().filter(|l| !l.is_empty())
}

fn overlaps<'a>(wanted: &[String], mut values: impl Iterator<Item = &'a str>) -> bool {
    let wanted: Vec<String> = wanted.iter().map(|w| w.to_lowercase()).collect();
    values.any(|v| wanted.contains(&v.to_lowercase()))
}
