// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Facets, aggregations and suggestions for cross-capsule results.
//!
//! Facets and aggregations are computed over whatever result list they are
//! handed. The aggregator hands them the page it returns, so counts describe
//! that page and understate totals once more capsules matched than fit on it.

use super::types::{Aggregations, CapsuleFacets, EnhancedSearchResult, FacetCount};
use crate::fuzzy::{is_fuzzy_match, rank_by_distance};
use crate::types::OrganizedNotes;
use std::collections::BTreeMap;

fn bump(counts: &mut BTreeMap<String, usize>, key: &str) {
    *counts.entry(key.to_string()).or_insert(0) += 1;
}

/// Per-capsule counts for category, tags, difficulty and subjects; per-section
/// counts for section type.
pub fn compute_facets(results: &[EnhancedSearchResult]) -> CapsuleFacets {
    let mut facets = CapsuleFacets::default();
    for result in results {
        let meta = &result.metadata;
        if !meta.category.is_empty() {
            bump(&mut facets.categories, &meta.category);
        }
        for tag in &meta.tags {
            bump(&mut facets.tags, tag);
        }
        bump(&mut facets.difficulties, meta.difficulty.as_str());
        for subject in &meta.subjects {
            bump(&mut facets.subjects, subject);
        }
        for hit in &result.sections {
            bump(&mut facets.section_types, hit.section.section.section_type.as_str());
        }
    }
    facets
}

/// Highest counts first, ties by value, at most `limit`.
fn top_n(counts: &BTreeMap<String, usize>, limit: usize) -> Vec<FacetCount> {
    let mut top: Vec<FacetCount> = counts
        .iter()
        .map(|(value, count)| FacetCount {
            value: value.clone(),
            count: *count,
        })
        .collect();
    // BTreeMap iteration is already value-ordered, so a stable sort on count
    // leaves ties alphabetical.
    top.sort_by(|a, b| b.count.cmp(&a.count));
    top.truncate(limit);
    top
}

pub fn compute_aggregations(results: &[EnhancedSearchResult], top_values: usize) -> Aggregations {
    let facets = compute_facets(results);
    let total_capsules = results.len();
    let total_sections = results.iter().map(|r| r.sections.len()).sum();
    let average_relevance = if total_capsules == 0 {
        0.0
    } else {
        results.iter().map(|r| r.total_relevance_score).sum::<f64>() / total_capsules as f64
    };

    Aggregations {
        total_capsules,
        total_sections,
        average_relevance,
        top_categories: top_n(&facets.categories, top_values),
        top_tags: top_n(&facets.tags, top_values),
        difficulty_distribution: facets.difficulties,
    }
}

/// Entity lists whose items are worth suggesting. Dates and quantities are not.
pub const SUGGESTED_ENTITY_TYPES: &[&str] = &[
    "PERSON",
    "ORGANIZATION",
    "LOCATION",
    "EVENT",
    "TITLE",
    "COMMERCIAL_ITEM",
    "OTHER",
];

/// Suggestion candidates from one capsule: its extracted keywords and the
/// items of [`SUGGESTED_ENTITY_TYPES`] lists that contain the query or are
/// within its fuzzy threshold, excluding the query itself.
pub fn suggestion_candidates(notes: &OrganizedNotes, query: &str) -> Vec<String> {
    let query = query.trim().to_lowercase();
    if query.is_empty() {
        return Vec::new();
    }
    let categorization = &notes.categorization;
    let entity_items = SUGGESTED_ENTITY_TYPES
        .iter()
        .flat_map(|kind| categorization.entities_of(kind));
    notes
        .search_index
        .keywords
        .iter()
        .chain(entity_items)
        .map(|term| term.trim().to_lowercase())
        .filter(|term| {
            !term.is_empty()
                && *term != query
                && (term.contains(&query) || is_fuzzy_match(&query, term))
        })
        .collect()
}

/// Global suggestions: every capsule's candidates ranked by edit distance.
pub fn rank_suggestions<I>(query: &str, candidates: I, limit: usize) -> Vec<String>
where
    I: IntoIterator<Item = String>,
{
    rank_by_distance(&query.trim().to_lowercase(), candidates, limit)
}
