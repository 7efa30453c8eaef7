// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Facet counts and query suggestions for the indexed engine.

use crate::fuzzy::rank_by_distance;
use crate::index::{NotesIndex, Postings};
use crate::types::Facets;
use std::collections::{BTreeMap, HashSet};

/// Count filtered sections per tag, category and section type.
///
/// Counts cover the whole filtered set, not just the truncated page. Keys with
/// a zero count are left out.
pub fn compute_facets(index: &NotesIndex, filtered: &HashSet<&str>) -> Facets {
    Facets {
        tags: count(index.tags(), filtered),
        categories: count(index.categories(), filtered),
        section_types: count(index.section_types(), filtered),
    }
}

fn count(postings: &Postings, filtered: &HashSet<&str>) -> BTreeMap<String, usize> {
    postings
        .iter()
        .filter_map(|(key, ids)| {
            let n = ids.iter().filter(|id| filtered.contains(id.as_str())).count();
            (n > 0).then(|| (key.clone(), n))
        })
        .collect()
}

/// Index vocabulary (keywords, phrases, tags) containing the query, closest
/// first by edit distance. The query itself is never suggested.
pub fn suggest(index: &NotesIndex, query: &str, limit: usize) -> Vec<String> {
    let query = query.trim().to_lowercase();
    if query.is_empty() {
        return Vec::new();
    }
    let candidates = index
        .keywords()
        .keys()
        .chain(index.phrases().keys())
        .chain(index.tags().keys())
        .filter(|key| key.as_str() != query && key.contains(&query))
        .map(String::as_str);
    rank_by_distance(&query, candidates, limit)
}
