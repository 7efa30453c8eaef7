// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Indexed query engine: keyword, phrase and full-text search over a
//! `NotesIndex`.
//!
//! Scoring is additive evidence, in this order:
//!
//! 1. **Keywords**: each query term looks up its keyword postings (plus every
//!    key within the fuzzy threshold when `fuzzy` is on). Each section in the
//!    union gets +1 per term.
//! 2. **Phrase**: multi-term queries look up the joined terms in the phrase
//!    postings, same fuzzy fallback. Each hit gets +2.
//! 3. **Full text**: the escaped query is matched against every section's
//!    full text. Each occurrence gets +1 and, with `include_context`, a
//!    `TextMatch` carrying a context window.
//!
//! Filters then narrow the scored set, results are ranked stably by score and
//! truncated. Facets count the filtered set before truncation; suggestions
//! come from the index vocabulary.

mod facets;
mod filter;

pub use facets::{compute_facets, suggest};
pub use filter::apply_filters;

use crate::config::SearchConfig;
use crate::error::{Result, SearchError};
use crate::fuzzy::is_fuzzy_match;
use crate::index::{NotesIndex, Postings};
use crate::scoring::ranking::sort_by_score;
use crate::scoring::{ScoreBoard, FULL_TEXT_MATCH_SCORE, KEYWORD_MATCH_SCORE, PHRASE_MATCH_SCORE};
use crate::snippet::context_window;
use crate::types::{NoteSection, SearchOptions, SearchQuery, SearchResponse, SearchResult, TextMatch};
use crate::utils::{byte_to_char_index, normalize};
use regex::{Regex, RegexBuilder};
use std::collections::{BTreeSet, HashMap, HashSet};
use std::time::Instant;

/// Search `sections` through their prebuilt `index` with default settings.
///
/// `index` must have been built from exactly these sections.
pub fn search(
    query: &SearchQuery,
    index: &NotesIndex,
    sections: &[NoteSection],
) -> Result<SearchResponse> {
    search_with_config(query, index, sections, &SearchConfig::default())
}

pub fn search_with_config(
    query: &SearchQuery,
    index: &NotesIndex,
    sections: &[NoteSection],
    config: &SearchConfig,
) -> Result<SearchResponse> {
    let started = Instant::now();
    let raw = config.validate_query(&query.query)?;
    ensure_index_covers(index, sections)?;

    let options = &query.options;
    let normalized = normalize(raw, options.case_sensitive);
    let terms: Vec<&str> = normalized.split_whitespace().collect();

    let mut board = ScoreBoard::new();

    for term in &terms {
        board.add_all(lookup(index.keywords(), term, options.fuzzy), KEYWORD_MATCH_SCORE);
    }

    if terms.len() > 1 {
        let phrase = terms.join(" ");
        board.add_all(lookup(index.phrases(), &phrase, options.fuzzy), PHRASE_MATCH_SCORE);
    }

    let pattern = full_text_pattern(&normalized, options)?;
    let mut matches: HashMap<&str, Vec<TextMatch>> = HashMap::new();
    for section in sections {
        let Some(text) = index.full_text(&section.id) else {
            continue;
        };
        for found in pattern.find_iter(text) {
            board.add(&section.id, FULL_TEXT_MATCH_SCORE);
            if options.include_context {
                let position = byte_to_char_index(text, found.start());
                let length = found.as_str().chars().count();
                matches.entry(section.id.as_str()).or_default().push(TextMatch {
                    text: found.as_str().to_string(),
                    position,
                    length,
                    context: context_window(text, position, length, config.context_radius),
                });
            }
        }
    }

    let candidates: HashSet<&str> = board.matched().collect();
    let filtered = apply_filters(candidates, &query.filters, index);

    let mut results: Vec<SearchResult> = sections
        .iter()
        .filter(|s| filtered.contains(s.id.as_str()))
        .map(|s| SearchResult {
            section_id: s.id.clone(),
            title: s.title.clone(),
            content: s.content.clone(),
            section_type: s.section_type,
            score: board.get(&s.id),
            matches: matches.remove(s.id.as_str()).unwrap_or_default(),
            highlights: s.highlights.clone(),
            tags: s.tags.clone(),
            timestamp: s.timestamp,
        })
        .collect();
    sort_by_score(&mut results, |r| r.score);

    let total_results = results.len();
    results.truncate(options.max_results);

    let facets = compute_facets(index, &filtered);
    let suggestions = suggest(index, raw, config.suggestion_limit);
    let search_time_ms = started.elapsed().as_millis() as u64;

    log::debug!(
        "search '{}': {} terms, {} scored, {} after filters, {} returned in {}ms",
        raw,
        terms.len(),
        board.matched().count(),
        total_results,
        results.len(),
        search_time_ms
    );

    Ok(SearchResponse {
        query: raw.to_string(),
        results,
        total_results,
        facets,
        suggestions,
        search_time_ms,
    })
}

/// Section ids under `key`, plus (with `fuzzy`) under every key within the
/// fuzzy threshold of it.
fn lookup<'a>(postings: &'a Postings, key: &str, fuzzy: bool) -> BTreeSet<&'a String> {
    if !fuzzy {
        return postings.get(key).into_iter().flatten().collect();
    }
    postings
        .iter()
        .filter(|(candidate, _)| is_fuzzy_match(key, candidate))
        .flat_map(|(_, ids)| ids)
        .collect()
}

fn full_text_pattern(normalized: &str, options: &SearchOptions) -> Result<Regex> {
    let escaped = regex::escape(normalized);
    let pattern = if options.whole_words {
        format!(r"\b{}\b", escaped)
    } else {
        escaped
    };
    RegexBuilder::new(&pattern)
        .case_insensitive(!options.case_sensitive)
        .build()
        .map_err(|e| SearchError::InvalidQuery(e.to_string()))
}

/// The index must describe exactly the sections being searched.
fn ensure_index_covers(index: &NotesIndex, sections: &[NoteSection]) -> Result<()> {
    if index.is_empty() && !sections.is_empty() {
        return Err(SearchError::IndexUnavailable(
            "index has not been built for these sections".to_string(),
        ));
    }
    if let Some(missing) = sections.iter().find(|s| !index.contains_section(&s.id)) {
        return Err(SearchError::IndexUnavailable(format!(
            "section '{}' is not in the index; rebuild it",
            missing.id
        )));
    }
    let mut distinct: HashSet<&str> = HashSet::with_capacity(sections.len());
    if let Some(duplicate) = sections.iter().find(|s| !distinct.insert(s.id.as_str())) {
        return Err(SearchError::IndexUnavailable(format!(
            "section '{}' is supplied more than once",
            duplicate.id
        )));
    }
    if distinct.len() != index.len() {
        return Err(SearchError::IndexUnavailable(format!(
            "index covers {} sections but {} were supplied; rebuild it",
            index.len(),
            distinct.len()
        )));
    }
    Ok(())
}
