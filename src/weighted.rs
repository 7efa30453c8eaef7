// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Field-weighted scorer: index-free search over one capsule's organized notes.
//!
//! Each section is scored directly from its structure, O(sections) per query,
//! with no indexing pass. The aggregator runs this once per capsule.
//!
//! For the lowercased query `q`:
//!
//! | Signal                             | Points            |
//! |------------------------------------|-------------------|
//! | title contains `q`                 | +10               |
//! | each key point containing `q`      | +5                |
//! | each concept containing `q`        | +3                |
//! | each tag containing `q`            | +3                |
//! | content contains `q`               | +1                |
//! | per query word (> 2 chars)         | +2 per title occurrence, +0.5 per content occurrence |
//!
//! Content signals only count with `include_content`.

use crate::fuzzy::is_fuzzy_match;
use crate::scoring::ranking::sort_by_score;
use crate::scoring::{
    MatchSignal, CONCEPT_MATCH_SCORE, CONTENT_MATCH_SCORE, CONTENT_TERM_SCORE,
    KEY_POINT_MATCH_SCORE, MIN_TERM_CHARS, TAG_MATCH_SCORE, TITLE_MATCH_SCORE, TITLE_TERM_SCORE,
};
use crate::types::{OrganizedNotes, OrganizedSection};
use crate::utils::{clean_token, count_occurrences, parse_query};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// How query words are matched for the per-word bonus.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SearchType {
    /// Substring occurrences of each query word.
    #[default]
    Keyword,
    /// Whole-query signals only; no per-word bonus.
    Exact,
    /// Substring occurrences plus tokens within the fuzzy threshold.
    Fuzzy,
}

impl SearchType {
    pub fn as_str(self) -> &'static str {
        match self {
            SearchType::Keyword => "keyword",
            SearchType::Exact => "exact",
            SearchType::Fuzzy => "fuzzy",
        }
    }
}

impl fmt::Display for SearchType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SearchType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "keyword" => Ok(SearchType::Keyword),
            "exact" => Ok(SearchType::Exact),
            "fuzzy" => Ok(SearchType::Fuzzy),
            other => Err(format!("unknown search type '{}'", other)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WeightedOptions {
    pub search_type: SearchType,
    pub max_results: usize,
    pub include_content: bool,
}

impl Default for WeightedOptions {
    fn default() -> Self {
        Self {
            search_type: SearchType::Keyword,
            max_results: 20,
            include_content: true,
        }
    }
}

/// A section that scored, with the signal kinds that fired.
#[derive(Debug, Clone, PartialEq)]
pub struct ScoredSection<'a> {
    pub section: &'a OrganizedSection,
    pub relevance_score: f64,
    pub matched_terms: Vec<MatchSignal>,
}

/// Score every section of `notes` against `query`.
///
/// Zero-score sections are dropped; the rest come back score-descending
/// (ties in section order), at most `max_results` of them.
pub fn score_sections<'a>(
    notes: &'a OrganizedNotes,
    query: &str,
    options: &WeightedOptions,
) -> Vec<ScoredSection<'a>> {
    let q = query.trim().to_lowercase();
    if q.is_empty() {
        return Vec::new();
    }
    let words: Vec<String> = parse_query(&q, false)
        .into_iter()
        .filter(|w| w.chars().count() > MIN_TERM_CHARS)
        .collect();

    let mut scored: Vec<ScoredSection<'a>> = notes
        .sections
        .iter()
        .filter_map(|section| {
            let (relevance_score, matched_terms) = score_one(section, &q, &words, options);
            (relevance_score > 0.0).then_some(ScoredSection {
                section,
                relevance_score,
                matched_terms,
            })
        })
        .collect();

    sort_by_score(&mut scored, |s| s.relevance_score);
    scored.truncate(options.max_results);
    scored
}

fn score_one(
    organized: &OrganizedSection,
    q: &str,
    words: &[String],
    options: &WeightedOptions,
) -> (f64, Vec<MatchSignal>) {
    let section = &organized.section;
    let title = section.title.to_lowercase();
    let content = options.include_content.then(|| section.content.to_lowercase());

    let mut score = 0.0;
    let mut signals = Vec::new();

    if title.contains(q) {
        score += TITLE_MATCH_SCORE;
        fire(MatchSignal::Title, &mut signals);
    }
    for _ in organized.key_points.iter().filter(|p| p.to_lowercase().contains(q)) {
        score += KEY_POINT_MATCH_SCORE;
        fire(MatchSignal::KeyPoint, &mut signals);
    }
    for _ in organized.concepts.iter().filter(|c| c.to_lowercase().contains(q)) {
        score += CONCEPT_MATCH_SCORE;
        fire(MatchSignal::Concept, &mut signals);
    }
    for _ in section.tags.iter().filter(|t| t.to_lowercase().contains(q)) {
        score += TAG_MATCH_SCORE;
        fire(MatchSignal::Tag, &mut signals);
    }
    if let Some(content) = &content {
        if content.contains(q) {
            score += CONTENT_MATCH_SCORE;
            fire(MatchSignal::Content, &mut signals);
        }
    }

    if options.search_type != SearchType::Exact {
        let fuzzy = options.search_type == SearchType::Fuzzy;
        for word in words {
            let in_title = occurrences(&title, word, fuzzy);
            if in_title > 0 {
                score += TITLE_TERM_SCORE * in_title as f64;
                fire(MatchSignal::Title, &mut signals);
            }
            if let Some(content) = &content {
                let in_content = occurrences(content, word, fuzzy);
                if in_content > 0 {
                    score += CONTENT_TERM_SCORE * in_content as f64;
                    fire(MatchSignal::Content, &mut signals);
                }
            }
        }
    }

    (score, signals)
}

fn fire(signal: MatchSignal, signals: &mut Vec<MatchSignal>) {
    if !signals.contains(&signal) {
        signals.push(signal);
    }
}

/// Substring occurrences of `word`, plus (fuzzy) whole tokens that are within
/// the threshold but don't contain it, so nothing counts twice.
fn occurrences(text: &str, word: &str, fuzzy: bool) -> usize {
    let exact = count_occurrences(text, word);
    if !fuzzy {
        return exact;
    }
    let near = text
        .split_whitespace()
        .map(clean_token)
        .filter(|token| !token.contains(word) && is_fuzzy_match(word, token))
        .count();
    exact + near
}
