// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! The math behind search ranking.
//!
//! # Indexed engine constants
//!
//! | Signal            | Points | Counted        |
//! |-------------------|--------|----------------|
//! | Keyword hit       | 1.0    | Once per query term per section |
//! | Phrase hit        | 2.0    | Adjacent terms beat the same terms apart |
//! | Full-text hit     | 1.0    | Once per occurrence of the whole query |
//!
//! # Field-weighted constants
//!
//! | Field            | Points | Per |
//! |------------------|--------|-----|
//! | Title            | 10.0   | section |
//! | Key point        | 5.0    | matching key point |
//! | Concept          | 3.0    | matching concept |
//! | Tag              | 3.0    | matching tag |
//! | Content          | 1.0    | section |
//! | Title term       | 2.0    | occurrence of a query word in the title |
//! | Content term     | 0.5    | occurrence of a query word in the content |
//!
//! These are observable behavior. Callers rely on a title hit outranking any
//! realistic number of content hits; don't retune without checking that.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

// =============================================================================
// INDEXED ENGINE
// =============================================================================

pub const KEYWORD_MATCH_SCORE: f64 = 1.0;
pub const PHRASE_MATCH_SCORE: f64 = 2.0;
pub const FULL_TEXT_MATCH_SCORE: f64 = 1.0;

// =============================================================================
// FIELD-WEIGHTED SCORER
// =============================================================================

pub const TITLE_MATCH_SCORE: f64 = 10.0;
pub const KEY_POINT_MATCH_SCORE: f64 = 5.0;
pub const CONCEPT_MATCH_SCORE: f64 = 3.0;
pub const TAG_MATCH_SCORE: f64 = 3.0;
pub const CONTENT_MATCH_SCORE: f64 = 1.0;
pub const TITLE_TERM_SCORE: f64 = 2.0;
pub const CONTENT_TERM_SCORE: f64 = 0.5;

/// Query words must be longer than this to earn per-word points.
pub const MIN_TERM_CHARS: usize = 2;

/// Which field of a section produced points.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum MatchSignal {
    Title,
    KeyPoint,
    Concept,
    Tag,
    Content,
}

impl MatchSignal {
    pub fn as_str(self) -> &'static str {
        match self {
            MatchSignal::Title => "title",
            MatchSignal::KeyPoint => "key-point",
            MatchSignal::Concept => "concept",
            MatchSignal::Tag => "tag",
            MatchSignal::Content => "content",
        }
    }
}

/// Additive per-section score accumulator.
///
/// Remembers the order in which sections first scored so callers that want
/// encounter order don't have to track it separately.
#[derive(Debug, Clone, Default)]
pub struct ScoreBoard {
    scores: HashMap<String, f64>,
    order: Vec<String>,
}

impl ScoreBoard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, id: &str, points: f64) {
        match self.scores.get_mut(id) {
            Some(score) => *score += points,
            None => {
                self.scores.insert(id.to_string(), points);
                self.order.push(id.to_string());
            }
        }
    }

    pub fn add_all<'a, I>(&mut self, ids: I, points: f64)
    where
        I: IntoIterator<Item = &'a String>,
    {
        for id in ids {
            self.add(id, points);
        }
    }

    pub fn get(&self, id: &str) -> f64 {
        self.scores.get(id).copied().unwrap_or(0.0)
    }

    /// Ids with a positive score, in first-scored order.
    pub fn matched(&self) -> impl Iterator<Item = &str> {
        self.order
            .iter()
            .map(String::as_str)
            .filter(move |id| self.get(id) > 0.0)
    }
}
