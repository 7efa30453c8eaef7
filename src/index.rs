// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Inverted index construction over one capsule's note sections.
//!
//! The index is a pure function of its input: fold the sections into freshly
//! allocated postings maps and hand back one immutable value. There is no
//! incremental update. When sections change, rebuild.
//!
//! # INVARIANTS (DO NOT VIOLATE)
//!
//! 1. **POSTINGS_RESOLVE**: every section id in any postings map has an entry
//!    in both `full_text` and `metadata`
//! 2. **NON_EMPTY**: every postings key maps to at least one section id
//! 3. **LOWERCASE**: keyword, phrase, tag and category keys are lowercased
//!
//! Postings use ordered maps so iteration (suggestions, facets) is
//! deterministic for a given index.

use crate::error::{Result, SearchError};
use crate::types::{NoteSection, SectionType, Timestamp};
use crate::utils::{clean_phrase, clean_token};
use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet, HashMap, HashSet};

/// Keywords must be longer than this many characters.
pub const MIN_KEYWORD_CHARS: usize = 2;

/// Two-word phrases must be longer than this many characters.
pub const MIN_PHRASE_CHARS: usize = 5;

/// Key → ids of the sections containing it.
pub type Postings = BTreeMap<String, BTreeSet<String>>;

/// Capsule-wide labels applied to every section.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IndexMetadata {
    pub categories: Vec<String>,
    pub tags: Vec<String>,
}

/// What the engine needs to know about a section without going back to it.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SectionSnapshot {
    pub title: String,
    #[serde(rename = "type")]
    pub section_type: SectionType,
    pub level: u32,
    pub order: u32,
    pub timestamp: Option<Timestamp>,
    pub tags: Vec<String>,
    pub highlights: Vec<String>,
}

/// Read-only search index for one capsule.
#[derive(Debug, Clone, Default)]
pub struct NotesIndex {
    keywords: Postings,
    phrases: Postings,
    tags: Postings,
    categories: Postings,
    section_types: Postings,
    full_text: HashMap<String, String>,
    metadata: HashMap<String, SectionSnapshot>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct IndexStats {
    pub sections: usize,
    pub keywords: usize,
    pub phrases: usize,
    pub tags: usize,
    pub categories: usize,
    pub section_types: usize,
}

/// Build the index for `sections`.
///
/// Never fails: no sections means an empty index. Every section is associated
/// with every category and capsule tag in `metadata`, since categorization is
/// capsule-wide rather than per section.
pub fn build_index(sections: &[NoteSection], metadata: &IndexMetadata) -> NotesIndex {
    let index = sections.iter().fold(NotesIndex::default(), |index, section| {
        index.with_section(section, metadata)
    });
    log::debug!(
        "built notes index: {} sections, {} keywords, {} phrases",
        index.len(),
        index.keywords.len(),
        index.phrases.len()
    );
    index
}

fn post(postings: &mut Postings, key: String, id: &str) {
    postings.entry(key).or_default().insert(id.to_string());
}

impl NotesIndex {
    fn with_section(mut self, section: &NoteSection, metadata: &IndexMetadata) -> Self {
        let id = section.id.as_str();
        let text = section_text(section);

        let words: Vec<&str> = text.split_whitespace().collect();
        for word in &words {
            let token = clean_token(word);
            if token.chars().count() > MIN_KEYWORD_CHARS {
                post(&mut self.keywords, token, id);
            }
        }
        for pair in words.windows(2) {
            let phrase = clean_phrase(&format!("{} {}", pair[0], pair[1]))
                .trim()
                .to_string();
            if phrase.chars().count() > MIN_PHRASE_CHARS {
                post(&mut self.phrases, phrase, id);
            }
        }

        for tag in section.tags.iter().chain(&metadata.tags) {
            post(&mut self.tags, tag.to_lowercase(), id);
        }
        for category in &metadata.categories {
            post(&mut self.categories, category.to_lowercase(), id);
        }
        post(
            &mut self.section_types,
            section.section_type.as_str().to_string(),
            id,
        );

        self.full_text.insert(id.to_string(), text);
        self.metadata.insert(
            id.to_string(),
            SectionSnapshot {
                title: section.title.clone(),
                section_type: section.section_type,
                level: section.level,
                order: section.order,
                timestamp: section.timestamp,
                tags: section.tags.clone(),
                highlights: section.highlights.clone(),
            },
        );
        self
    }

    pub fn keywords(&self) -> &Postings {
        &self.keywords
    }

    pub fn phrases(&self) -> &Postings {
        &self.phrases
    }

    pub fn tags(&self) -> &Postings {
        &self.tags
    }

    pub fn categories(&self) -> &Postings {
        &self.categories
    }

    pub fn section_types(&self) -> &Postings {
        &self.section_types
    }

    /// Lowercased `title + content + highlights` of a section.
    pub fn full_text(&self, section_id: &str) -> Option<&str> {
        self.full_text.get(section_id).map(String::as_str)
    }

    pub fn metadata(&self, section_id: &str) -> Option<&SectionSnapshot> {
        self.metadata.get(section_id)
    }

    pub fn contains_section(&self, section_id: &str) -> bool {
        self.full_text.contains_key(section_id)
    }

    /// Number of indexed sections.
    pub fn len(&self) -> usize {
        self.full_text.len()
    }

    pub fn is_empty(&self) -> bool {
        self.full_text.is_empty()
    }

    pub fn stats(&self) -> IndexStats {
        IndexStats {
            sections: self.len(),
            keywords: self.keywords.len(),
            phrases: self.phrases.len(),
            tags: self.tags.len(),
            categories: self.categories.len(),
            section_types: self.section_types.len(),
        }
    }
}

/// The text a section is searched by: title, content and highlights, joined
/// by single spaces and lowercased.
pub fn section_text(section: &NoteSection) -> String {
    let mut text = String::with_capacity(section.title.len() + section.content.len() + 1);
    text.push_str(&section.title);
    text.push(' ');
    text.push_str(&section.content);
    for highlight in &section.highlights {
        text.push(' ');
        text.push_str(highlight);
    }
    text.to_lowercase()
}

/// Reject sections that would make the index lie.
///
/// Checks: non-empty unique ids, `level >= 1`, finite timestamps with
/// `start <= end`.
pub fn validate_sections(sections: &[NoteSection]) -> Result<()> {
    let mut seen = HashSet::with_capacity(sections.len());
    for section in sections {
        let invalid = |reason: &str| SearchError::InvalidSection {
            id: section.id.clone(),
            reason: reason.to_string(),
        };
        if section.id.trim().is_empty() {
            return Err(invalid("id is empty"));
        }
        if !seen.insert(section.id.as_str()) {
            return Err(invalid("duplicate id"));
        }
        if section.level < 1 {
            return Err(invalid("level must be >= 1"));
        }
        if let Some(ts) = section.timestamp {
            if !ts.start.is_finite() || !ts.end.is_finite() || ts.start < 0.0 {
                return Err(invalid("timestamp must be finite and non-negative"));
            }
            if ts.end < ts.start {
                return Err(invalid("timestamp ends before it starts"));
            }
        }
    }
    Ok(())
}
