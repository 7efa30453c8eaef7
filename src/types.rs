// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! The building blocks of note search.
//!
//! Two families of types live here. The note model (`NoteSection`,
//! `OrganizedNotes`, `Capsule`) is produced elsewhere and only read by this
//! crate. The query model (`SearchQuery`, `SearchResult`, `SearchResponse`) is
//! what callers hand to the indexed engine and get back from it.
//!
//! # Invariants
//!
//! - **NoteSection**: `id` non-empty and unique within a capsule, `level >= 1`,
//!   `timestamp.start <= timestamp.end`. Checked by `validate_sections`, not
//!   rediscovered mid-search.
//! - **SearchResponse**: `results.len() <= options.max_results` and
//!   `total_results` counts candidates before truncation.
//!
//! Everything serializes with camelCase keys so the JSON shape matches what the
//! capsule store hands us.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

// =============================================================================
// NOTE MODEL
// =============================================================================

/// What kind of content a section holds.
///
/// `main-point` and `main-content` are the same variant; older capsules use the
/// latter spelling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SectionType {
    Introduction,
    #[serde(alias = "main-content")]
    MainPoint,
    Detail,
    Example,
    Conclusion,
    KeyQuote,
    Definition,
    Concept,
    Summary,
}

impl SectionType {
    pub const ALL: [SectionType; 9] = [
        SectionType::Introduction,
        SectionType::MainPoint,
        SectionType::Detail,
        SectionType::Example,
        SectionType::Conclusion,
        SectionType::KeyQuote,
        SectionType::Definition,
        SectionType::Concept,
        SectionType::Summary,
    ];

    /// Wire name, also the key used in the section-type postings.
    pub fn as_str(self) -> &'static str {
        match self {
            SectionType::Introduction => "introduction",
            SectionType::MainPoint => "main-point",
            SectionType::Detail => "detail",
            SectionType::Example => "example",
            SectionType::Conclusion => "conclusion",
            SectionType::KeyQuote => "key-quote",
            SectionType::Definition => "definition",
            SectionType::Concept => "concept",
            SectionType::Summary => "summary",
        }
    }
}

impl fmt::Display for SectionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SectionType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lowered = s.trim().to_lowercase();
        if lowered == "main-content" {
            return Ok(SectionType::MainPoint);
        }
        SectionType::ALL
            .into_iter()
            .find(|t| t.as_str() == lowered)
            .ok_or_else(|| format!("unknown section type '{}'", s))
    }
}

/// Span of the source video a section was derived from, in seconds.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Timestamp {
    pub start: f64,
    pub end: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AnnotationType {
    Note,
    Question,
    Important,
    Clarification,
}

/// A user or generator remark attached to a character position in a section.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Annotation {
    pub id: String,
    pub text: String,
    #[serde(rename = "type")]
    pub kind: AnnotationType,
    pub position: usize,
}

/// The unit of retrievable content.
///
/// Sections are created by the notes organizer and treated as immutable here.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NoteSection {
    pub id: String,
    pub title: String,
    pub content: String,
    #[serde(rename = "type")]
    pub section_type: SectionType,
    pub level: u32,
    pub order: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<Timestamp>,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub highlights: Vec<String>,
    #[serde(default)]
    pub annotations: Vec<Annotation>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Beginner,
    Intermediate,
    Advanced,
}

impl Difficulty {
    pub fn as_str(self) -> &'static str {
        match self {
            Difficulty::Beginner => "beginner",
            Difficulty::Intermediate => "intermediate",
            Difficulty::Advanced => "advanced",
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Difficulty {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "beginner" => Ok(Difficulty::Beginner),
            "intermediate" => Ok(Difficulty::Intermediate),
            "advanced" => Ok(Difficulty::Advanced),
            other => Err(format!("unknown difficulty '{}'", other)),
        }
    }
}

/// A section as the notes organizer emits it: the plain section plus the
/// extracted key points and concepts the field-weighted scorer reads.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrganizedSection {
    #[serde(flatten)]
    pub section: NoteSection,
    #[serde(default)]
    pub key_points: Vec<String>,
    #[serde(default)]
    pub concepts: Vec<String>,
    #[serde(default = "default_importance")]
    pub importance: f64,
}

fn default_importance() -> f64 {
    1.0
}

/// Extracted entities of one kind, e.g. `{"entityType": "PERSON", "items": [...]}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EntityList {
    pub entity_type: String,
    pub items: Vec<String>,
}

/// Capsule-wide categorization. Applies to every section of the capsule.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Categorization {
    pub primary_category: String,
    #[serde(default)]
    pub secondary_categories: Vec<String>,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub subjects: Vec<String>,
    #[serde(default)]
    pub entities: Vec<EntityList>,
}

impl Categorization {
    /// Primary category followed by the secondary ones.
    pub fn all_categories(&self) -> impl Iterator<Item = &str> {
        std::iter::once(self.primary_category.as_str())
            .filter(|c| !c.is_empty())
            .chain(self.secondary_categories.iter().map(String::as_str))
    }

    /// Items of the entity list with the given type (case-insensitive), if any.
    pub fn entities_of(&self, entity_type: &str) -> &[String] {
        self.entities
            .iter()
            .find(|e| e.entity_type.eq_ignore_ascii_case(entity_type))
            .map(|e| e.items.as_slice())
            .unwrap_or(&[])
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NotesMetadata {
    pub difficulty: Difficulty,
    /// Minutes.
    #[serde(default)]
    pub estimated_reading_time: u32,
}

/// Keywords the organizer extracted for the whole capsule.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct KeywordIndex {
    #[serde(default)]
    pub keywords: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrganizedNotes {
    pub sections: Vec<OrganizedSection>,
    pub categorization: Categorization,
    pub metadata: NotesMetadata,
    #[serde(default)]
    pub search_index: KeywordIndex,
}

/// One processed video as the capsule store returns it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Capsule {
    pub capsule_id: String,
    pub video_title: String,
    pub video_id: String,
    pub created_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub organized_notes: Option<OrganizedNotes>,
}

// =============================================================================
// QUERY MODEL
// =============================================================================

/// Inclusive creation-date window. Either bound may be open.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct DateRange {
    #[serde(default)]
    pub start: Option<DateTime<Utc>>,
    #[serde(default)]
    pub end: Option<DateTime<Utc>>,
}

impl DateRange {
    pub fn contains(&self, at: &DateTime<Utc>) -> bool {
        self.start.map_or(true, |s| *at >= s) && self.end.map_or(true, |e| *at <= e)
    }
}

/// Narrowing filters for the indexed engine.
///
/// Every field is independent. `None` (or an empty list) is a no-op; lists OR
/// within themselves and AND against each other.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SearchFilters {
    pub tags: Option<Vec<String>>,
    pub categories: Option<Vec<String>>,
    pub section_types: Option<Vec<SectionType>>,
    /// Sections carry no creation date, so the indexed engine ignores this.
    pub date_range: Option<DateRange>,
    pub has_timestamp: Option<bool>,
    pub has_highlights: Option<bool>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SearchOptions {
    pub fuzzy: bool,
    pub case_sensitive: bool,
    pub whole_words: bool,
    pub include_context: bool,
    pub max_results: usize,
}

pub const DEFAULT_MAX_RESULTS: usize = 50;

impl Default for SearchOptions {
    fn default() -> Self {
        Self {
            fuzzy: true,
            case_sensitive: false,
            whole_words: false,
            include_context: true,
            max_results: DEFAULT_MAX_RESULTS,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchQuery {
    pub query: String,
    #[serde(default)]
    pub filters: SearchFilters,
    #[serde(default)]
    pub options: SearchOptions,
}

impl SearchQuery {
    pub fn new(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            ..Default::default()
        }
    }

    pub fn with_filters(mut self, filters: SearchFilters) -> Self {
        self.filters = filters;
        self
    }

    pub fn with_options(mut self, options: SearchOptions) -> Self {
        self.options = options;
        self
    }
}

/// One occurrence of the query in a section's full text.
///
/// `position` and `length` count characters of the lowercased full text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TextMatch {
    pub text: String,
    pub position: usize,
    pub length: usize,
    pub context: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchResult {
    pub section_id: String,
    pub title: String,
    pub content: String,
    #[serde(rename = "type")]
    pub section_type: SectionType,
    pub score: f64,
    pub matches: Vec<TextMatch>,
    pub highlights: Vec<String>,
    pub tags: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<Timestamp>,
}

/// Per-value counts over the filtered candidates. Zero counts are omitted.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Facets {
    pub tags: BTreeMap<String, usize>,
    pub categories: BTreeMap<String, usize>,
    pub section_types: BTreeMap<String, usize>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchResponse {
    pub query: String,
    pub results: Vec<SearchResult>,
    pub total_results: usize,
    pub facets: Facets,
    pub suggestions: Vec<String>,
    /// Wall-clock milliseconds. Diagnostic only.
    pub search_time_ms: u64,
}
