// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Request and response types for cross-capsule search.

use crate::scoring::MatchSignal;
use crate::types::{DateRange, Difficulty, OrganizedSection};
use crate::weighted::SearchType;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;
use std::time::Duration;

/// Default page size for cross-capsule search.
pub const DEFAULT_CAPSULE_RESULTS: usize = 20;

/// Capsule-level filters, applied before any scoring.
///
/// Every list is an OR over its values; different filters AND together.
/// `date_range` is pushed down to the store.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CapsuleFilters {
    pub capsule_ids: Option<Vec<String>>,
    pub categories: Option<Vec<String>>,
    pub difficulty: Option<Vec<Difficulty>>,
    pub subjects: Option<Vec<String>>,
    pub tags: Option<Vec<String>>,
    pub date_range: Option<DateRange>,
    pub has_timestamp: Option<bool>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortBy {
    #[default]
    Relevance,
    Date,
    Title,
    Importance,
}

impl SortBy {
    pub fn as_str(self) -> &'static str {
        match self {
            SortBy::Relevance => "relevance",
            SortBy::Date => "date",
            SortBy::Title => "title",
            SortBy::Importance => "importance",
        }
    }
}

impl fmt::Display for SortBy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SortBy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "relevance" => Ok(SortBy::Relevance),
            "date" => Ok(SortBy::Date),
            "title" => Ok(SortBy::Title),
            "importance" => Ok(SortBy::Importance),
            other => Err(format!("unknown sort order '{}'", other)),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CrossCapsuleOptions {
    pub max_results: usize,
    pub sort_by: SortBy,
    pub search_type: SearchType,
    pub include_content: bool,
    /// Bound on the whole call: store fetch plus scoring.
    #[serde(skip)]
    pub timeout: Option<Duration>,
}

impl Default for CrossCapsuleOptions {
    fn default() -> Self {
        Self {
            max_results: DEFAULT_CAPSULE_RESULTS,
            sort_by: SortBy::Relevance,
            search_type: SearchType::Keyword,
            include_content: true,
            timeout: None,
        }
    }
}

/// One matched section inside a capsule result.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SectionHit {
    pub section: OrganizedSection,
    pub relevance_score: f64,
    pub matched_terms: Vec<MatchSignal>,
    pub snippet: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CapsuleMetadata {
    pub category: String,
    pub tags: Vec<String>,
    pub difficulty: Difficulty,
    pub created_at: DateTime<Utc>,
    pub subjects: Vec<String>,
    pub estimated_reading_time: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EnhancedSearchResult {
    pub capsule_id: String,
    pub video_title: String,
    pub video_id: String,
    pub sections: Vec<SectionHit>,
    /// Sum of the section scores.
    pub total_relevance_score: f64,
    pub metadata: CapsuleMetadata,
}

impl EnhancedSearchResult {
    /// Sum of the matched sections' importance.
    pub fn total_importance(&self) -> f64 {
        self.sections.iter().map(|hit| hit.section.importance).sum()
    }
}

/// Counts per attribute value. Zero counts never appear.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CapsuleFacets {
    pub categories: BTreeMap<String, usize>,
    pub tags: BTreeMap<String, usize>,
    pub difficulties: BTreeMap<String, usize>,
    pub subjects: BTreeMap<String, usize>,
    pub section_types: BTreeMap<String, usize>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FacetCount {
    pub value: String,
    pub count: usize,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Aggregations {
    pub total_capsules: usize,
    pub total_sections: usize,
    pub average_relevance: f64,
    pub top_categories: Vec<FacetCount>,
    pub top_tags: Vec<FacetCount>,
    pub difficulty_distribution: BTreeMap<String, usize>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EnhancedSearchResponse {
    pub query: String,
    pub results: Vec<EnhancedSearchResult>,
    /// Capsules with at least one matching section, before truncation.
    pub total_results: usize,
    /// Computed over `results` (after truncation).
    pub facets: CapsuleFacets,
    /// Computed over `results` (after truncation).
    pub aggregations: Aggregations,
    pub suggestions: Vec<String>,
    /// Wall-clock milliseconds. Diagnostic only.
    pub search_time_ms: u64,
}
