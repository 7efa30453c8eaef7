// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Search over learning-capsule notes.
//!
//! Two search paths share one fuzzy matcher, one snippet extractor and one set
//! of scoring constants:
//!
//! ```text
//! ┌──────────────┐     ┌──────────────┐     ┌──────────────────┐
//! │ NoteSection[]│────▶│ build_index  │────▶│ search           │
//! │              │     │ (NotesIndex) │     │ keyword / phrase │
//! └──────────────┘     └──────────────┘     │ / full text      │
//!                                           └──────────────────┘
//! ┌──────────────┐     ┌──────────────┐     ┌──────────────────┐
//! │ CapsuleStore │────▶│ pre-filter   │────▶│ score_sections   │──▶ sort, page,
//! │ (async)      │     │ per capsule  │     │ per capsule      │    facets
//! └──────────────┘     └──────────────┘     └──────────────────┘
//! ```
//!
//! The indexed path searches one capsule's sections through an inverted index.
//! The cross-capsule path (`CapsuleSearcher`) scores each of a user's capsules
//! directly from its organized notes and merges the results.
//!
//! # Usage
//!
//! ```ignore
//! use capsule_search::{build_index, search, IndexMetadata, SearchQuery};
//!
//! let index = build_index(&sections, &IndexMetadata::default());
//! let response = search(&SearchQuery::new("machine learning"), &index, &sections)?;
//! for hit in &response.results {
//!     println!("{} {}", hit.score, hit.title);
//! }
//! ```
//!
//! Across capsules:
//!
//! ```ignore
//! let searcher = CapsuleSearcher::new(store);
//! let response = searcher
//!     .search_across_capsules("user-1", "gradient", &CapsuleFilters::default(), &Default::default())
//!     .await?;
//! ```

pub mod aggregate;
pub mod config;
pub mod error;
pub mod fuzzy;
pub mod index;
pub mod scoring;
pub mod search;
pub mod snippet;
pub mod store;
pub mod types;
mod utils;
pub mod weighted;

#[doc(hidden)]
pub mod testing;

pub use aggregate::{
    Aggregations, CapsuleFacets, CapsuleFilters, CapsuleMetadata, CapsuleSearcher,
    CrossCapsuleOptions, EnhancedSearchResponse, EnhancedSearchResult, FacetCount, SectionHit,
    SortBy,
};
pub use config::SearchConfig;
pub use error::{Result, SearchError, StoreError};
pub use fuzzy::{edit_distance, fuzzy_threshold, is_fuzzy_match, levenshtein_within};
pub use index::{build_index, validate_sections, IndexMetadata, IndexStats, NotesIndex};
pub use scoring::MatchSignal;
pub use search::{search, search_with_config};
pub use snippet::{context_window, highlight, snippet};
pub use store::{CapsuleStore, MemoryCapsuleStore};
pub use types::*;
pub use utils::{clean_token, count_occurrences, normalize, parse_query};
pub use weighted::{score_sections, ScoredSection, SearchType, WeightedOptions};
