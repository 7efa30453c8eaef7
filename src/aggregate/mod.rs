// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Cross-capsule search: fan one query out over a user's capsules.
//!
//! # Pipeline
//!
//! ```text
//! store fetch (date range pushed down, awaited once)
//!   → skip capsules without organized notes
//!   → capsule pre-filter
//!   → field-weighted scoring per capsule (parallel with `parallel`)
//!   → stable sort by SortBy → truncate to max_results
//!   → facets + aggregations over the truncated page
//!   → suggestions over every scored capsule's candidates
//! ```
//!
//! Each capsule is scored with `max_results * capsule_over_fetch` sections (at
//! least one) so the cross-capsule ranking has more than one page of evidence
//! to work with.
//!
//! Store failures fail the whole search; there are no partial results.

mod facets;
mod filter;
mod types;

pub use facets::{
    compute_aggregations, compute_facets, rank_suggestions, suggestion_candidates,
    SUGGESTED_ENTITY_TYPES,
};
pub use filter::capsule_matches;
pub use types::*;

use crate::config::SearchConfig;
use crate::error::{Result, SearchError};
use crate::scoring::ranking::compare_capsules;
use crate::snippet::snippet;
use crate::store::CapsuleStore;
use crate::types::{Capsule, OrganizedNotes};
use crate::weighted::{score_sections, WeightedOptions};
#[cfg(feature = "parallel")]
use rayon::prelude::*;
use std::time::{Duration, Instant};

/// Searches across every capsule a [`CapsuleStore`] holds for a user.
pub struct CapsuleSearcher<S> {
    store: S,
    config: SearchConfig,
}

/// What scoring one capsule produced.
struct CapsuleOutcome {
    hit: Option<EnhancedSearchResult>,
    suggestions: Vec<String>,
}

/// Absolute deadline plus the budget it came from, for error reporting.
#[derive(Clone, Copy)]
struct Deadline {
    at: Instant,
    budget: Duration,
}

impl Deadline {
    fn start(started: Instant, budget: Option<Duration>) -> Option<Self> {
        let budget = budget?;
        started.checked_add(budget).map(|at| Deadline { at, budget })
    }

    fn check(self) -> Result<()> {
        if Instant::now() >= self.at {
            log::warn!("cross-capsule search ran past its {:?} deadline", self.budget);
            Err(SearchError::DeadlineExceeded(self.budget))
        } else {
            Ok(())
        }
    }
}

/// Sections scored per capsule. At least one, so a capsule with any match
/// still counts towards `total_results` when the page itself is empty.
fn per_capsule_limit(max_results: usize, over_fetch: usize) -> usize {
    max_results.max(1).saturating_mul(over_fetch.max(1))
}

impl<S: CapsuleStore> CapsuleSearcher<S> {
    pub fn new(store: S) -> Self {
        Self::with_config(store, SearchConfig::default())
    }

    pub fn with_config(store: S, config: SearchConfig) -> Self {
        Self { store, config }
    }

    pub fn config(&self) -> &SearchConfig {
        &self.config
    }

    /// Run `query` over every capsule of `user_id`.
    ///
    /// # Errors
    ///
    /// - `InvalidQuery` for an empty or over-long query
    /// - `CollaboratorFailure` when the store fails
    /// - `DeadlineExceeded` when `options.timeout` elapses first
    pub async fn search_across_capsules(
        &self,
        user_id: &str,
        query: &str,
        filters: &CapsuleFilters,
        options: &CrossCapsuleOptions,
    ) -> Result<EnhancedSearchResponse> {
        let started = Instant::now();
        let query = self.config.validate_query(query)?;
        let deadline = Deadline::start(started, options.timeout);

        let capsules = self.fetch(user_id, filters, options.timeout).await?;
        let fetched = capsules.len();

        let candidates: Vec<(&Capsule, &OrganizedNotes)> = capsules
            .iter()
            .filter_map(|capsule| match &capsule.organized_notes {
                Some(notes) => Some((capsule, notes)),
                None => {
                    log::warn!("skipping capsule {}: no organized notes", capsule.capsule_id);
                    None
                }
            })
            .filter(|(capsule, notes)| capsule_matches(capsule, notes, filters))
            .collect();

        let weighted = WeightedOptions {
            search_type: options.search_type,
            max_results: per_capsule_limit(options.max_results, self.config.capsule_over_fetch),
            include_content: options.include_content,
        };
        let score = |(capsule, notes): &(&Capsule, &OrganizedNotes)| -> Result<CapsuleOutcome> {
            if let Some(deadline) = deadline {
                deadline.check()?;
            }
            Ok(score_capsule(capsule, notes, query, &weighted, &self.config))
        };

        let outcomes: Vec<CapsuleOutcome> = {
            #[cfg(feature = "parallel")]
            {
                candidates.par_iter().map(score).collect::<Result<_>>()?
            }
            #[cfg(not(feature = "parallel"))]
            {
                candidates.iter().map(score).collect::<Result<_>>()?
            }
        };

        let mut suggestion_pool = Vec::new();
        let mut results = Vec::new();
        for outcome in outcomes {
            suggestion_pool.extend(outcome.suggestions);
            results.extend(outcome.hit);
        }

        results.sort_by(|a, b| compare_capsules(a, b, options.sort_by));
        let total_results = results.len();
        results.truncate(options.max_results);

        let facets = compute_facets(&results);
        let aggregations = compute_aggregations(&results, self.config.top_facet_values);
        let suggestions = rank_suggestions(query, suggestion_pool, self.config.suggestion_limit);
        let search_time_ms = started.elapsed().as_millis() as u64;

        log::info!(
            "cross-capsule search for user {}: {} fetched, {} scored, {} matched, {} returned in {}ms",
            user_id,
            fetched,
            candidates.len(),
            total_results,
            results.len(),
            search_time_ms
        );

        Ok(EnhancedSearchResponse {
            query: query.to_string(),
            results,
            total_results,
            facets,
            aggregations,
            suggestions,
            search_time_ms,
        })
    }

    async fn fetch(
        &self,
        user_id: &str,
        filters: &CapsuleFilters,
        timeout: Option<Duration>,
    ) -> Result<Vec<Capsule>> {
        let call = self
            .store
            .user_capsules_with_organized_notes(user_id, filters.date_range.as_ref());
        let fetched = match timeout {
            Some(budget) => tokio::time::timeout(budget, call).await.map_err(|_| {
                log::warn!("capsule store did not answer within {:?}", budget);
                SearchError::DeadlineExceeded(budget)
            })?,
            None => call.await,
        };
        fetched.map_err(|source| SearchError::CollaboratorFailure {
            user_id: user_id.to_string(),
            source,
        })
    }
}

fn score_capsule(
    capsule: &Capsule,
    notes: &OrganizedNotes,
    query: &str,
    weighted: &WeightedOptions,
    config: &SearchConfig,
) -> CapsuleOutcome {
    let suggestions = suggestion_candidates(notes, query);
    let scored = score_sections(notes, query, weighted);
    if scored.is_empty() {
        return CapsuleOutcome {
            hit: None,
            suggestions,
        };
    }

    let sections: Vec<SectionHit> = scored
        .into_iter()
        .map(|s| SectionHit {
            snippet: snippet(
                &s.section.section.content,
                query,
                config.snippet_radius,
                config.snippet_fallback_length,
            ),
            section: s.section.clone(),
            relevance_score: s.relevance_score,
            matched_terms: s.matched_terms,
        })
        .collect();
    let total_relevance_score = sections.iter().map(|s| s.relevance_score).sum();
    let categorization = &notes.categorization;

    CapsuleOutcome {
        hit: Some(EnhancedSearchResult {
            capsule_id: capsule.capsule_id.clone(),
            video_title: capsule.video_title.clone(),
            video_id: capsule.video_id.clone(),
            sections,
            total_relevance_score,
            metadata: CapsuleMetadata {
                category: categorization.primary_category.clone(),
                tags: categorization.tags.clone(),
                difficulty: notes.metadata.difficulty,
                created_at: capsule.created_at,
                subjects: categorization.subjects.clone(),
                estimated_reading_time: notes.metadata.estimated_reading_time,
            },
        }),
        suggestions,
    }
}
