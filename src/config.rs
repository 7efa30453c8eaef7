// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Engine tunables.
//!
//! Defaults reproduce the documented ranking and snippet behavior; change them
//! only for display concerns (window sizes, suggestion count, highlight
//! markers). Scores are not configurable here, they live in `scoring`.
//!
//! Priority: environment variables > TOML file > defaults.

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::{Result, SearchError};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    /// Characters kept on each side of a full-text match.
    pub context_radius: usize,
    /// Characters kept on each side of a capsule snippet's anchor.
    pub snippet_radius: usize,
    /// Snippet length when the query does not occur in the section content.
    pub snippet_fallback_length: usize,
    pub suggestion_limit: usize,
    pub max_query_length: usize,
    /// Multiplier applied to `max_results` when scoring one capsule.
    pub capsule_over_fetch: usize,
    /// How many values `top_categories` / `top_tags` keep.
    pub top_facet_values: usize,
    pub highlight_open: String,
    pub highlight_close: String,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            context_radius: 100,
            snippet_radius: 75,
            snippet_fallback_length: 150,
            suggestion_limit: 5,
            max_query_length: 500,
            capsule_over_fetch: 2,
            top_facet_values: 10,
            highlight_open: "**".to_string(),
            highlight_close: "**".to_string(),
        }
    }
}

const ENV_OVERRIDES: &[&str] = &[
    "CAPSULE_SEARCH_CONTEXT_RADIUS",
    "CAPSULE_SEARCH_SNIPPET_RADIUS",
    "CAPSULE_SEARCH_SUGGESTION_LIMIT",
    "CAPSULE_SEARCH_MAX_QUERY_LENGTH",
];

impl SearchConfig {
    pub fn from_toml_str(content: &str) -> Result<Self> {
        toml::from_str(content).map_err(|e| SearchError::Config(e.to_string()))
    }

    /// Load from a TOML file, then apply environment overrides.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .map_err(|e| SearchError::Config(format!("{}: {}", path.display(), e)))?;
        Self::from_toml_str(&content)?.with_env_overrides()
    }

    pub fn with_env_overrides(self) -> Result<Self> {
        self.with_overrides(|key| std::env::var(key).ok())
    }

    /// Apply overrides from an arbitrary key lookup.
    pub fn with_overrides<F>(mut self, lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        for key in ENV_OVERRIDES {
            let Some(raw) = lookup(key) else { continue };
            let value: usize = raw
                .trim()
                .parse()
                .map_err(|_| SearchError::Config(format!("{} must be a number, got '{}'", key, raw)))?;
            match *key {
                "CAPSULE_SEARCH_CONTEXT_RADIUS" => self.context_radius = value,
                "CAPSULE_SEARCH_SNIPPET_RADIUS" => self.snippet_radius = value,
                "CAPSULE_SEARCH_SUGGESTION_LIMIT" => self.suggestion_limit = value,
                "CAPSULE_SEARCH_MAX_QUERY_LENGTH" => self.max_query_length = value,
                _ => {}
            }
        }
        Ok(self)
    }

    /// Trim and check a raw query against the length cap.
    pub fn validate_query<'q>(&self, query: &'q str) -> Result<&'q str> {
        let trimmed = query.trim();
        if trimmed.is_empty() {
            return Err(SearchError::InvalidQuery("query is empty".to_string()));
        }
        let len = trimmed.chars().count();
        if len > self.max_query_length {
            return Err(SearchError::InvalidQuery(format!(
                "query is {} characters, limit is {}",
                len, self.max_query_length
            )));
        }
        Ok(trimmed)
    }
}
