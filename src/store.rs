// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Capsule store: where the aggregator gets a user's capsules from.
//!
//! The store is the only I/O the aggregator does, awaited once per search.
//! Implementations own retries; the aggregator never retries.

use async_trait::async_trait;
use serde::Deserialize;
use std::path::Path;

use crate::error::{Result, SearchError, StoreError};
use crate::types::{Capsule, DateRange};

#[async_trait]
pub trait CapsuleStore: Send + Sync {
    /// Every capsule of `user_id` created inside `date_range` (inclusive,
    /// when given), in a stable order. Capsules may lack organized notes.
    async fn user_capsules_with_organized_notes(
        &self,
        user_id: &str,
        date_range: Option<&DateRange>,
    ) -> std::result::Result<Vec<Capsule>, StoreError>;
}

/// In-memory store keeping capsules in insertion order.
#[derive(Debug, Clone, Default)]
pub struct MemoryCapsuleStore {
    capsules: Vec<(String, Capsule)>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct DumpEntry {
    user_id: String,
    #[serde(flatten)]
    capsule: Capsule,
}

#[derive(Deserialize)]
struct Dump {
    capsules: Vec<DumpEntry>,
}

impl MemoryCapsuleStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, user_id: impl Into<String>, capsule: Capsule) {
        self.capsules.push((user_id.into(), capsule));
    }

    pub fn with_capsule(mut self, user_id: impl Into<String>, capsule: Capsule) -> Self {
        self.insert(user_id, capsule);
        self
    }

    pub fn len(&self) -> usize {
        self.capsules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.capsules.is_empty()
    }

    /// Parse a dump of the form `{"capsules": [{"userId": "...", ...capsule}]}`.
    pub fn from_json(json: &str) -> Result<Self> {
        let dump: Dump =
            serde_json::from_str(json).map_err(|e| SearchError::Config(format!("capsule dump: {}", e)))?;
        Ok(dump
            .capsules
            .into_iter()
            .fold(Self::new(), |store, entry| store.with_capsule(entry.user_id, entry.capsule)))
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)
            .map_err(|e| SearchError::Config(format!("{}: {}", path.display(), e)))?;
        let store = Self::from_json(&json)?;
        log::debug!("loaded {} capsules from {}", store.len(), path.display());
        Ok(store)
    }
}

#[async_trait]
impl CapsuleStore for MemoryCapsuleStore {
    async fn user_capsules_with_organized_notes(
        &self,
        user_id: &str,
        date_range: Option<&DateRange>,
    ) -> std::result::Result<Vec<Capsule>, StoreError> {
        Ok(self
            .capsules
            .iter()
            .filter(|(owner, _)| owner == user_id)
            .map(|(_, capsule)| capsule)
            .filter(|c| date_range.map_or(true, |r| r.contains(&c.created_at)))
            .cloned()
            .collect())
    }
}
