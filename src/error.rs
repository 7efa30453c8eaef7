// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Error taxonomy.
//!
//! Tokenizing, scoring and sorting are total over well-formed input, so the
//! only failures are a bad query, a missing or stale index, bad section data
//! caught at construction, and the capsule store falling over.

use std::time::Duration;
use thiserror::Error;

/// Error type a `CapsuleStore` implementation may return.
pub type StoreError = Box<dyn std::error::Error + Send + Sync + 'static>;

pub type Result<T> = std::result::Result<T, SearchError>;

#[derive(Error, Debug)]
pub enum SearchError {
    #[error("invalid query: {0}")]
    InvalidQuery(String),

    #[error("index unavailable: {0}")]
    IndexUnavailable(String),

    #[error("invalid section '{id}': {reason}")]
    InvalidSection { id: String, reason: String },

    #[error("capsule store failed for user '{user_id}'")]
    CollaboratorFailure {
        user_id: String,
        #[source]
        source: StoreError,
    },

    #[error("search exceeded its {0:?} deadline")]
    DeadlineExceeded(Duration),

    #[error("invalid configuration: {0}")]
    Config(String),
}
