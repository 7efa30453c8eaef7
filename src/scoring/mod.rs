// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Scoring and ranking: how search results get their numbers.
//!
//! Two scoring contracts share this module. The indexed engine counts
//! evidence (one point per keyword hit, two per phrase hit, one per full-text
//! occurrence). The field-weighted scorer weighs *where* the query matched
//! (title over key points over concepts and tags over content). Both rank the
//! same way: score descending, stable on ties.

mod core;
pub mod ranking;

pub use core::*;
