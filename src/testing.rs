// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Test utilities shared across unit and integration tests.
//!
//! This module is always compiled but hidden from documentation.

#![doc(hidden)]

use crate::types::{
    Capsule, Categorization, Difficulty, KeywordIndex, NoteSection, NotesMetadata,
    OrganizedNotes, OrganizedSection, SectionType,
};
use chrono::{DateTime, TimeZone, Utc};

/// A plain `Detail` section at level 1 with nothing attached.
pub fn make_section(id: &str, title: &str, content: &str) -> NoteSection {
    NoteSection {
        id: id.to_string(),
        title: title.to_string(),
        content: content.to_string(),
        section_type: SectionType::Detail,
        level: 1,
        order: 0,
        timestamp: None,
        tags: vec![],
        highlights: vec![],
        annotations: vec![],
    }
}

/// Organized section with importance 1.0 and no key points or concepts.
pub fn make_organized_section(id: &str, title: &str, content: &str) -> OrganizedSection {
    OrganizedSection {
        section: make_section(id, title, content),
        key_points: vec![],
        concepts: vec![],
        importance: 1.0,
    }
}

/// Organized notes filed under `category`, intermediate difficulty.
pub fn make_notes(category: &str, sections: Vec<OrganizedSection>) -> OrganizedNotes {
    OrganizedNotes {
        sections,
        categorization: Categorization {
            primary_category: category.to_string(),
            ..Default::default()
        },
        metadata: NotesMetadata {
            difficulty: Difficulty::Intermediate,
            estimated_reading_time: 5,
        },
        search_index: KeywordIndex::default(),
    }
}

/// Midnight UTC on day `day` of January 2024.
pub fn jan(day: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 1, day, 0, 0, 0)
        .single()
        .unwrap_or_default()
}

/// Capsule `id` titled `title`, created on `jan(day)`.
pub fn make_capsule(id: &str, title: &str, day: u32, notes: Option<OrganizedNotes>) -> Capsule {
    Capsule {
        capsule_id: id.to_string(),
        video_title: title.to_string(),
        video_id: format!("video-{}", id),
        created_at: jan(day),
        organized_notes: notes,
    }
}
