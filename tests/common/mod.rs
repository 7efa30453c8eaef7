//! Shared test utilities and fixtures.

#![allow(dead_code)]

use async_trait::async_trait;
use capsule_search::testing::{make_capsule, make_notes, make_organized_section};
use capsule_search::{
    build_index, Capsule, CapsuleStore, DateRange, IndexMetadata, NoteSection, NotesIndex,
    OrganizedSection, StoreError, Timestamp,
};
use std::time::Duration;

pub use capsule_search::testing::make_section;

// ============================================================================
// SECTION FIXTURES
// ============================================================================

/// Four sections about machine learning with tags, a timestamp and highlights.
pub fn ml_sections() -> Vec<NoteSection> {
    let mut intro = make_section("s1", "Intro to ML", "Machine learning is powerful");
    intro.tags = vec!["ml".to_string()];

    let mut gradient = make_section(
        "s2",
        "Gradient descent",
        "Optimizers follow the gradient downhill, step by step",
    );
    gradient.tags = vec!["optimization".to_string(), "ml".to_string()];
    gradient.timestamp = Some(Timestamp {
        start: 30.0,
        end: 95.0,
    });

    let mut nets = make_section(
        "s3",
        "Neural networks",
        "Layers of neurons learn representations; machine vision uses them",
    );
    nets.highlights = vec!["learn representations".to_string()];

    let cooking = make_section("s4", "Unrelated", "A recipe for vegetable broth");

    vec![intro, gradient, nets, cooking]
}

pub fn index_of(sections: &[NoteSection]) -> NotesIndex {
    build_index(sections, &IndexMetadata::default())
}

pub fn index_with(sections: &[NoteSection], categories: &[&str], tags: &[&str]) -> NotesIndex {
    build_index(
        sections,
        &IndexMetadata {
            categories: categories.iter().map(|c| c.to_string()).collect(),
            tags: tags.iter().map(|t| t.to_string()).collect(),
        },
    )
}

// ============================================================================
// CAPSULE FIXTURES
// ============================================================================

pub fn organized(id: &str, title: &str, content: &str) -> OrganizedSection {
    make_organized_section(id, title, content)
}

/// Capsule with one section per `(title, content)` pair.
pub fn capsule(id: &str, title: &str, day: u32, category: &str, sections: &[(&str, &str)]) -> Capsule {
    let sections = sections
        .iter()
        .enumerate()
        .map(|(i, (t, c))| organized(&format!("{}-{}", id, i), t, c))
        .collect();
    make_capsule(id, title, day, Some(make_notes(category, sections)))
}

// ============================================================================
// STORES
// ============================================================================

/// Always fails.
pub struct FailingStore;

#[async_trait]
impl CapsuleStore for FailingStore {
    async fn user_capsules_with_organized_notes(
        &self,
        _user_id: &str,
        _date_range: Option<&DateRange>,
    ) -> Result<Vec<Capsule>, StoreError> {
        Err(Box::new(std::io::Error::new(
            std::io::ErrorKind::ConnectionRefused,
            "capsule database unreachable",
        )))
    }
}

/// Answers after `delay`.
pub struct SlowStore {
    pub delay: Duration,
    pub capsules: Vec<Capsule>,
}

#[async_trait]
impl CapsuleStore for SlowStore {
    async fn user_capsules_with_organized_notes(
        &self,
        _user_id: &str,
        _date_range: Option<&DateRange>,
    ) -> Result<Vec<Capsule>, StoreError> {
        tokio::time::sleep(self.delay).await;
        Ok(self.capsules.clone())
    }
}
