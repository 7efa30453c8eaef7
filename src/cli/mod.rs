// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! CLI definitions for the capsule-search command-line interface.
//!
//! Three subcommands: `index` to check a section dump and report what its
//! index would hold, `search` to run the indexed engine over it, and `across`
//! to run the cross-capsule aggregator over a capsule dump.

pub mod display;

use anyhow::{Context, Result};
use capsule_search::{NoteSection, SearchConfig};
use clap::{Parser, Subcommand};
use serde::Deserialize;
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(
    name = "capsule-search",
    about = "Search learning-capsule notes from the command line",
    version
)]
pub struct Cli {
    /// TOML file with engine settings (context radius, suggestion count, ...)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Validate a section dump and print index statistics
    Index {
        /// JSON file: an array of sections, or {"sections", "categories", "tags"}
        file: PathBuf,

        /// Capsule-wide categories, comma separated
        #[arg(long, value_delimiter = ',')]
        categories: Vec<String>,

        /// Print statistics as JSON
        #[arg(long)]
        json: bool,
    },

    /// Search one capsule's sections through the inverted index
    Search {
        /// JSON file: an array of sections, or {"sections", "categories", "tags"}
        file: PathBuf,

        /// Search query
        query: String,

        /// Maximum number of results to return
        #[arg(short, long, default_value = "50")]
        limit: usize,

        /// Disable fuzzy keyword and phrase lookup
        #[arg(long)]
        exact: bool,

        #[arg(long)]
        case_sensitive: bool,

        /// Full-text hits must sit on word boundaries
        #[arg(long)]
        whole_words: bool,

        /// Only sections with this tag (repeatable, OR'ed)
        #[arg(long = "tag")]
        tags: Vec<String>,

        /// Only sections of this type (repeatable, OR'ed)
        #[arg(long = "type")]
        types: Vec<capsule_search::SectionType>,

        /// Only sections with a video timestamp
        #[arg(long)]
        has_timestamp: bool,

        /// Print the raw response as JSON
        #[arg(long)]
        json: bool,
    },

    /// Search every capsule a user owns in a capsule dump
    Across {
        /// JSON file: {"capsules": [{"userId": ..., ...capsule}]}
        file: PathBuf,

        /// Search query
        query: String,

        /// Whose capsules to search
        #[arg(short, long)]
        user: String,

        /// Maximum number of capsules to return
        #[arg(short, long, default_value = "20")]
        limit: usize,

        /// relevance, date, title or importance
        #[arg(long, default_value = "relevance")]
        sort: capsule_search::SortBy,

        /// keyword, exact or fuzzy
        #[arg(long = "search-type", default_value = "keyword")]
        search_type: capsule_search::SearchType,

        /// Only capsules in this category (repeatable, OR'ed)
        #[arg(long = "category")]
        categories: Vec<String>,

        /// Ignore section content when scoring
        #[arg(long)]
        no_content: bool,

        /// Give up after this many milliseconds
        #[arg(long)]
        timeout_ms: Option<u64>,

        /// Print the raw response as JSON
        #[arg(long)]
        json: bool,
    },
}

/// A section dump: either a bare array or sections with capsule-wide labels.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum SectionsFile {
    Bare(Vec<NoteSection>),
    Labeled {
        sections: Vec<NoteSection>,
        #[serde(default)]
        categories: Vec<String>,
        #[serde(default)]
        tags: Vec<String>,
    },
}

impl SectionsFile {
    pub fn load(path: &Path) -> Result<Self> {
        let json = std::fs::read_to_string(path)
            .with_context(|| format!("reading {}", path.display()))?;
        serde_json::from_str(&json).with_context(|| format!("parsing sections in {}", path.display()))
    }

    /// Sections plus `(categories, tags)` applied to all of them.
    pub fn into_parts(self) -> (Vec<NoteSection>, Vec<String>, Vec<String>) {
        match self {
            SectionsFile::Bare(sections) => (sections, vec![], vec![]),
            SectionsFile::Labeled {
                sections,
                categories,
                tags,
            } => (sections, categories, tags),
        }
    }
}

/// `--config` if given, otherwise defaults; environment overrides apply either way.
pub fn load_config(path: Option<&Path>) -> Result<SearchConfig> {
    let config = match path {
        Some(path) => SearchConfig::load(path)?,
        None => SearchConfig::default().with_env_overrides()?,
    };
    log::debug!("engine config: {:?}", config);
    Ok(config)
}
