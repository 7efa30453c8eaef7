// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

use anyhow::{Context, Result};
use clap::Parser;
use std::time::Duration;

use capsule_search::{
    build_index, search_with_config, validate_sections, CapsuleFilters, CapsuleSearcher,
    CrossCapsuleOptions, IndexMetadata, MemoryCapsuleStore, SearchFilters, SearchOptions,
    SearchQuery,
};

mod cli;
use cli::{display, load_config, Cli, Commands, SectionsFile};

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let cli = Cli::parse();
    if let Err(e) = run(cli) {
        eprintln!("error: {:#}", e);
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<()> {
    let config = load_config(cli.config.as_deref())?;

    match cli.command {
        Commands::Index {
            file,
            categories,
            json,
        } => {
            let (sections, file_categories, tags) = SectionsFile::load(&file)?.into_parts();
            validate_sections(&sections)?;
            let metadata = IndexMetadata {
                categories: file_categories.into_iter().chain(categories).collect(),
                tags,
            };
            let stats = build_index(&sections, &metadata).stats();
            if json {
                println!("{}", serde_json::to_string_pretty(&stats)?);
            } else {
                display::print_stats(&stats);
            }
        }

        Commands::Search {
            file,
            query,
            limit,
            exact,
            case_sensitive,
            whole_words,
            tags,
            types,
            has_timestamp,
            json,
        } => {
            let (sections, categories, capsule_tags) = SectionsFile::load(&file)?.into_parts();
            validate_sections(&sections)?;
            let index = build_index(
                &sections,
                &IndexMetadata {
                    categories,
                    tags: capsule_tags,
                },
            );
            let request = SearchQuery::new(query)
                .with_filters(SearchFilters {
                    tags: (!tags.is_empty()).then_some(tags),
                    section_types: (!types.is_empty()).then_some(types),
                    has_timestamp: has_timestamp.then_some(true),
                    ..Default::default()
                })
                .with_options(SearchOptions {
                    fuzzy: !exact,
                    case_sensitive,
                    whole_words,
                    max_results: limit,
                    ..Default::default()
                });
            let response = search_with_config(&request, &index, &sections, &config)?;
            if json {
                println!("{}", serde_json::to_string_pretty(&response)?);
            } else {
                display::print_search(&response, &config);
            }
        }

        Commands::Across {
            file,
            query,
            user,
            limit,
            sort,
            search_type,
            categories,
            no_content,
            timeout_ms,
            json,
        } => {
            let store = MemoryCapsuleStore::load(&file)?;
            let searcher = CapsuleSearcher::with_config(store, config);
            let filters = CapsuleFilters {
                categories: (!categories.is_empty()).then_some(categories),
                ..Default::default()
            };
            let options = CrossCapsuleOptions {
                max_results: limit,
                sort_by: sort,
                search_type,
                include_content: !no_content,
                timeout: timeout_ms.map(Duration::from_millis),
            };

            let runtime = tokio::runtime::Builder::new_current_thread()
                .enable_time()
                .build()
                .context("starting async runtime")?;
            let response = runtime.block_on(searcher.search_across_capsules(
                &user, &query, &filters, &options,
            ))?;

            if json {
                println!("{}", serde_json::to_string_pretty(&response)?);
            } else {
                display::print_across(&response, searcher.config());
            }
        }
    }

    Ok(())
}
