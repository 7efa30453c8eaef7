// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Fuzz target for search query handling.
//!
//! Throws arbitrary text at the indexed search path. Queries may be rejected
//! as invalid, but must never panic, overflow the page or break score order.

#![no_main]

use capsule_search::testing::make_section;
use capsule_search::{build_index, search, IndexMetadata, NoteSection, NotesIndex, SearchQuery};
use libfuzzer_sys::fuzz_target;

fn corpus() -> &'static (Vec<NoteSection>, NotesIndex) {
    static CORPUS: std::sync::OnceLock<(Vec<NoteSection>, NotesIndex)> = std::sync::OnceLock::new();
    CORPUS.get_or_init(|| {
        let sections = vec![
            make_section("s1", "Intro to ML", "Machine learning is powerful"),
            make_section("s2", "Gradient descent", "Optimizers follow the gradient downhill"),
            make_section("s3", "Ünïcödé", "Straße, naïve café, 東京 and emoji 🎉 in content"),
            make_section("s4", "Regex (meta) [chars]", "a+b*c? {1,2} ^$ | \\d"),
        ];
        let index = build_index(&sections, &IndexMetadata::default());
        (sections, index)
    })
}

fuzz_target!(|query: &[u8]| {
    let (sections, index) = corpus();

    let query: String = String::from_utf8_lossy(query).chars().take(200).collect();
    let request = SearchQuery::new(query);

    let Ok(response) = search(&request, index, sections) else {
        return;
    };

    assert!(response.results.len() <= request.options.max_results);
    assert!(response.total_results >= response.results.len());
    for pair in response.results.windows(2) {
        assert!(pair[0].score >= pair[1].score);
    }
    for result in &response.results {
        assert!(sections.iter().any(|s| s.id == result.section_id));
    }
});
