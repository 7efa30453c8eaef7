//! Indexed engine invariants over generated corpora.

use crate::common::{index_of, make_section};
use capsule_search::{
    search, NoteSection, SearchFilters, SearchOptions, SearchQuery, SectionType, Timestamp,
};
use proptest::prelude::*;

const VOCAB: &[&str] = &[
    "alpha", "beta", "gamma", "delta", "vector", "matrix", "tensor", "graph",
];
const TAGS: &[&str] = &["ml", "math", "stats"];

fn section_strategy() -> impl Strategy<Value = (Vec<usize>, Vec<usize>, bool, bool, usize)> {
    (
        prop::collection::vec(0..VOCAB.len(), 1..8),
        prop::collection::vec(0..TAGS.len(), 0..3),
        any::<bool>(),
        any::<bool>(),
        0..SectionType::ALL.len(),
    )
}

fn corpus() -> impl Strategy<Value = Vec<NoteSection>> {
    prop::collection::vec(section_strategy(), 0..12).prop_map(|specs| {
        specs
            .into_iter()
            .enumerate()
            .map(|(i, (words, tags, timed, highlighted, kind))| {
                let text: Vec<&str> = words.iter().map(|w| VOCAB[*w]).collect();
                let mut section = make_section(&format!("s{}", i), VOCAB[words[0]], &text.join(" "));
                section.tags = tags.iter().map(|t| TAGS[*t].to_string()).collect();
                section.timestamp = timed.then_some(Timestamp {
                    start: i as f64,
                    end: i as f64 + 10.0,
                });
                if highlighted {
                    section.highlights = vec![text[0].to_string()];
                }
                section.section_type = SectionType::ALL[kind];
                section
            })
            .collect()
    })
}

fn filters() -> impl Strategy<Value = SearchFilters> {
    (
        prop::option::of(prop::collection::vec(prop::sample::select(TAGS), 0..3)),
        prop::option::of(prop::collection::vec(prop::sample::select(SectionType::ALL.to_vec()), 0..3)),
        prop::option::of(any::<bool>()),
        prop::option::of(any::<bool>()),
    )
        .prop_map(|(tags, types, has_timestamp, has_highlights)| SearchFilters {
            tags: tags.map(|t| t.into_iter().map(str::to_string).collect()),
            section_types: types,
            has_timestamp,
            has_highlights,
            ..Default::default()
        })
}

fn query_text() -> impl Strategy<Value = String> {
    prop::collection::vec(prop::sample::select(VOCAB), 1..3).prop_map(|w| w.join(" "))
}

proptest! {
    #[test]
    fn prop_every_result_satisfies_every_filter(
        sections in corpus(),
        text in query_text(),
        filters in filters(),
    ) {
        let index = index_of(&sections);
        let query = SearchQuery::new(text).with_filters(filters.clone());
        let response = search(&query, &index, &sections).unwrap();

        for result in &response.results {
            if let Some(tags) = filters.tags.as_ref().filter(|t| !t.is_empty()) {
                prop_assert!(result.tags.iter().any(|t| tags.contains(t)));
            }
            if let Some(types) = filters.section_types.as_ref().filter(|t| !t.is_empty()) {
                prop_assert!(types.contains(&result.section_type));
            }
            if let Some(wanted) = filters.has_timestamp {
                prop_assert_eq!(result.timestamp.is_some(), wanted);
            }
            if let Some(wanted) = filters.has_highlights {
                prop_assert_eq!(!result.highlights.is_empty(), wanted);
            }
        }
    }

    #[test]
    fn prop_page_bounded_and_sorted(
        sections in corpus(),
        text in query_text(),
        max_results in 0usize..15,
    ) {
        let index = index_of(&sections);
        let query = SearchQuery::new(text).with_options(SearchOptions {
            max_results,
            ..Default::default()
        });
        let response = search(&query, &index, &sections).unwrap();

        prop_assert!(response.results.len() <= max_results);
        prop_assert!(response.total_results >= response.results.len());
        prop_assert!(response.total_results <= sections.len());
        for pair in response.results.windows(2) {
            prop_assert!(pair[0].score >= pair[1].score);
        }
        for result in &response.results {
            prop_assert!(result.score > 0.0);
        }
    }

    #[test]
    fn prop_search_is_deterministic(sections in corpus(), text in query_text()) {
        let index = index_of(&sections);
        let query = SearchQuery::new(text);
        let mut first = search(&query, &index, &sections).unwrap();
        let mut second = search(&query, &index, &sections).unwrap();
        first.search_time_ms = 0;
        second.search_time_ms = 0;
        prop_assert_eq!(first, second);
    }

    #[test]
    fn prop_facet_counts_never_exceed_total(sections in corpus(), text in query_text()) {
        let index = index_of(&sections);
        let response = search(&SearchQuery::new(text), &index, &sections).unwrap();
        for count in response
            .facets
            .tags
            .values()
            .chain(response.facets.section_types.values())
        {
            prop_assert!(*count > 0);
            prop_assert!(*count <= response.total_results);
        }
    }
}
