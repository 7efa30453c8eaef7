//! Filter semantics: OR within a list, AND across lists.

use crate::common::{index_of, index_with, make_section, ml_sections};
use capsule_search::{search, DateRange, SearchFilters, SearchQuery, SectionType};

fn ids(response: &capsule_search::SearchResponse) -> Vec<&str> {
    let mut ids: Vec<&str> = response
        .results
        .iter()
        .map(|r| r.section_id.as_str())
        .collect();
    ids.sort();
    ids
}

#[test]
fn test_tag_filter_is_or_over_values() {
    let sections = ml_sections();
    let index = index_of(&sections);
    // "e" appears in every section's full text
    let query = SearchQuery::new("e").with_filters(SearchFilters {
        tags: Some(vec!["optimization".to_string(), "ML".to_string()]),
        ..Default::default()
    });
    let response = search(&query, &index, &sections).unwrap();
    assert_eq!(ids(&response), vec!["s1", "s2"]);
}

#[test]
fn test_filters_and_across_categories() {
    let sections = ml_sections();
    let index = index_of(&sections);
    let query = SearchQuery::new("e").with_filters(SearchFilters {
        tags: Some(vec!["ml".to_string()]),
        has_timestamp: Some(false),
        ..Default::default()
    });
    let response = search(&query, &index, &sections).unwrap();
    assert_eq!(ids(&response), vec!["s1"]);
}

#[test]
fn test_section_type_filter() {
    let mut sections = ml_sections();
    sections[2].section_type = SectionType::Definition;
    let index = index_of(&sections);
    let query = SearchQuery::new("e").with_filters(SearchFilters {
        section_types: Some(vec![SectionType::Definition, SectionType::KeyQuote]),
        ..Default::default()
    });
    let response = search(&query, &index, &sections).unwrap();
    assert_eq!(ids(&response), vec!["s3"]);
    assert_eq!(response.facets.section_types.get("definition"), Some(&1));
    assert!(response.facets.section_types.get("detail").is_none());
}

#[test]
fn test_capsule_categories_apply_to_every_section() {
    let sections = ml_sections();
    let index = index_with(&sections, &["Computer Science"], &["course"]);
    let query = SearchQuery::new("e").with_filters(SearchFilters {
        categories: Some(vec!["computer science".to_string()]),
        tags: Some(vec!["course".to_string()]),
        ..Default::default()
    });
    let response = search(&query, &index, &sections).unwrap();
    assert_eq!(response.total_results, 4);

    let other = SearchQuery::new("e").with_filters(SearchFilters {
        categories: Some(vec!["history".to_string()]),
        ..Default::default()
    });
    assert!(search(&other, &index, &sections).unwrap().results.is_empty());
}

#[test]
fn test_has_highlights_filter() {
    let sections = ml_sections();
    let index = index_of(&sections);
    let query = SearchQuery::new("e").with_filters(SearchFilters {
        has_highlights: Some(true),
        ..Default::default()
    });
    assert_eq!(ids(&search(&query, &index, &sections).unwrap()), vec!["s3"]);
}

#[test]
fn test_date_range_does_not_narrow_sections() {
    let sections = vec![make_section("s1", "Dated", "entropy")];
    let index = index_of(&sections);
    let query = SearchQuery::new("entropy").with_filters(SearchFilters {
        date_range: Some(DateRange::default()),
        ..Default::default()
    });
    assert_eq!(search(&query, &index, &sections).unwrap().results.len(), 1);
}

#[test]
fn test_facets_count_filtered_set_before_truncation() {
    let sections = ml_sections();
    let index = index_of(&sections);
    let query = SearchQuery::new("e")
        .with_filters(SearchFilters {
            tags: Some(vec!["ml".to_string()]),
            ..Default::default()
        })
        .with_options(capsule_search::SearchOptions {
            max_results: 1,
            ..Default::default()
        });
    let response = search(&query, &index, &sections).unwrap();
    assert_eq!(response.results.len(), 1);
    assert_eq!(response.facets.tags.get("ml"), Some(&2));
    assert_eq!(response.facets.tags.get("optimization"), Some(&1));
}
