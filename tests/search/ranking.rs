//! Ranking: phrase bonus, title monotonicity, ordering and truncation.

use crate::common::{index_of, make_section, ml_sections};
use capsule_search::{search, SearchOptions, SearchQuery};

fn score_of(response: &capsule_search::SearchResponse, id: &str) -> f64 {
    response
        .results
        .iter()
        .find(|r| r.section_id == id)
        .map(|r| r.score)
        .unwrap_or(0.0)
}

#[test]
fn test_adjacent_phrase_outscores_scattered_terms() {
    let sections = vec![
        make_section("adjacent", "First", "machine learning rocks"),
        make_section("scattered", "Second", "learning about a machine"),
    ];
    let index = index_of(&sections);

    let response = search(&SearchQuery::new("machine learning"), &index, &sections).unwrap();

    let adjacent = score_of(&response, "adjacent");
    let scattered = score_of(&response, "scattered");
    assert!(
        adjacent >= scattered + 2.0,
        "phrase hit {} should beat scattered terms {} by at least 2",
        adjacent,
        scattered
    );
    assert_eq!(response.results[0].section_id, "adjacent");
}

#[test]
fn test_title_match_strictly_increases_score() {
    let sections = vec![
        make_section("plain", "Notes", "gradient steps downhill"),
        make_section("titled", "Gradient notes", "gradient steps downhill"),
    ];
    let index = index_of(&sections);

    let response = search(&SearchQuery::new("gradient"), &index, &sections).unwrap();

    assert!(score_of(&response, "titled") > score_of(&response, "plain"));
    assert_eq!(response.results[0].section_id, "titled");
}

#[test]
fn test_results_sorted_descending() {
    let sections = ml_sections();
    let index = index_of(&sections);

    let response = search(&SearchQuery::new("machine"), &index, &sections).unwrap();

    assert!(response.results.len() >= 2);
    for pair in response.results.windows(2) {
        assert!(pair[0].score >= pair[1].score);
    }
}

#[test]
fn test_equal_scores_keep_input_order() {
    let sections = vec![
        make_section("c", "Third", "tensor"),
        make_section("a", "First", "tensor"),
        make_section("b", "Second", "tensor"),
    ];
    let index = index_of(&sections);

    let response = search(&SearchQuery::new("tensor"), &index, &sections).unwrap();
    let ids: Vec<&str> = response
        .results
        .iter()
        .map(|r| r.section_id.as_str())
        .collect();
    assert_eq!(ids, vec!["c", "a", "b"]);
}

#[test]
fn test_max_results_bounds_page_not_total() {
    let sections: Vec<_> = (0..12)
        .map(|i| make_section(&format!("s{}", i), "Topic", "shared vocabulary"))
        .collect();
    let index = index_of(&sections);

    for limit in [0, 1, 5, 12, 100] {
        let query = SearchQuery::new("shared").with_options(SearchOptions {
            max_results: limit,
            ..Default::default()
        });
        let response = search(&query, &index, &sections).unwrap();
        assert_eq!(response.results.len(), limit.min(12));
        assert_eq!(response.total_results, 12);
    }
}

#[test]
fn test_fuzzy_recall_can_be_switched_off() {
    let sections = vec![make_section("s1", "Optimizers", "the optimiser converged")];
    let index = index_of(&sections);

    let fuzzy = search(&SearchQuery::new("optimizer"), &index, &sections).unwrap();
    assert_eq!(fuzzy.results.len(), 1);

    let exact = SearchQuery::new("optimizer").with_options(SearchOptions {
        fuzzy: false,
        ..Default::default()
    });
    // Still found through the title's full text ("optimizers" contains it)
    let response = search(&exact, &index, &sections).unwrap();
    assert_eq!(response.results.len(), 1);
    assert!(response.results[0].score < fuzzy.results[0].score);
}
