//! Sorting, filtering and paging across capsules.

use crate::common::capsule;
use capsule_search::testing::jan;
use capsule_search::{
    CapsuleFilters, CapsuleSearcher, CrossCapsuleOptions, DateRange, Difficulty,
    EnhancedSearchResponse, MemoryCapsuleStore, SortBy,
};

/// "broth" scores 5 in `rich`, 2 in `thin` under the field weights:
/// - rich: key point hit (5)
/// - thin: content hit (1) + two content word occurrences (2 * 0.5)
fn store() -> MemoryCapsuleStore {
    let mut rich = capsule("rich", "Zucchini soups", 3, "cooking", &[("Stocks", "")]);
    if let Some(notes) = rich.organized_notes.as_mut() {
        notes.sections[0].key_points = vec!["A good broth takes hours".to_string()];
        notes.sections[0].importance = 0.5;
        notes.categorization.tags = vec!["soup".to_string()];
    }
    let mut thin = capsule("thin", "Apple pies", 1, "baking", &[("Crust", "broth, then more broth")]);
    if let Some(notes) = thin.organized_notes.as_mut() {
        notes.sections[0].importance = 3.0;
        notes.metadata.difficulty = Difficulty::Beginner;
    }
    let unrelated = capsule("none", "Math", 2, "math", &[("Limits", "epsilon delta")]);

    MemoryCapsuleStore::new()
        .with_capsule("u1", thin)
        .with_capsule("u1", rich)
        .with_capsule("u1", unrelated)
        .with_capsule("u2", capsule("theirs", "Broth", 1, "cooking", &[("Broth", "broth")]))
}

async fn run(filters: CapsuleFilters, options: CrossCapsuleOptions) -> EnhancedSearchResponse {
    CapsuleSearcher::new(store())
        .search_across_capsules("u1", "broth", &filters, &options)
        .await
        .unwrap()
}

fn ids(response: &EnhancedSearchResponse) -> Vec<&str> {
    response
        .results
        .iter()
        .map(|r| r.capsule_id.as_str())
        .collect()
}

fn sorted_by(sort_by: SortBy) -> CrossCapsuleOptions {
    CrossCapsuleOptions {
        sort_by,
        ..Default::default()
    }
}

#[tokio::test]
async fn test_relevance_orders_by_total_score() {
    let response = run(CapsuleFilters::default(), CrossCapsuleOptions::default()).await;

    assert_eq!(ids(&response), vec!["rich", "thin"]);
    assert_eq!(response.results[0].total_relevance_score, 5.0);
    assert_eq!(response.results[1].total_relevance_score, 2.0);
    assert_eq!(response.aggregations.total_capsules, 2);
    assert_eq!(response.total_results, 2);
}

#[tokio::test]
async fn test_only_the_requesting_users_capsules() {
    let response = run(CapsuleFilters::default(), CrossCapsuleOptions::default()).await;
    assert!(!ids(&response).contains(&"theirs"));
}

#[tokio::test]
async fn test_date_title_and_importance_orders() {
    let by_date = run(CapsuleFilters::default(), sorted_by(SortBy::Date)).await;
    assert_eq!(ids(&by_date), vec!["rich", "thin"]);

    let by_title = run(CapsuleFilters::default(), sorted_by(SortBy::Title)).await;
    assert_eq!(ids(&by_title), vec!["thin", "rich"]);

    let by_importance = run(CapsuleFilters::default(), sorted_by(SortBy::Importance)).await;
    assert_eq!(ids(&by_importance), vec!["thin", "rich"]);
}

#[tokio::test]
async fn test_max_results_truncates_after_sorting() {
    let options = CrossCapsuleOptions {
        max_results: 1,
        ..Default::default()
    };
    let response = run(CapsuleFilters::default(), options).await;
    assert_eq!(ids(&response), vec!["rich"]);
    assert_eq!(response.total_results, 2);
}

#[tokio::test]
async fn test_capsule_filters_run_before_scoring() {
    let by_category = CapsuleFilters {
        categories: Some(vec!["Baking".to_string()]),
        ..Default::default()
    };
    assert_eq!(ids(&run(by_category, Default::default()).await), vec!["thin"]);

    let by_difficulty = CapsuleFilters {
        difficulty: Some(vec![Difficulty::Intermediate]),
        ..Default::default()
    };
    assert_eq!(ids(&run(by_difficulty, Default::default()).await), vec!["rich"]);

    let by_id = CapsuleFilters {
        capsule_ids: Some(vec!["thin".to_string(), "none".to_string()]),
        ..Default::default()
    };
    assert_eq!(ids(&run(by_id, Default::default()).await), vec!["thin"]);
}

#[tokio::test]
async fn test_date_range_is_pushed_to_the_store() {
    let filters = CapsuleFilters {
        date_range: Some(DateRange {
            start: Some(jan(2)),
            end: None,
        }),
        ..Default::default()
    };
    assert_eq!(ids(&run(filters, Default::default()).await), vec!["rich"]);
}

#[tokio::test]
async fn test_excluding_content_drops_content_only_matches() {
    let options = CrossCapsuleOptions {
        include_content: false,
        ..Default::default()
    };
    assert_eq!(ids(&run(CapsuleFilters::default(), options).await), vec!["rich"]);
}

#[tokio::test]
async fn test_section_hits_carry_snippets_and_signals() {
    let response = run(CapsuleFilters::default(), CrossCapsuleOptions::default()).await;
    let thin = &response.results[1];
    assert_eq!(thin.sections[0].snippet, "broth, then more broth");
    assert_eq!(
        thin.sections[0].matched_terms,
        vec![capsule_search::MatchSignal::Content]
    );
    assert_eq!(thin.metadata.category, "baking");
    assert_eq!(thin.metadata.created_at, jan(1));
}

#[tokio::test]
async fn test_empty_page_still_counts_matching_capsules() {
    let options = CrossCapsuleOptions {
        max_results: 0,
        ..Default::default()
    };
    let response = run(CapsuleFilters::default(), options).await;

    assert!(response.results.is_empty());
    assert_eq!(response.total_results, 2);
    assert_eq!(response.aggregations.total_capsules, 0);
}
