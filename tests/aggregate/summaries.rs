//! Facets, aggregations and suggestions across capsules.

use crate::common::capsule;
use capsule_search::{
    CapsuleFilters, CapsuleSearcher, CrossCapsuleOptions, EntityList, MemoryCapsuleStore,
};

fn store() -> MemoryCapsuleStore {
    let mut store = MemoryCapsuleStore::new();
    for (i, category) in ["physics", "physics", "chemistry"].iter().enumerate() {
        let id = format!("c{}", i);
        let mut c = capsule(&id, &format!("Energy {}", i), i as u32 + 1, category, &[("Energy", "energy is conserved")]);
        if let Some(notes) = c.organized_notes.as_mut() {
            notes.categorization.tags = vec!["energy".to_string(), format!("tag{}", i)];
            notes.search_index.keywords = vec!["energy levels".to_string(), "enthalpy".to_string()];
            notes.categorization.entities = vec![EntityList {
                entity_type: "PERSON".to_string(),
                items: vec!["Energy Institute".to_string()],
            }];
        }
        store.insert("u1", c);
    }
    store
}

#[tokio::test]
async fn test_aggregations_describe_the_returned_page() {
    let options = CrossCapsuleOptions {
        max_results: 2,
        ..Default::default()
    };
    let response = CapsuleSearcher::new(store())
        .search_across_capsules("u1", "energy", &CapsuleFilters::default(), &options)
        .await
        .unwrap();

    // Three capsules matched, but only the returned two are summarized
    assert_eq!(response.total_results, 3);
    assert_eq!(response.results.len(), 2);
    assert_eq!(response.aggregations.total_capsules, 2);
    assert_eq!(response.aggregations.total_sections, 2);
    assert_eq!(response.facets.tags.get("energy"), Some(&2));
    assert_eq!(response.aggregations.top_categories[0].value, "physics");
    assert_eq!(response.aggregations.top_categories[0].count, 2);
    assert!(response.facets.categories.get("chemistry").is_none());
    assert_eq!(
        response.aggregations.difficulty_distribution.get("intermediate"),
        Some(&2)
    );
}

#[tokio::test]
async fn test_average_relevance_over_page() {
    let response = CapsuleSearcher::new(store())
        .search_across_capsules("u1", "energy", &CapsuleFilters::default(), &Default::default())
        .await
        .unwrap();
    let scores: Vec<f64> = response
        .results
        .iter()
        .map(|r| r.total_relevance_score)
        .collect();
    let expected = scores.iter().sum::<f64>() / scores.len() as f64;
    assert_eq!(response.aggregations.average_relevance, expected);
}

#[tokio::test]
async fn test_suggestions_merge_keywords_and_entities() {
    let response = CapsuleSearcher::new(store())
        .search_across_capsules("u1", "energy", &CapsuleFilters::default(), &Default::default())
        .await
        .unwrap();

    assert!(response.suggestions.contains(&"energy levels".to_string()));
    assert!(response.suggestions.contains(&"energy institute".to_string()));
    assert!(!response.suggestions.contains(&"enthalpy".to_string()));
    // Duplicates across capsules collapse
    let mut unique = response.suggestions.clone();
    unique.dedup();
    assert_eq!(unique, response.suggestions);
}
