//! Edit distance against a textbook oracle.

use capsule_search::{edit_distance, fuzzy_threshold, is_fuzzy_match, levenshtein_within};
use proptest::prelude::*;

/// Full-matrix Levenshtein, written for clarity rather than speed.
fn oracle(a: &str, b: &str) -> usize {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();
    let mut dp = vec![vec![0usize; b.len() + 1]; a.len() + 1];
    for (i, row) in dp.iter_mut().enumerate() {
        row[0] = i;
    }
    for j in 0..=b.len() {
        dp[0][j] = j;
    }
    for i in 1..=a.len() {
        for j in 1..=b.len() {
            let cost = if a[i - 1] == b[j - 1] { 0 } else { 1 };
            dp[i][j] = (dp[i - 1][j] + 1)
                .min(dp[i][j - 1] + 1)
                .min(dp[i - 1][j - 1] + cost);
        }
    }
    dp[a.len()][b.len()]
}

fn word() -> impl Strategy<Value = String> {
    prop::string::string_regex("[a-e]{0,8}").unwrap()
}

proptest! {
    #[test]
    fn prop_distance_matches_oracle(a in word(), b in word()) {
        prop_assert_eq!(edit_distance(&a, &b), oracle(&a, &b));
    }

    #[test]
    fn prop_bounded_check_agrees_with_distance(a in word(), b in word(), k in 0usize..5) {
        prop_assert_eq!(levenshtein_within(&a, &b, k), oracle(&a, &b) <= k);
    }

    #[test]
    fn prop_distance_is_a_metric(a in word(), b in word(), c in word()) {
        prop_assert_eq!(edit_distance(&a, &b), edit_distance(&b, &a));
        prop_assert_eq!(edit_distance(&a, &b) == 0, a == b);
        prop_assert!(edit_distance(&a, &c) <= edit_distance(&a, &b) + edit_distance(&b, &c));
    }

    #[test]
    fn prop_threshold_floor_is_one(term in "[a-z]{1,20}") {
        let expected = (term.chars().count() / 5).max(1);
        prop_assert_eq!(fuzzy_threshold(&term), expected);
    }

    /// Five-letter terms tolerate exactly one edit.
    #[test]
    fn prop_five_letter_boundary(
        term in "[a-y]{5}",
        i in 0usize..5,
        j in 0usize..5,
    ) {
        let swap = |s: &str, at: usize| -> String {
            s.chars()
                .enumerate()
                .map(|(k, c)| if k == at { 'z' } else { c })
                .collect()
        };
        let one = swap(&term, i);
        prop_assert!(is_fuzzy_match(&term, &one));

        prop_assume!(i != j);
        let two = swap(&one, j);
        prop_assert!(!is_fuzzy_match(&term, &two));
    }
}
