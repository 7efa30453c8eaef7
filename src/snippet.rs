// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Context windows, snippets and highlight markup.
//!
//! Both search paths cut text around a match the same way: take `radius`
//! characters either side, and mark each truncated end with `"..."`. The
//! indexed engine does it per full-text match, the aggregator once per section.
//! All positions are character positions, never bytes.

use crate::utils::{byte_to_char_index, char_slice};
use regex::RegexBuilder;

pub const ELLIPSIS: &str = "...";

/// Text around a match at `position` spanning `length` characters.
///
/// ```ignore
/// assert_eq!(context_window("abcdefghij", 4, 2, 2), "...cdefgh...");
/// ```
pub fn context_window(text: &str, position: usize, length: usize, radius: usize) -> String {
    let total = text.chars().count();
    let start = position.saturating_sub(radius).min(total);
    let end = position.saturating_add(length).saturating_add(radius).min(total);

    let mut out = String::new();
    if start > 0 {
        out.push_str(ELLIPSIS);
    }
    out.push_str(char_slice(text, start, end));
    if end < total {
        out.push_str(ELLIPSIS);
    }
    out
}

/// Snippet of `content` around the first case-insensitive occurrence of
/// `query`, or its first `fallback_length` characters when there is none.
pub fn snippet(content: &str, query: &str, radius: usize, fallback_length: usize) -> String {
    if let Some(found) = first_occurrence(content, query) {
        let position = byte_to_char_index(content, found.start());
        let length = found.as_str().chars().count();
        return context_window(content, position, length, radius);
    }

    let total = content.chars().count();
    if total <= fallback_length {
        content.to_string()
    } else {
        format!("{}{}", char_slice(content, 0, fallback_length), ELLIPSIS)
    }
}

/// First case-insensitive match of `query` in `content`, located in the
/// original text so offsets stay valid whatever lowercasing does elsewhere.
fn first_occurrence<'t>(content: &'t str, query: &str) -> Option<regex::Match<'t>> {
    let query = query.trim();
    if query.is_empty() {
        return None;
    }
    match RegexBuilder::new(&regex::escape(query)).case_insensitive(true).build() {
        Ok(re) => re.find(content),
        Err(e) => {
            log::warn!("snippet pattern rejected: {}", e);
            None
        }
    }
}

/// Wrap every case-insensitive occurrence of any term in `open`/`close`.
///
/// Longer terms win when terms overlap ("machine learning" before "machine").
pub fn highlight(text: &str, terms: &[String], open: &str, close: &str) -> String {
    let mut terms: Vec<&str> = terms
        .iter()
        .map(|t| t.trim())
        .filter(|t| !t.is_empty())
        .collect();
    if terms.is_empty() {
        return text.to_string();
    }
    terms.sort_by(|a, b| b.chars().count().cmp(&a.chars().count()).then(a.cmp(b)));
    terms.dedup();

    let pattern = terms
        .iter()
        .map(|t| regex::escape(t))
        .collect::<Vec<_>>()
        .join("|");
    match RegexBuilder::new(&pattern).case_insensitive(true).build() {
        Ok(re) => re
            .replace_all(text, |caps: &regex::Captures<'_>| {
                format!("{}{}{}", open, &caps[0], close)
            })
            .into_owned(),
        Err(e) => {
            log::warn!("highlight pattern rejected: {}", e);
            text.to_string()
        }
    }
}
