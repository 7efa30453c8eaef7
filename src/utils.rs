// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Utility functions for string processing.
//!
//! Tokenization here is deliberately simple: whitespace split, then strip
//! everything that isn't a word character. No stemming, no stop words.

/// Word characters in the regex `\w` sense: alphanumerics plus underscore.
#[inline]
pub fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

/// Lowercase unless the caller asked for case-sensitive matching.
pub fn normalize(value: &str, case_sensitive: bool) -> String {
    if case_sensitive {
        value.to_string()
    } else {
        value.to_lowercase()
    }
}

/// Drop every non-word character from a token.
///
/// - "learning," → "learning"
/// - "don't" → "dont"
/// - "c++" → "c"
pub fn clean_token(token: &str) -> String {
    token.chars().filter(|c| is_word_char(*c)).collect()
}

/// Drop punctuation from a phrase but keep its inner whitespace.
pub fn clean_phrase(phrase: &str) -> String {
    phrase
        .chars()
        .filter(|c| is_word_char(*c) || c.is_whitespace())
        .collect()
}

/// Parse a query string into whitespace-separated, non-empty terms.
///
/// # Example
///
/// ```ignore
/// let terms = parse_query("Machine   Learning", false);
/// assert_eq!(terms, vec!["machine", "learning"]);
/// ```
pub fn parse_query(query: &str, case_sensitive: bool) -> Vec<String> {
    normalize(query, case_sensitive)
        .split_whitespace()
        .map(str::to_string)
        .collect()
}

/// Count non-overlapping occurrences of `needle` in `haystack`.
///
/// An empty needle occurs zero times.
pub fn count_occurrences(haystack: &str, needle: &str) -> usize {
    if needle.is_empty() {
        return 0;
    }
    haystack.matches(needle).count()
}

/// Character index of a byte offset. The offset must be on a char boundary.
pub fn byte_to_char_index(text: &str, byte_offset: usize) -> usize {
    text[..byte_offset].chars().count()
}

/// Slice by character positions, clamped to the text.
pub fn char_slice(text: &str, start: usize, end: usize) -> &str {
    let mut indices = text.char_indices().map(|(i, _)| i).chain(std::iter::once(text.len()));
    let start_byte = indices.nth(start).unwrap_or(text.len());
    let end_byte = if end > start {
        indices.nth(end - start - 1).unwrap_or(text.len())
    } else {
        start_byte
    };
    &text[start_byte..end_byte]
}
