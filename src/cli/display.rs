// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Terminal display for the capsule-search CLI.
//!
//! OneDark colors on a dark terminal, One Light on a light one. The theme comes
//! from `CAPSULE_SEARCH_THEME` when set, then the `COLORFGBG` hint, then
//! defaults to dark. Respects `NO_COLOR` and plain output for pipes.

use capsule_search::{
    highlight, EnhancedSearchResponse, Facets, IndexStats, SearchConfig, SearchResponse,
};
use std::collections::BTreeMap;
use std::sync::OnceLock;

/// Width between │ and │, excluding the border characters.
pub const BOX_WIDTH: usize = 80;

// ═══════════════════════════════════════════════════════════════════════════
// THEME
// ═══════════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Theme {
    Dark,
    Light,
}

static THEME: OnceLock<Theme> = OnceLock::new();

fn detect_theme() -> Theme {
    if let Ok(theme) = std::env::var("CAPSULE_SEARCH_THEME") {
        match theme.to_lowercase().as_str() {
            "light" | "l" => return Theme::Light,
            "dark" | "d" => return Theme::Dark,
            _ => {}
        }
    }

    // "fg;bg", background 7+ (except 8) is light
    if let Ok(colorfgbg) = std::env::var("COLORFGBG") {
        if let Some(bg) = colorfgbg.split(';').next_back() {
            if let Ok(bg) = bg.parse::<u8>() {
                if bg >= 7 && bg != 8 {
                    return Theme::Light;
                }
            }
        }
    }

    Theme::Dark
}

pub fn theme() -> Theme {
    *THEME.get_or_init(detect_theme)
}

pub const RESET: &str = "\x1b[0m";
pub const BOLD: &str = "\x1b[1m";
pub const DIM: &str = "\x1b[2m";

/// Palette entry as (dark, light) RGB.
#[derive(Clone, Copy)]
pub struct Color((u8, u8, u8), (u8, u8, u8));

pub const CYAN: Color = Color((86, 182, 194), (1, 132, 188));
pub const GREEN: Color = Color((152, 195, 121), (80, 161, 79));
pub const YELLOW: Color = Color((229, 192, 123), (193, 132, 1));
pub const MAGENTA: Color = Color((198, 120, 221), (166, 38, 164));
pub const GRAY: Color = Color((92, 99, 112), (160, 161, 167));

impl Color {
    fn escape(self) -> String {
        let (r, g, b) = match theme() {
            Theme::Dark => self.0,
            Theme::Light => self.1,
        };
        format!("\x1b[38;2;{};{};{}m", r, g, b)
    }
}

// ═══════════════════════════════════════════════════════════════════════════
// CORE UTILITIES
// ═══════════════════════════════════════════════════════════════════════════

pub fn use_colors() -> bool {
    if std::env::var("NO_COLOR").is_ok() {
        return false;
    }
    atty::is(atty::Stream::Stdout)
}

/// Color plus modifiers when writing to a terminal, plain text otherwise.
pub fn themed(color: Color, modifiers: &[&str], text: &str) -> String {
    if use_colors() {
        format!("{}{}{}{}", modifiers.join(""), color.escape(), text, RESET)
    } else {
        text.to_string()
    }
}

/// Length without ANSI escapes.
pub fn visible_len(s: &str) -> usize {
    let mut in_escape = false;
    let mut len = 0;
    for c in s.chars() {
        if c == '\x1b' {
            in_escape = true;
        } else if in_escape && c == 'm' {
            in_escape = false;
        } else if !in_escape {
            len += 1;
        }
    }
    len
}

fn border() -> String {
    if use_colors() {
        GRAY.escape()
    } else {
        String::new()
    }
}

fn reset() -> &'static str {
    if use_colors() {
        RESET
    } else {
        ""
    }
}

/// Cut to `width` visible characters, marking the cut with "...".
pub fn truncate(text: &str, width: usize) -> String {
    let flat: String = text.split_whitespace().collect::<Vec<_>>().join(" ");
    if flat.chars().count() <= width {
        return flat;
    }
    let kept: String = flat.chars().take(width.saturating_sub(3)).collect();
    format!("{}...", kept)
}

// ═══════════════════════════════════════════════════════════════════════════
// BOX DRAWING
// ═══════════════════════════════════════════════════════════════════════════

/// │ content          │
pub fn row(content: &str) {
    let pad = BOX_WIDTH.saturating_sub(visible_len(content));
    println!("{b}│{r}{}{}{b}│{r}", content, " ".repeat(pad), b = border(), r = reset());
}

/// ┌─ LABEL ──────────┐
pub fn section_top(label: &str) {
    let label_part = format!("─ {} ", themed(CYAN, &[BOLD], label));
    let remaining = BOX_WIDTH.saturating_sub(visible_len(&label_part));
    println!(
        "{b}┌{r}{}{b}{}┐{r}",
        label_part,
        "─".repeat(remaining),
        b = border(),
        r = reset()
    );
}

/// ├─ LABEL ──────────┤
pub fn section_mid(label: &str) {
    let label_part = format!("─ {} ", themed(CYAN, &[BOLD], label));
    let remaining = BOX_WIDTH.saturating_sub(visible_len(&label_part));
    println!(
        "{b}├{r}{}{b}{}┤{r}",
        label_part,
        "─".repeat(remaining),
        b = border(),
        r = reset()
    );
}

/// └──────────────────┘
pub fn section_bot() {
    println!("{}└{}┘{}", border(), "─".repeat(BOX_WIDTH), reset());
}

// ═══════════════════════════════════════════════════════════════════════════
// SEMANTIC FORMATTERS
// ═══════════════════════════════════════════════════════════════════════════

pub fn score(value: f64) -> String {
    themed(GREEN, &[BOLD], &format!("{:>6.1}", value))
}

/// Wrap query terms in the configured markers, then make them bold on a TTY.
pub fn emphasize(text: &str, query: &str, config: &SearchConfig) -> String {
    let terms: Vec<String> = std::iter::once(query.to_string())
        .chain(query.split_whitespace().map(str::to_string))
        .collect();
    if use_colors() {
        highlight(text, &terms, &format!("{}{}", BOLD, YELLOW.escape()), RESET)
    } else {
        highlight(text, &terms, &config.highlight_open, &config.highlight_close)
    }
}

fn counts_line(counts: &BTreeMap<String, usize>) -> String {
    counts
        .iter()
        .map(|(key, n)| format!("{} {}", key, themed(GRAY, &[], &format!("({})", n))))
        .collect::<Vec<_>>()
        .join(", ")
}

fn timing(ms: u64) -> String {
    themed(GRAY, &[DIM], &format!("{}ms", ms))
}

// ═══════════════════════════════════════════════════════════════════════════
// REPORTS
// ═══════════════════════════════════════════════════════════════════════════

pub fn print_stats(stats: &IndexStats) {
    section_top("INDEX");
    for (label, value) in [
        ("sections", stats.sections),
        ("keywords", stats.keywords),
        ("phrases", stats.phrases),
        ("tags", stats.tags),
        ("categories", stats.categories),
        ("section types", stats.section_types),
    ] {
        row(&format!("  {:<16}{}", label, themed(CYAN, &[], &value.to_string())));
    }
    section_bot();
}

fn print_facets(facets: &Facets) {
    for (label, counts) in [
        ("tags", &facets.tags),
        ("categories", &facets.categories),
        ("types", &facets.section_types),
    ] {
        if !counts.is_empty() {
            row(&format!("  {:<12}{}", label, truncate(&counts_line(counts), BOX_WIDTH - 14)));
        }
    }
}

fn print_suggestions(suggestions: &[String]) {
    if !suggestions.is_empty() {
        section_mid("DID YOU MEAN");
        row(&format!("  {}", themed(MAGENTA, &[], &suggestions.join(", "))));
    }
}

pub fn print_search(response: &SearchResponse, config: &SearchConfig) {
    section_top(&format!(
        "{} of {} sections for \"{}\"",
        response.results.len(),
        response.total_results,
        truncate(&response.query, 30)
    ));
    if response.results.is_empty() {
        row("  no matches");
    }
    for result in &response.results {
        row(&format!(
            "{}  {} {}",
            score(result.score),
            themed(CYAN, &[BOLD], &truncate(&result.title, 50)),
            themed(GRAY, &[], &format!("[{}]", result.section_type))
        ));
        for m in result.matches.iter().take(2) {
            let context = truncate(&m.context, BOX_WIDTH - 10);
            row(&format!("        {}", emphasize(&context, &response.query, config)));
        }
    }
    if !response.results.is_empty() {
        section_mid("FACETS");
        print_facets(&response.facets);
    }
    print_suggestions(&response.suggestions);
    section_bot();
    println!("  {}", timing(response.search_time_ms));
}

pub fn print_across(response: &EnhancedSearchResponse, config: &SearchConfig) {
    section_top(&format!(
        "{} of {} capsules for \"{}\"",
        response.results.len(),
        response.total_results,
        truncate(&response.query, 30)
    ));
    if response.results.is_empty() {
        row("  no matches");
    }
    for capsule in &response.results {
        row(&format!(
            "{}  {} {}",
            score(capsule.total_relevance_score),
            themed(CYAN, &[BOLD], &truncate(&capsule.video_title, 50)),
            themed(GRAY, &[], &format!("[{}]", capsule.metadata.category))
        ));
        for hit in capsule.sections.iter().take(3) {
            row(&format!(
                "        {} {}",
                themed(GREEN, &[], &format!("{:>5.1}", hit.relevance_score)),
                truncate(&hit.section.section.title, 60)
            ));
            let snippet = truncate(&hit.snippet, BOX_WIDTH - 14);
            row(&format!("              {}", emphasize(&snippet, &response.query, config)));
        }
    }

    let agg = &response.aggregations;
    section_mid("SUMMARY");
    row(&format!(
        "  {} capsules, {} sections, average relevance {:.1}",
        agg.total_capsules, agg.total_sections, agg.average_relevance
    ));
    if !agg.difficulty_distribution.is_empty() {
        row(&format!("  difficulty  {}", counts_line(&agg.difficulty_distribution)));
    }
    if !agg.top_tags.is_empty() {
        let tags: Vec<String> = agg
            .top_tags
            .iter()
            .map(|t| format!("{} ({})", t.value, t.count))
            .collect();
        row(&format!("  top tags    {}", truncate(&tags.join(", "), BOX_WIDTH - 14)));
    }
    print_suggestions(&response.suggestions);
    section_bot();
    println!("  {}", timing(response.search_time_ms));
}
