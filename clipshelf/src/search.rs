//! Fuzzy matching and ranking for history search.
//!
//! Scores are ranks, not similarities: lower is better. Substring hits
//! rank by the position of their first occurrence, subsequence hits sit in
//! a band above every substring hit, and everything else gets the no-match
//! sentinel. Highlighting lives here too but is a pure rendering helper
//! with no influence on ranking.

use crate::models::Entry;

/// Sentinel "no match" score; anything at or above it is filtered out.
/// An empty term matches nothing by this scorer.
pub const NO_MATCH_SCORE: i64 = 10_000;

/// Base score for subsequence matches, keeping every subsequence hit
/// ranked below every substring hit.
const SUBSEQUENCE_BASE: i64 = 5_000;

/// Score `text` against `term`, case-insensitively. Substring matches
/// score their first-occurrence index; subsequence matches score
/// `SUBSEQUENCE_BASE` plus the index gaps consumed while greedily matching
/// left to right, rewarding characters clustered near the start.
pub fn score(text: &str, term: &str) -> i64 {
    if term.is_empty() {
        return NO_MATCH_SCORE;
    }
    let text = lower_chars(text);
    let term = lower_chars(term);

    if let Some(pos) = find_substring(&text, &term) {
        return pos as i64;
    }
    match subsequence_gaps(&text, &term) {
        Some(gaps) => SUBSEQUENCE_BASE + gaps,
        None => NO_MATCH_SCORE,
    }
}

/// Filter `entries` to those matching `term`, stably sorted by ascending
/// score; ties keep their original (recency) order.
pub fn filter_and_rank(entries: &[Entry], term: &str) -> Vec<Entry> {
    let mut scored: Vec<(i64, &Entry)> = entries
        .iter()
        .map(|entry| (score(&entry.value, term), entry))
        .filter(|(s, _)| *s < NO_MATCH_SCORE)
        .collect();
    scored.sort_by_key(|(s, _)| *s);
    scored.into_iter().map(|(_, entry)| entry.clone()).collect()
}

/// Wrap every case-insensitive occurrence of `term` in `text` with the
/// given markers. Rendering concern only; never affects ranking.
pub fn highlight(text: &str, term: &str, open: &str, close: &str) -> String {
    if term.is_empty() {
        return text.to_string();
    }
    let chars: Vec<char> = text.chars().collect();
    let lower = lower_chars(text);
    let term = lower_chars(term);

    let mut out = String::with_capacity(text.len());
    let mut i = 0;
    while i < chars.len() {
        if i + term.len() <= lower.len() && lower[i..i + term.len()] == term[..] {
            out.push_str(open);
            out.extend(&chars[i..i + term.len()]);
            out.push_str(close);
            i += term.len();
        } else {
            out.push(chars[i]);
            i += 1;
        }
    }
    out
}

/// Per-char lowercasing keeps indices aligned with the original text
/// (String::to_lowercase can change the char count).
fn lower_chars(s: &str) -> Vec<char> {
    s.chars()
        .map(|c| c.to_lowercase().next().unwrap_or(c))
        .collect()
}

fn find_substring(text: &[char], term: &[char]) -> Option<usize> {
    if term.len() > text.len() {
        return None;
    }
    (0..=text.len() - term.len()).find(|&i| text[i..i + term.len()] == *term)
}

/// Greedy left-to-right subsequence match; returns the summed index gaps,
/// or `None` when some term character never appears in order.
fn subsequence_gaps(text: &[char], term: &[char]) -> Option<i64> {
    let mut gaps = 0i64;
    let mut pos = 0usize;
    for &c in term {
        let skipped = text[pos..].iter().position(|&t| t == c)?;
        gaps += skipped as i64;
        pos += skipped + 1;
    }
    Some(gaps)
}
