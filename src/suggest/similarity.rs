//! Lexical similarity between a pattern and library entries.

use crate::library::LibraryEntry;
use similar::TextDiff;

/// Splits a pattern into identifier and symbol runs.
///
/// Capture tokens are normalized to their sigil class (`$`, `$$`, `$$$`) so
/// that `$NAME` and `$FUNC` compare as equal.
pub fn tokenize(pattern: &str) -> Vec<&str> {
    let bytes = pattern.as_bytes();
    let mut tokens = Vec::new();
    let mut i = 0;

    while i < bytes.len() {
        let b = bytes[i];
        if b.is_ascii_whitespace() {
            i += 1;
        } else if b == b'$' {
            let sigils = bytes[i..].iter().take_while(|&&c| c == b'$').count();
            i += sigils;
            while i < bytes.len() && is_word(bytes[i]) {
                i += 1;
            }
            tokens.push(match sigils {
                1 => "$",
                2 => "$$",
                _ => "$$$",
            });
        } else if is_word(b) {
            let start = i;
            while i < bytes.len() && is_word(bytes[i]) {
                i += 1;
            }
            tokens.push(&pattern[start..i]);
        } else {
            let start = i;
            while i < bytes.len() && is_symbol(bytes[i]) {
                i += 1;
            }
            tokens.push(&pattern[start..i]);
        }
    }

    tokens
}

// Non-ASCII bytes count as word bytes so runs never split a char.
fn is_word(b: u8) -> bool {
    b.is_ascii_alphanumeric() || b == b'_' || !b.is_ascii()
}

fn is_symbol(b: u8) -> bool {
    !b.is_ascii_whitespace() && !is_word(b) && b != b'$'
}

/// Returns the sequence-similarity ratio of two patterns in `[0.0, 1.0]`.
pub fn similarity(a: &str, b: &str) -> f64 {
    let left = tokenize(a);
    let right = tokenize(b);
    f64::from(TextDiff::from_slices(left.as_slice(), right.as_slice()).ratio())
}

/// A library entry scored against a pattern.
#[derive(Debug, Clone, PartialEq)]
pub struct ScoredEntry<'a> {
    pub entry: &'a LibraryEntry,
    pub score: f64,
}

/// Scores every entry and returns those at or above `cutoff`, best first.
///
/// Ties keep library order.
pub fn rank<'a>(pattern: &str, entries: &'a [LibraryEntry], cutoff: f64) -> Vec<ScoredEntry<'a>> {
    let mut scored: Vec<ScoredEntry<'a>> = entries
        .iter()
        .map(|entry| ScoredEntry {
            entry,
            score: similarity(pattern, &entry.pattern),
        })
        .filter(|s| s.score >= cutoff)
        .collect();
    scored.sort_by(|a, b| b.score.total_cmp(&a.score));
    scored
}
