//! JSON-facing diagnostic reports and plain-text help.
//!
//! Help text is always safe to print: it is built from static labels and the
//! pattern, with control characters in the pattern escaped.

use serde::{Deserialize, Serialize};
use std::fmt::Write;

use crate::library::LibraryEntry;
use crate::pattern::{PatternDiagnostic, PatternError, ceil_boundary, floor_boundary};
use crate::suggest::{NoMatchSuggestions, name_matches};

/// Characters of context shown on each side of a caret pointer.
const POINTER_CONTEXT: usize = 10;

const RULE_WIDTH: usize = 50;

/// The serialized shape of a diagnostic, as handed to callers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DiagnosticReport {
    pub pattern: String,
    pub language: String,
    pub is_valid: bool,
    pub errors: Vec<PatternError>,
    pub suggestions: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub corrected_pattern: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub correction_confidence: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub original_error: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub help_message: Option<String>,
}

impl DiagnosticReport {
    /// Builds a report, exposing the correction only above `threshold`.
    pub fn new(diagnostic: &PatternDiagnostic, threshold: f64) -> Self {
        let confident = diagnostic
            .corrected_pattern
            .as_ref()
            .filter(|_| diagnostic.confidence_score > threshold);

        Self {
            pattern: diagnostic.pattern.clone(),
            language: diagnostic.language.clone(),
            is_valid: diagnostic.is_valid,
            errors: diagnostic.errors.clone(),
            suggestions: diagnostic.suggestions.clone(),
            corrected_pattern: confident.cloned(),
            correction_confidence: confident.map(|_| diagnostic.confidence_score),
            original_error: None,
            help_message: None,
        }
    }

    pub fn with_original_error(mut self, message: impl Into<String>) -> Self {
        self.original_error = Some(message.into());
        self
    }

    pub fn with_help(mut self, help: String) -> Self {
        self.help_message = Some(help);
        self
    }

    /// True when the report should carry a help message.
    pub fn needs_help(&self) -> bool {
        !self.is_valid || self.original_error.is_some()
    }

    pub fn to_json(&self) -> crate::error::Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

/// Limits for the help message sections.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HelpLimits {
    pub errors: usize,
    pub suggestions: usize,
    pub examples: usize,
}

impl Default for HelpLimits {
    fn default() -> Self {
        Self {
            errors: 3,
            suggestions: 3,
            examples: 3,
        }
    }
}

/// Escapes control characters so the text prints on one line.
pub fn escape_control(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        if c.is_control() {
            out.extend(c.escape_default());
        } else {
            out.push(c);
        }
    }
    out
}

fn display_width(text: &str) -> usize {
    escape_control(text).chars().count()
}

/// Renders a context window around an error span and a caret line under it.
///
/// Returns `(context, pointer)`.
pub fn caret_pointer(pattern: &str, position: usize, length: usize) -> (String, String) {
    let position = floor_boundary(pattern, position);
    let span_end = ceil_boundary(pattern, position + length.max(1));
    let start = floor_boundary(pattern, position.saturating_sub(POINTER_CONTEXT));
    let end = ceil_boundary(pattern, span_end + POINTER_CONTEXT);

    let context = escape_control(&pattern[start..end]);
    let lead = display_width(&pattern[start..position]);
    let carets = display_width(&pattern[position..span_end]).max(1);
    let pointer = format!("{}{}", " ".repeat(lead), "^".repeat(carets));
    (context, pointer)
}

fn title_case(snake: &str) -> String {
    snake
        .split('_')
        .filter(|w| !w.is_empty())
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// Picks library entries related to the pattern by name keywords, falling
/// back to the first entries.
pub fn relevant_examples<'a>(
    pattern: &str,
    entries: &'a [LibraryEntry],
    limit: usize,
) -> Vec<&'a LibraryEntry> {
    let lowered = pattern.to_lowercase();
    let related: Vec<&LibraryEntry> = entries
        .iter()
        .filter(|e| name_matches(&e.name, &lowered))
        .take(limit)
        .collect();

    if related.is_empty() {
        entries.iter().take(limit).collect()
    } else {
        related
    }
}

/// Renders the multi-section help message for a diagnostic.
///
/// `corrected` is the correction to show, if any passed the threshold.
pub fn render_help(
    diagnostic: &PatternDiagnostic,
    corrected: Option<&str>,
    entries: &[LibraryEntry],
    limits: HelpLimits,
) -> String {
    let mut out = String::new();
    let pattern = &diagnostic.pattern;

    writeln!(out, "Pattern Analysis Results").unwrap();
    writeln!(out, "{}", "=".repeat(RULE_WIDTH)).unwrap();
    writeln!(out, "\nYour Pattern: {}", escape_control(pattern)).unwrap();
    if let Some(fix) = corrected {
        writeln!(out, "Suggested Fix: {}", escape_control(fix)).unwrap();
    }

    let critical: Vec<&PatternError> = diagnostic.critical_errors().take(limits.errors).collect();
    if !critical.is_empty() {
        writeln!(out, "\nCritical Issues Found:").unwrap();
        for (i, error) in critical.iter().enumerate() {
            writeln!(out, "\n{}. {}", i + 1, escape_control(&error.message)).unwrap();
            if let Some(position) = error.position {
                let (context, pointer) =
                    caret_pointer(pattern, position, error.length.unwrap_or(1));
                writeln!(out, "   Pattern: ...{context}...").unwrap();
                writeln!(out, "   Error:   ...{pointer}...").unwrap();
            }
            if let Some(suggestion) = &error.suggestion {
                writeln!(out, "   Fix: {}", escape_control(suggestion)).unwrap();
            }
        }
    }

    if !diagnostic.suggestions.is_empty() {
        writeln!(out, "\nPattern Examples:").unwrap();
        for suggestion in diagnostic.suggestions.iter().take(limits.suggestions) {
            writeln!(out, "  * {}", escape_control(suggestion)).unwrap();
        }
    }

    let examples = relevant_examples(pattern, entries, limits.examples);
    if !examples.is_empty() {
        writeln!(out, "\nCommon {} Patterns:", title_case(&diagnostic.language)).unwrap();
        for entry in examples {
            writeln!(
                out,
                "  * {}: {}",
                title_case(&entry.name),
                escape_control(&entry.pattern)
            )
            .unwrap();
        }
    }

    out
}

const GENERAL_TIPS: &[&str] = &[
    "Use $VAR to match any single expression/identifier",
    "Use $$$VAR to match multiple expressions/statements",
    "Use $_ as a wildcard to match any single node",
    "Ensure your pattern follows the exact syntax of the language",
];

fn numbered(out: &mut String, heading: &str, items: &[String], limit: usize) {
    if items.is_empty() {
        return;
    }
    writeln!(out, "\n{heading}").unwrap();
    for (i, item) in items.iter().take(limit).enumerate() {
        writeln!(out, "  {}. {}", i + 1, escape_control(item)).unwrap();
    }
}

/// Renders guidance for a pattern that is well-formed but matched nothing.
pub fn render_no_match(
    pattern: &str,
    language: &str,
    suggestions: &NoMatchSuggestions,
    language_tips: &[&str],
    limit: usize,
) -> String {
    let mut out = String::new();
    writeln!(
        out,
        "Pattern '{}' did not match any {} code.",
        escape_control(pattern),
        language
    )
    .unwrap();
    write!(out, "\nTroubleshooting Tips:").unwrap();

    numbered(&mut out, "Did you mean:", &suggestions.variants, limit);
    numbered(
        &mut out,
        "Similar patterns from library:",
        &suggestions.similar_patterns,
        limit,
    );
    numbered(
        &mut out,
        "Example patterns for this language:",
        &suggestions.examples,
        limit,
    );

    writeln!(out, "\nPattern Writing Tips:").unwrap();
    for tip in GENERAL_TIPS {
        writeln!(out, "  - {tip}").unwrap();
    }
    if !language_tips.is_empty() {
        writeln!(out, "\n  {}-specific:", title_case(language)).unwrap();
        for tip in language_tips {
            writeln!(out, "  - {tip}").unwrap();
        }
    }
    write!(out, "\n  Try simpler patterns first, then add complexity").unwrap();

    out
}
