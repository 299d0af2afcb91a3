//! Data model for pattern diagnostics.
//!
//! A pattern is a plain string in the structural-match mini-language: literal
//! source tokens interleaved with capture tokens. `$NAME` captures exactly one
//! node and `$$$NAME` captures zero or more. Two sigils is never valid.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Ordinal classification of a finding. Only [`Severity::Critical`] blocks validity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Info,
    Warning,
    Error,
    Critical,
}

impl Severity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Info => "info",
            Severity::Warning => "warning",
            Severity::Error => "error",
            Severity::Critical => "critical",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The tag identifying which defect a [`PatternError`] describes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    EmptyPattern,
    ExtraClosingBracket,
    MismatchedBracket,
    UnclosedBracket,
    InvalidVariadic,
    EmptyMetavarName,
    InvalidMetavarName,
    MissingDollar,
    SpaceAfterDollar,
    Typo,
    MissingColon,
    InvalidArrowFunction,
}

impl ErrorKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorKind::EmptyPattern => "empty_pattern",
            ErrorKind::ExtraClosingBracket => "extra_closing_bracket",
            ErrorKind::MismatchedBracket => "mismatched_bracket",
            ErrorKind::UnclosedBracket => "unclosed_bracket",
            ErrorKind::InvalidVariadic => "invalid_variadic",
            ErrorKind::EmptyMetavarName => "empty_metavar_name",
            ErrorKind::InvalidMetavarName => "invalid_metavar_name",
            ErrorKind::MissingDollar => "missing_dollar",
            ErrorKind::SpaceAfterDollar => "space_after_dollar",
            ErrorKind::Typo => "typo",
            ErrorKind::MissingColon => "missing_colon",
            ErrorKind::InvalidArrowFunction => "invalid_arrow_function",
        }
    }

    /// Parses the snake_case tag used in JSON output.
    pub fn parse(tag: &str) -> Option<Self> {
        const ALL: [ErrorKind; 12] = [
            ErrorKind::EmptyPattern,
            ErrorKind::ExtraClosingBracket,
            ErrorKind::MismatchedBracket,
            ErrorKind::UnclosedBracket,
            ErrorKind::InvalidVariadic,
            ErrorKind::EmptyMetavarName,
            ErrorKind::InvalidMetavarName,
            ErrorKind::MissingDollar,
            ErrorKind::SpaceAfterDollar,
            ErrorKind::Typo,
            ErrorKind::MissingColon,
            ErrorKind::InvalidArrowFunction,
        ];
        ALL.into_iter().find(|k| k.as_str() == tag)
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single finding produced by one checker.
///
/// `position` and `length` are byte offsets into the original pattern, never
/// into a corrected version of it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PatternError {
    #[serde(rename = "type")]
    pub kind: ErrorKind,
    pub message: String,
    pub severity: Severity,
    pub position: Option<usize>,
    pub length: Option<usize>,
    pub suggestion: Option<String>,
    pub auto_fixable: bool,
}

impl PatternError {
    /// Creates a finding without location, suggestion, or fix.
    pub fn new(kind: ErrorKind, severity: Severity, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            severity,
            position: None,
            length: None,
            suggestion: None,
            auto_fixable: false,
        }
    }

    /// Sets the byte span of the finding.
    pub fn at(mut self, position: usize, length: usize) -> Self {
        self.position = Some(position);
        self.length = Some(length);
        self
    }

    /// Attaches a human-readable suggestion.
    pub fn suggest(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestion = Some(suggestion.into());
        self
    }

    /// Marks the finding as mechanically fixable.
    pub fn fixable(mut self) -> Self {
        self.auto_fixable = true;
        self
    }

    pub fn is_critical(&self) -> bool {
        self.severity == Severity::Critical
    }
}

/// The full result of analyzing one pattern.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PatternDiagnostic {
    pub pattern: String,
    pub language: String,
    pub errors: Vec<PatternError>,
    pub suggestions: Vec<String>,
    pub corrected_pattern: Option<String>,
    pub confidence_score: f64,
    pub is_valid: bool,
}

impl PatternDiagnostic {
    /// Returns the CRITICAL findings in report order.
    pub fn critical_errors(&self) -> impl Iterator<Item = &PatternError> {
        self.errors.iter().filter(|e| e.is_critical())
    }

    /// Returns true if any finding has the given kind.
    pub fn has_error(&self, kind: ErrorKind) -> bool {
        self.errors.iter().any(|e| e.kind == kind)
    }

    /// Returns all findings of the given kind.
    pub fn errors_of(&self, kind: ErrorKind) -> Vec<&PatternError> {
        self.errors.iter().filter(|e| e.kind == kind).collect()
    }
}

/// A candidate rewrite of a pattern, ranked by confidence.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Suggestion {
    pub original: String,
    pub suggested: String,
    pub confidence: f64,
    pub reason: String,
    pub applied_fixes: Vec<String>,
}

/// Returns true for bytes that may appear in a capture name.
pub(crate) fn is_ident_byte(b: u8) -> bool {
    b.is_ascii_alphanumeric() || b == b'_'
}

/// Rounds `index` down to the nearest char boundary of `s`.
pub(crate) fn floor_boundary(s: &str, index: usize) -> usize {
    let mut i = index.min(s.len());
    while !s.is_char_boundary(i) {
        i -= 1;
    }
    i
}

/// Rounds `index` up to the nearest char boundary of `s`.
pub(crate) fn ceil_boundary(s: &str, index: usize) -> usize {
    let mut i = index.min(s.len());
    while !s.is_char_boundary(i) {
        i += 1;
    }
    i
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_severity_ordering() {
        assert!(Severity::Info < Severity::Warning);
        assert!(Severity::Warning < Severity::Error);
        assert!(Severity::Error < Severity::Critical);
    }

    #[test]
    fn test_error_serializes_type_tag() {
        let err = PatternError::new(ErrorKind::UnclosedBracket, Severity::Critical, "Unclosed '('")
            .at(3, 1)
            .fixable();

        let json = serde_json::to_value(&err).unwrap();
        assert_eq!(json["type"], "unclosed_bracket");
        assert_eq!(json["severity"], "critical");
        assert_eq!(json["position"], 3);
        assert_eq!(json["auto_fixable"], true);
        assert!(json["suggestion"].is_null());
    }

    #[test]
    fn test_error_kind_parse() {
        assert_eq!(ErrorKind::parse("missing_colon"), Some(ErrorKind::MissingColon));
        assert_eq!(ErrorKind::parse("nope"), None);

        for kind in [ErrorKind::UnclosedBracket, ErrorKind::MissingDollar, ErrorKind::Typo] {
            let tag = serde_json::to_value(kind).unwrap();
            assert_eq!(ErrorKind::parse(tag.as_str().unwrap()), Some(kind));
        }
    }

    #[test]
    fn test_char_boundaries() {
        let s = "a€b";
        assert_eq!(floor_boundary(s, 2), 1);
        assert_eq!(ceil_boundary(s, 2), 4);
        assert_eq!(floor_boundary(s, 99), s.len());
    }
}
