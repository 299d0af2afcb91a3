//! The seam to an external structural matching engine.
//!
//! The doctor never matches code itself. A [`MatchEngine`] does, and
//! [`explain_search`] wraps one so that a failed or empty search comes back
//! with a diagnostic report explaining why.

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::analyzer::PatternAnalyzer;
use crate::error::Result;
use crate::report::DiagnosticReport;

/// A zero-based line and column in the searched source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Point {
    pub line: usize,
    pub column: usize,
}

/// A half-open source span.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Range {
    pub start: Point,
    pub end: Point,
}

/// One match returned by the engine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EngineMatch {
    pub text: String,
    pub range: Range,
}

/// A syntax node bound to a capture variable.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CapturedNode {
    pub text: String,
    pub range: Range,
}

/// An external structural matcher.
pub trait MatchEngine {
    /// Finds every match of `pattern` in `source`.
    ///
    /// Returns [`crate::error::DoctorError::Engine`] when the engine rejects the pattern.
    fn find_all(&self, source: &str, language: &str, pattern: &str) -> Result<Vec<EngineMatch>>;

    /// Returns the node bound to a single capture, e.g. `NAME` for `$NAME`.
    fn get_capture(&self, found: &EngineMatch, name: &str) -> Option<CapturedNode>;

    /// Returns the nodes bound to a multi capture, e.g. `ARGS` for `$$$ARGS`.
    fn get_multi_capture(&self, found: &EngineMatch, name: &str) -> Vec<CapturedNode>;
}

/// The result of a search run through [`explain_search`].
#[derive(Debug, Clone, PartialEq)]
pub struct SearchOutcome {
    pub matches: Vec<EngineMatch>,
    /// Present when the pattern was invalid, the engine failed, or nothing matched.
    pub report: Option<DiagnosticReport>,
    /// No-match guidance, present only when a valid pattern matched nothing.
    pub guidance: Option<String>,
}

impl SearchOutcome {
    pub fn is_success(&self) -> bool {
        !self.matches.is_empty()
    }
}

/// Validates a pattern, runs the engine, and explains any failure.
///
/// A pattern with critical errors never reaches the engine.
pub fn explain_search(
    analyzer: &PatternAnalyzer,
    engine: &dyn MatchEngine,
    source: &str,
    language: &str,
    pattern: &str,
) -> SearchOutcome {
    let report = analyzer.report(pattern, language, Some(source), None);
    if !report.is_valid {
        debug!(pattern, language, "pattern rejected before search");
        return SearchOutcome {
            matches: Vec::new(),
            report: Some(report),
            guidance: None,
        };
    }

    match engine.find_all(source, language, pattern) {
        Ok(matches) if matches.is_empty() => {
            debug!(pattern, language, "search matched nothing");
            SearchOutcome {
                matches,
                report: Some(report),
                guidance: Some(analyzer.no_match_message(pattern, language)),
            }
        }
        Ok(matches) => {
            debug!(pattern, language, matches = matches.len(), "search succeeded");
            SearchOutcome {
                matches,
                report: None,
                guidance: None,
            }
        }
        Err(err) => {
            warn!(pattern, language, error = %err, "matching engine failed");
            let message = err.to_string();
            SearchOutcome {
                matches: Vec::new(),
                report: Some(analyzer.report(pattern, language, Some(source), Some(&message))),
                guidance: None,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::DoctorError;

    /// Matches lines containing a literal prefix of the pattern.
    struct LineEngine;

    impl LineEngine {
        fn literal(pattern: &str) -> &str {
            pattern.split('$').next().unwrap_or("").trim()
        }
    }

    impl MatchEngine for LineEngine {
        fn find_all(&self, source: &str, _language: &str, pattern: &str) -> Result<Vec<EngineMatch>> {
            if pattern.contains("!!") {
                return Err(DoctorError::Engine {
                    message: "unexpected token '!!'".to_string(),
                });
            }
            let literal = Self::literal(pattern);
            Ok(source
                .lines()
                .enumerate()
                .filter(|(_, line)| !literal.is_empty() && line.contains(literal))
                .map(|(i, line)| EngineMatch {
                    text: line.to_string(),
                    range: Range {
                        start: Point { line: i, column: 0 },
                        end: Point {
                            line: i,
                            column: line.len(),
                        },
                    },
                })
                .collect())
        }

        fn get_capture(&self, found: &EngineMatch, _name: &str) -> Option<CapturedNode> {
            let word = found.text.split_whitespace().nth(1)?;
            Some(CapturedNode {
                text: word.to_string(),
                range: found.range,
            })
        }

        fn get_multi_capture(&self, found: &EngineMatch, _name: &str) -> Vec<CapturedNode> {
            found
                .text
                .split_whitespace()
                .skip(1)
                .map(|w| CapturedNode {
                    text: w.to_string(),
                    range: found.range,
                })
                .collect()
        }
    }

    const SOURCE: &str = "def main():\n    print(1)\ndef helper(x):\n    return x\n";

    #[test]
    fn test_successful_search() {
        let analyzer = PatternAnalyzer::new().unwrap();
        let outcome = explain_search(&analyzer, &LineEngine, SOURCE, "python", "def $NAME($$$P):");
        assert!(outcome.is_success());
        assert_eq!(outcome.matches.len(), 2);
        assert!(outcome.report.is_none());

        let first = &outcome.matches[0];
        assert_eq!(first.range.start.line, 0);
        assert_eq!(
            LineEngine.get_capture(first, "NAME").unwrap().text,
            "main():"
        );
        assert_eq!(LineEngine.get_multi_capture(&outcome.matches[1], "P").len(), 1);
    }

    #[test]
    fn test_invalid_pattern_skips_engine() {
        let analyzer = PatternAnalyzer::new().unwrap();
        let outcome = explain_search(&analyzer, &LineEngine, SOURCE, "python", "def $F(!!");
        assert!(outcome.matches.is_empty());
        let report = outcome.report.unwrap();
        assert!(!report.is_valid);
        assert!(report.original_error.is_none());
        assert!(report.help_message.is_some());
    }

    #[test]
    fn test_engine_error_is_explained() {
        let analyzer = PatternAnalyzer::new().unwrap();
        let outcome = explain_search(&analyzer, &LineEngine, SOURCE, "python", "def $F(): !!");
        let report = outcome.report.unwrap();
        assert!(report.is_valid);
        assert_eq!(
            report.original_error.as_deref(),
            Some("Matching engine error: unexpected token '!!'")
        );
        assert!(report.help_message.is_some());
    }

    #[test]
    fn test_no_match_gets_guidance() {
        let analyzer = PatternAnalyzer::new().unwrap();
        let outcome = explain_search(&analyzer, &LineEngine, SOURCE, "python", "class $NAME:");
        assert!(!outcome.is_success());
        assert!(outcome.report.is_some());
        let guidance = outcome.guidance.unwrap();
        assert!(guidance.starts_with("Pattern 'class $NAME:' did not match any python code."));
    }
}
