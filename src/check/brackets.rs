//! Stack-based bracket balance checking.
//!
//! The scan is deliberately naive about quoting: a `{` inside a string literal
//! in the pattern counts as structural.

use super::PatternCheck;
use crate::pattern::{ErrorKind, PatternError, Severity};

/// Reports unclosed, extra, and mismatched `()`, `[]`, `{}`.
#[derive(Debug, Default, Clone, Copy)]
pub struct BracketChecker;

impl BracketChecker {
    pub fn new() -> Self {
        Self
    }
}

/// Returns the closer for an opening bracket.
pub fn closer_for(open: char) -> Option<char> {
    match open {
        '(' => Some(')'),
        '[' => Some(']'),
        '{' => Some('}'),
        _ => None,
    }
}

fn is_closer(c: char) -> bool {
    matches!(c, ')' | ']' | '}')
}

impl PatternCheck for BracketChecker {
    fn name(&self) -> &'static str {
        "brackets"
    }

    fn check(&self, pattern: &str) -> Vec<PatternError> {
        let mut errors = Vec::new();
        let mut stack: Vec<(char, usize)> = Vec::new();

        for (i, c) in pattern.char_indices() {
            if closer_for(c).is_some() {
                stack.push((c, i));
                continue;
            }
            if !is_closer(c) {
                continue;
            }

            match stack.pop() {
                None => errors.push(
                    PatternError::new(
                        ErrorKind::ExtraClosingBracket,
                        Severity::Critical,
                        format!("Extra closing '{c}' at position {i}"),
                    )
                    .at(i, 1)
                    .suggest(format!("Remove the extra '{c}'"))
                    .fixable(),
                ),
                Some((open, pos)) => {
                    let expected = closer_for(open).unwrap_or(c);
                    if expected != c {
                        errors.push(
                            PatternError::new(
                                ErrorKind::MismatchedBracket,
                                Severity::Critical,
                                format!(
                                    "Mismatched brackets: '{open}' at {pos} and '{c}' at {i}"
                                ),
                            )
                            .at(pos, i - pos + 1)
                            .suggest(format!("Replace '{c}' with '{expected}'"))
                            .fixable(),
                        );
                    }
                }
            }
        }

        for (open, pos) in stack {
            let close = closer_for(open).unwrap_or(')');
            errors.push(
                PatternError::new(
                    ErrorKind::UnclosedBracket,
                    Severity::Critical,
                    format!("Unclosed '{open}' at position {pos}"),
                )
                .at(pos, 1)
                .suggest(format!("Add closing '{close}' at the end"))
                .fixable(),
            );
        }

        errors
    }
}
