//! Regex-driven detection of common lexical mistakes.
//!
//! Each entry of [`LEXICAL_RULES`] is applied independently and every match
//! yields one WARNING at the match start. Rust's `regex` has no lookaround, so
//! adjacency conditions are expressed as a [`Guard`] evaluated per match.

use super::PatternCheck;
use crate::error::Result;
use crate::pattern::{ErrorKind, PatternError, Severity, is_ident_byte};
use regex::{Match, Regex};

/// Extra condition a raw regex match must satisfy to count.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Guard {
    /// Every match counts.
    None,
    /// The match must not touch identifier characters or a `$` on either side,
    /// must not follow a `$` separated only by blanks, and must not be
    /// followed by one of `:(){}=`.
    Standalone,
    /// The match must not be preceded or followed by another `$`.
    NoDollarNeighbours,
    /// The match must not follow a `$` or sit directly inside `${`.
    Unsigiled,
    /// The identifier enclosing the match start must not be one of these words.
    NotWord(&'static [&'static str]),
}

/// One row of the detector table.
#[derive(Debug, Clone, Copy)]
pub struct LexicalRule {
    pub regex: &'static str,
    pub kind: ErrorKind,
    pub message: &'static str,
    /// Text stored as the finding's suggestion. For typos this is the
    /// corrected keyword and the auto-corrector splices it in verbatim.
    pub suggestion: &'static str,
    pub auto_fixable: bool,
    pub guard: Guard,
}

/// The fixed, ordered detector table.
pub const LEXICAL_RULES: &[LexicalRule] = &[
    LexicalRule {
        regex: r"\b(?:FUNC|NAME|TYPE|VAR|ARG|ARGS|PARAM|PARAMS|BODY|EXPR|VALUE|MSG|COND)\b",
        kind: ErrorKind::MissingDollar,
        message: "Consider adding $ prefix if this is a metavariable",
        suggestion: "Prefix placeholder names with $ (e.g. $NAME)",
        auto_fixable: false,
        guard: Guard::Standalone,
    },
    LexicalRule {
        regex: r"\$\$[A-Z_][A-Z0-9_]*",
        kind: ErrorKind::InvalidVariadic,
        message: "Use $$$ for variadic capture",
        suggestion: "Use $$$ for variadic capture or $ for single capture",
        auto_fixable: true,
        guard: Guard::NoDollarNeighbours,
    },
    LexicalRule {
        regex: r"\$[ \t]+\w+",
        kind: ErrorKind::SpaceAfterDollar,
        message: "Remove space after $",
        suggestion: "Remove the whitespace between $ and the name",
        auto_fixable: true,
        guard: Guard::None,
    },
    LexicalRule {
        regex: r"\bfucntion\b",
        kind: ErrorKind::Typo,
        message: "Did you mean 'function'?",
        suggestion: "function",
        auto_fixable: true,
        guard: Guard::None,
    },
    LexicalRule {
        regex: r"\bfuntcion\b",
        kind: ErrorKind::Typo,
        message: "Did you mean 'function'?",
        suggestion: "function",
        auto_fixable: true,
        guard: Guard::None,
    },
    LexicalRule {
        regex: r"\bclss\b",
        kind: ErrorKind::Typo,
        message: "Did you mean 'class'?",
        suggestion: "class",
        auto_fixable: true,
        guard: Guard::None,
    },
    LexicalRule {
        regex: r"\bimprot\b",
        kind: ErrorKind::Typo,
        message: "Did you mean 'import'?",
        suggestion: "import",
        auto_fixable: true,
        guard: Guard::None,
    },
    LexicalRule {
        regex: r"\bretrun\b",
        kind: ErrorKind::Typo,
        message: "Did you mean 'return'?",
        suggestion: "return",
        auto_fixable: true,
        guard: Guard::None,
    },
];

impl Guard {
    pub(crate) fn accepts(&self, pattern: &str, m: &Match<'_>) -> bool {
        let bytes = pattern.as_bytes();
        let before = m.start().checked_sub(1).map(|i| bytes[i]);
        let after = bytes.get(m.end()).copied();

        match self {
            Guard::None => true,
            Guard::Standalone => {
                let clear = |b: Option<u8>| b.is_none_or(|b| !is_ident_byte(b) && b != b'$');
                // "$ NAME" is a stray space, reported by its own rule.
                let after_sigil = pattern[..m.start()]
                    .trim_end_matches([' ', '\t'])
                    .ends_with('$');
                let structural = after.is_some_and(|b| b":(){}=".contains(&b));
                clear(before) && clear(after) && !after_sigil && !structural
            }
            Guard::NoDollarNeighbours => before != Some(b'$') && after != Some(b'$'),
            Guard::Unsigiled => before != Some(b'$') && !pattern[..m.start()].ends_with("${"),
            Guard::NotWord(words) => {
                let back = bytes[..m.start()]
                    .iter()
                    .rev()
                    .take_while(|b| is_ident_byte(**b))
                    .count();
                let ahead = bytes[m.start()..]
                    .iter()
                    .take_while(|b| is_ident_byte(**b))
                    .count();
                let word = &pattern[m.start() - back..m.start() + ahead];
                !words.contains(&word)
            }
        }
    }
}

struct CompiledRule {
    rule: LexicalRule,
    regex: Regex,
}

/// Applies [`LEXICAL_RULES`] to a pattern.
pub struct LexicalChecker {
    rules: Vec<CompiledRule>,
}

impl LexicalChecker {
    /// Compiles the built-in table.
    pub fn new() -> Result<Self> {
        Self::with_rules(LEXICAL_RULES)
    }

    /// Compiles a custom table.
    pub fn with_rules(rules: &[LexicalRule]) -> Result<Self> {
        let rules = rules
            .iter()
            .map(|rule| {
                Ok(CompiledRule {
                    rule: *rule,
                    regex: Regex::new(rule.regex)?,
                })
            })
            .collect::<Result<Vec<_>>>()?;
        Ok(Self { rules })
    }

    /// Returns the number of compiled rules.
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

impl PatternCheck for LexicalChecker {
    fn name(&self) -> &'static str {
        "lexical"
    }

    fn check(&self, pattern: &str) -> Vec<PatternError> {
        let mut errors = Vec::new();

        for CompiledRule { rule, regex } in &self.rules {
            for m in regex.find_iter(pattern) {
                if !rule.guard.accepts(pattern, &m) {
                    continue;
                }
                let mut error = PatternError::new(
                    rule.kind,
                    Severity::Warning,
                    format!("{} at position {}", rule.message, m.start()),
                )
                .at(m.start(), m.len())
                .suggest(rule.suggestion);
                if rule.auto_fixable {
                    error = error.fixable();
                }
                errors.push(error);
            }
        }

        errors
    }
}
