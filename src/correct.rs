//! Mechanical correction of auto-fixable findings.
//!
//! Every fix becomes an [`Edit`] against the original pattern. Edits are
//! collected in descending position order, then applied in a single
//! left-to-right pass, so no edit ever sees offsets shifted by another.
//! Each applied fix multiplies the confidence by a per-kind damping factor.
//!
//! [`Rewriter`] is the looser sibling: it runs [`REWRITE_RULES`] over the
//! whole pattern without needing findings first, and its result is only
//! ever offered as a ranked suggestion.

use crate::check::{Guard, closer_for};
use crate::error::Result;
use crate::pattern::{ErrorKind, PatternError};
use regex::Regex;
use tracing::{debug, trace, warn};

/// A single splice: replace `start..end` of the original with `replacement`.
#[derive(Debug, Clone, PartialEq)]
pub struct Edit {
    pub start: usize,
    pub end: usize,
    pub replacement: String,
    /// Human-readable label of the fix.
    pub label: String,
    /// Multiplier applied to the confidence when this edit lands.
    pub damping: f64,
}

impl Edit {
    pub fn insert(at: usize, text: impl Into<String>, label: String, damping: f64) -> Self {
        Self {
            start: at,
            end: at,
            replacement: text.into(),
            label,
            damping,
        }
    }

    pub fn replace(
        start: usize,
        end: usize,
        text: impl Into<String>,
        label: String,
        damping: f64,
    ) -> Self {
        Self {
            start,
            end,
            replacement: text.into(),
            label,
            damping,
        }
    }
}

/// The outcome of a correction run.
#[derive(Debug, Clone, PartialEq)]
pub struct Correction {
    pub pattern: String,
    pub confidence: f64,
    /// Labels of the fixes that were applied, in application order.
    pub applied: Vec<String>,
}

/// Damping factor for a fix of the given kind.
pub fn damping_for(kind: ErrorKind) -> f64 {
    match kind {
        ErrorKind::InvalidVariadic => 0.9,
        ErrorKind::SpaceAfterDollar => 0.95,
        ErrorKind::UnclosedBracket => 0.85,
        ErrorKind::MissingColon => 0.9,
        ErrorKind::ExtraClosingBracket | ErrorKind::MismatchedBracket => 0.85,
        ErrorKind::Typo => 0.95,
        _ => 1.0,
    }
}

/// Applies fixes for auto-fixable findings.
#[derive(Debug, Default, Clone, Copy)]
pub struct AutoCorrector;

impl AutoCorrector {
    pub fn new() -> Self {
        Self
    }

    /// Corrects `pattern` using the auto-fixable subset of `errors`.
    ///
    /// Returns `None` when nothing is fixable, no fix changes the text, or
    /// the fixes would leave nothing but whitespace.
    pub fn correct(&self, pattern: &str, errors: &[PatternError]) -> Option<Correction> {
        let edits = self.edits(pattern, errors);
        if edits.is_empty() {
            return None;
        }

        let correction = apply(pattern, edits);
        if correction.pattern == pattern {
            return None;
        }
        if correction.pattern.trim().is_empty() {
            debug!(pattern, "fixes would empty the pattern, dropping correction");
            return None;
        }

        debug!(
            fixes = correction.applied.len(),
            confidence = correction.confidence,
            "corrected pattern"
        );
        Some(correction)
    }

    /// Builds the edit list for the auto-fixable findings, highest position first.
    pub fn edits(&self, pattern: &str, errors: &[PatternError]) -> Vec<Edit> {
        let mut fixable: Vec<&PatternError> = errors.iter().filter(|e| e.auto_fixable).collect();
        fixable.sort_by(|a, b| b.position.unwrap_or(0).cmp(&a.position.unwrap_or(0)));

        fixable
            .into_iter()
            .filter_map(|error| {
                let edit = edit_for(pattern, error);
                if edit.is_none() {
                    trace!(kind = %error.kind, position = ?error.position, "no edit for finding");
                }
                edit
            })
            .collect()
    }
}

fn edit_for(pattern: &str, error: &PatternError) -> Option<Edit> {
    let pos = error.position?;
    let damping = damping_for(error.kind);

    match error.kind {
        ErrorKind::InvalidVariadic => {
            let rest = pattern.get(pos..)?;
            if !rest.starts_with("$$") || rest.starts_with("$$$") {
                return None;
            }
            Some(Edit::replace(
                pos,
                pos + 2,
                "$$$",
                "Converted $$ to $$$ for variadic capture".to_string(),
                damping,
            ))
        }
        ErrorKind::SpaceAfterDollar => {
            let rest = pattern.get(pos..)?.strip_prefix('$')?;
            let gap = rest.len() - rest.trim_start_matches([' ', '\t']).len();
            if gap == 0 {
                return None;
            }
            Some(Edit::replace(
                pos + 1,
                pos + 1 + gap,
                "",
                "Removed space after $".to_string(),
                damping,
            ))
        }
        ErrorKind::UnclosedBracket => {
            let open = pattern.get(pos..)?.chars().next()?;
            let close = closer_for(open)?;
            Some(Edit::insert(
                pattern.len(),
                close,
                format!("Added closing '{close}'"),
                damping,
            ))
        }
        ErrorKind::ExtraClosingBracket => {
            let c = pattern.get(pos..)?.chars().next()?;
            Some(Edit::replace(
                pos,
                pos + c.len_utf8(),
                "",
                format!("Removed extra '{c}'"),
                damping,
            ))
        }
        ErrorKind::MismatchedBracket => {
            let open = pattern.get(pos..)?.chars().next()?;
            let expected = closer_for(open)?;
            let close_at = pos + error.length?.checked_sub(1)?;
            let found = pattern.get(close_at..)?.chars().next()?;
            if found == expected {
                return None;
            }
            Some(Edit::replace(
                close_at,
                close_at + found.len_utf8(),
                expected,
                format!("Replaced '{found}' with '{expected}'"),
                damping,
            ))
        }
        ErrorKind::Typo => {
            let end = pos + error.length?;
            let wrong = pattern.get(pos..end)?;
            let right = error.suggestion.as_deref()?;
            Some(Edit::replace(
                pos,
                end,
                right,
                format!("Fixed typo: {wrong} -> {right}"),
                damping,
            ))
        }
        ErrorKind::MissingColon => {
            let keyword_end = pos + error.length.unwrap_or(0);
            let at = colon_offset(pattern, pos, keyword_end)?;
            Some(Edit::insert(
                at,
                ":",
                "Added missing colon".to_string(),
                damping,
            ))
        }
        _ => None,
    }
}

/// Finds where the block terminator goes for the clause starting at `pos`.
///
/// That is the trimmed end of the clause's line, before any trailing
/// multi-capture tokens such as `$$$BODY`.
fn colon_offset(pattern: &str, pos: usize, keyword_end: usize) -> Option<usize> {
    pattern.get(pos..)?;
    let line_end = pattern[pos..]
        .find('\n')
        .map(|i| pos + i)
        .unwrap_or(pattern.len());
    let line = &pattern[..line_end];
    let mut at = line.trim_end().len();

    while let Some(space) = line[..at].rfind([' ', '\t']) {
        let word = &line[space + 1..at];
        if !word.starts_with("$$$") || space < keyword_end {
            break;
        }
        at = line[..space].trim_end().len();
    }

    Some(at.max(keyword_end.min(line_end)))
}

/// Applies edits in one left-to-right pass. Overlapping edits are skipped.
pub fn apply(pattern: &str, mut edits: Vec<Edit>) -> Correction {
    // Stable: insertions at the same offset keep collection order.
    edits.sort_by_key(|e| (e.start, e.end));

    let mut out = String::with_capacity(pattern.len() + edits.len());
    let mut cursor = 0;
    let mut confidence = 1.0;
    let mut applied = Vec::with_capacity(edits.len());

    for edit in edits {
        let in_bounds = edit.end <= pattern.len()
            && pattern.is_char_boundary(edit.start)
            && pattern.is_char_boundary(edit.end);
        if edit.start < cursor || !in_bounds {
            warn!(
                start = edit.start,
                end = edit.end,
                fix = %edit.label,
                "skipping overlapping edit"
            );
            continue;
        }
        trace!(start = edit.start, end = edit.end, replacement = %edit.replacement, "apply edit");
        out.push_str(&pattern[cursor..edit.start]);
        out.push_str(&edit.replacement);
        cursor = edit.end;
        confidence *= edit.damping;
        applied.push(edit.label);
    }
    out.push_str(&pattern[cursor..]);

    Correction {
        pattern: out,
        confidence,
        applied,
    }
}

/// One row of the rewrite table.
#[derive(Debug, Clone, Copy)]
pub struct RewriteRule {
    pub regex: &'static str,
    /// Replacement in `regex` expansion syntax: `${1}` for a group, `$$` for
    /// a literal `$`.
    pub replacement: &'static str,
    pub label: &'static str,
    pub guard: Guard,
}

/// Confidence multiplier for each rewrite rule that changes the pattern.
pub const REWRITE_DAMPING: f64 = 0.9;

/// The fixed, ordered rewrite table. Each rule sees the output of the previous one.
pub const REWRITE_RULES: &[RewriteRule] = &[
    RewriteRule {
        regex: r"\$\$(\w+)",
        replacement: "$$$$$$${1}",
        label: "Converted $$ to $$$ for variadic capture",
        guard: Guard::NoDollarNeighbours,
    },
    RewriteRule {
        regex: r"\$[ \t]+(\w+)",
        replacement: "$$${1}",
        label: "Removed space after $",
        guard: Guard::None,
    },
    RewriteRule {
        regex: r"\b([A-Z][A-Z0-9_]*)\b",
        replacement: "$$${1}",
        label: "Added $ to metavariable",
        guard: Guard::Unsigiled,
    },
    RewriteRule {
        regex: r"\bfucntion\b",
        replacement: "function",
        label: "Fixed typo: fucntion -> function",
        guard: Guard::None,
    },
    RewriteRule {
        regex: r"\bfuntcion\b",
        replacement: "function",
        label: "Fixed typo: funtcion -> function",
        guard: Guard::None,
    },
    RewriteRule {
        regex: r"\bclss\b",
        replacement: "class",
        label: "Fixed typo: clss -> class",
        guard: Guard::None,
    },
    RewriteRule {
        regex: r"\bimprot\b",
        replacement: "import",
        label: "Fixed typo: improt -> import",
        guard: Guard::None,
    },
    RewriteRule {
        regex: r"\bdefien\b",
        replacement: "define",
        label: "Fixed typo: defien -> define",
        guard: Guard::None,
    },
    RewriteRule {
        regex: r"\bretrun\b",
        replacement: "return",
        label: "Fixed typo: retrun -> return",
        guard: Guard::None,
    },
    RewriteRule {
        regex: r"(\w)(if|for|while|def|class)(\s|$)",
        replacement: "${1} ${2}${3}",
        label: "Added space before keyword",
        guard: Guard::NotWord(&["elif"]),
    },
    RewriteRule {
        regex: r"'([^']*)\$\{([^}]+)\}([^']*)'",
        replacement: "`${1}$${${2}}${3}`",
        label: "Used backticks for template literal",
        guard: Guard::None,
    },
    RewriteRule {
        regex: r#""([^"]*)\$\{([^}]+)\}([^"]*)""#,
        replacement: "`${1}$${${2}}${3}`",
        label: "Used backticks for template literal",
        guard: Guard::None,
    },
];

struct CompiledRewrite {
    rule: RewriteRule,
    regex: Regex,
}

/// Applies [`REWRITE_RULES`] in order to produce one candidate rewrite.
pub struct Rewriter {
    rules: Vec<CompiledRewrite>,
}

impl Rewriter {
    /// Compiles the built-in table.
    pub fn new() -> Result<Self> {
        Self::with_rules(REWRITE_RULES)
    }

    /// Compiles a custom table.
    pub fn with_rules(rules: &[RewriteRule]) -> Result<Self> {
        let rules = rules
            .iter()
            .map(|rule| {
                Ok(CompiledRewrite {
                    rule: *rule,
                    regex: Regex::new(rule.regex)?,
                })
            })
            .collect::<Result<Vec<_>>>()?;
        Ok(Self { rules })
    }

    /// Runs every rule over the pattern.
    ///
    /// Returns `None` when no rule changes the text or the result is blank.
    pub fn rewrite(&self, pattern: &str) -> Option<Correction> {
        let mut current = pattern.to_string();
        let mut confidence = 1.0;
        let mut applied = Vec::new();

        for CompiledRewrite { rule, regex } in &self.rules {
            let rewritten = rewrite_with(rule, regex, &current);
            if rewritten != current {
                trace!(rule = rule.label, from = %current, to = %rewritten, "rewrite rule applied");
                current = rewritten;
                confidence *= REWRITE_DAMPING;
                applied.push(rule.label.to_string());
            }
        }

        if current == pattern || current.trim().is_empty() {
            return None;
        }
        Some(Correction {
            pattern: current,
            confidence,
            applied,
        })
    }
}

fn rewrite_with(rule: &RewriteRule, regex: &Regex, text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut last = 0;

    for caps in regex.captures_iter(text) {
        let Some(m) = caps.get(0) else {
            continue;
        };
        if !rule.guard.accepts(text, &m) {
            continue;
        }
        out.push_str(&text[last..m.start()]);
        caps.expand(rule.replacement, &mut out);
        last = m.end();
    }

    out.push_str(&text[last..]);
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::check::{BracketChecker, MetaVarChecker, PatternCheck};
    use crate::pattern::Severity;

    fn fixable(kind: ErrorKind, pos: usize, len: usize) -> PatternError {
        PatternError::new(kind, Severity::Warning, "test")
            .at(pos, len)
            .fixable()
    }

    #[test]
    fn test_variadic_fix() {
        let errors = MetaVarChecker.check("function $NAME($$PARAMS)");
        let fixed = AutoCorrector.correct("function $NAME($$PARAMS)", &errors).unwrap();
        assert_eq!(fixed.pattern, "function $NAME($$$PARAMS)");
        assert!((fixed.confidence - 0.9).abs() < 1e-9);
    }

    #[test]
    fn test_unclosed_appends_inner_first() {
        let pattern = "if ($COND {";
        let errors = BracketChecker.check(pattern);
        let fixed = AutoCorrector.correct(pattern, &errors).unwrap();
        assert_eq!(fixed.pattern, "if ($COND {})");
        assert!((fixed.confidence - 0.85 * 0.85).abs() < 1e-9);
        assert_eq!(fixed.applied.len(), 2);
    }

    #[test]
    fn test_space_after_dollar() {
        let errors = vec![fixable(ErrorKind::SpaceAfterDollar, 4, 7)];
        let fixed = AutoCorrector.correct("foo($   NAME)", &errors).unwrap();
        assert_eq!(fixed.pattern, "foo($NAME)");
    }

    #[test]
    fn test_extra_and_mismatched() {
        let errors = BracketChecker.check("f(x]]");
        let fixed = AutoCorrector.correct("f(x]]", &errors).unwrap();
        assert_eq!(fixed.pattern, "f(x)");
    }

    #[test]
    fn test_typo_uses_suggestion() {
        let errors = vec![fixable(ErrorKind::Typo, 0, 8).suggest("function")];
        let fixed = AutoCorrector.correct("fucntion $F()", &errors).unwrap();
        assert_eq!(fixed.pattern, "function $F()");
    }

    #[test]
    fn test_colon_before_trailing_body() {
        let errors = vec![fixable(ErrorKind::MissingColon, 0, 3)];
        let fixed = AutoCorrector
            .correct("def $F($$$P) $$$BODY", &errors)
            .unwrap();
        assert_eq!(fixed.pattern, "def $F($$$P): $$$BODY");

        let fixed = AutoCorrector.correct("if $COND", &[fixable(ErrorKind::MissingColon, 0, 2)]);
        assert_eq!(fixed.unwrap().pattern, "if $COND:");
    }

    #[test]
    fn test_colon_and_closer_share_offset() {
        let errors = vec![
            fixable(ErrorKind::MissingColon, 0, 2),
            fixable(ErrorKind::UnclosedBracket, 3, 1),
        ];
        let fixed = AutoCorrector.correct("if ($COND", &errors).unwrap();
        assert_eq!(fixed.pattern, "if ($COND):");
    }

    #[test]
    fn test_not_fixable_is_skipped() {
        let errors = vec![PatternError::new(
            ErrorKind::InvalidMetavarName,
            Severity::Warning,
            "bad",
        )
        .at(0, 7)];
        assert!(AutoCorrector.correct("$123VAR", &errors).is_none());
    }

    #[test]
    fn test_stray_closers_only_not_corrected() {
        for pattern in [")", ") ]", ")\n}"] {
            let errors = BracketChecker.check(pattern);
            assert!(!errors.is_empty());
            assert!(AutoCorrector.correct(pattern, &errors).is_none(), "pattern {pattern:?}");
        }
    }

    #[test]
    fn test_stale_position_is_ignored() {
        let errors = vec![fixable(ErrorKind::InvalidVariadic, 40, 2)];
        assert!(AutoCorrector.correct("$$X", &errors).is_none());
    }

    #[test]
    fn test_overlapping_edits_skipped() {
        let edits = vec![
            Edit::replace(0, 3, "abc", "first".to_string(), 0.9),
            Edit::replace(1, 2, "z", "second".to_string(), 0.9),
        ];
        let result = apply("xyz", edits);
        assert_eq!(result.pattern, "abc");
        assert_eq!(result.applied, vec!["first".to_string()]);
    }

    fn rewrite(pattern: &str) -> Option<Correction> {
        Rewriter::new().unwrap().rewrite(pattern)
    }

    #[test]
    fn test_rewrite_table_compiles() {
        assert_eq!(Rewriter::new().unwrap().rules.len(), REWRITE_RULES.len());
    }

    #[test]
    fn test_rewrite_template_literal() {
        let fixed = rewrite("'hi ${NAME}'").unwrap();
        assert_eq!(fixed.pattern, "`hi ${NAME}`");
        assert!((fixed.confidence - 0.9).abs() < 1e-9);
        assert_eq!(fixed.applied, vec!["Used backticks for template literal".to_string()]);

        let fixed = rewrite("console.log(\"x ${$V}\")").unwrap();
        assert_eq!(fixed.pattern, "console.log(`x ${$V}`)");
    }

    #[test]
    fn test_rewrite_bare_placeholders() {
        let fixed = rewrite("foo(NAME, VALUE)").unwrap();
        assert_eq!(fixed.pattern, "foo($NAME, $VALUE)");
        assert!((fixed.confidence - 0.9).abs() < 1e-9);

        assert!(rewrite("$A + $B").is_none());
        assert!(rewrite("$$$ARGS").is_none());
    }

    #[test]
    fn test_rewrite_rules_compound() {
        let fixed = rewrite("$$X + Y").unwrap();
        assert_eq!(fixed.pattern, "$$$X + $Y");
        assert_eq!(fixed.applied.len(), 2);
        assert!((fixed.confidence - 0.81).abs() < 1e-9);
    }

    #[test]
    fn test_rewrite_keyword_spacing_and_typos() {
        assert_eq!(rewrite("xif $C").unwrap().pattern, "x if $C");
        assert_eq!(rewrite("defien $X").unwrap().pattern, "define $X");
        assert!(rewrite("elif $C:").is_none());
    }
}
