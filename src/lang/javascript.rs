//! JavaScript language support.

use super::{CanonicalPattern, Language};
use crate::error::Result;
use crate::pattern::{ErrorKind, PatternError, Severity, Suggestion};
use regex::Regex;

/// JavaScript programming language.
pub struct JavaScript {
    arrow: ArrowShape,
}

impl JavaScript {
    pub fn new() -> Result<Self> {
        Ok(Self {
            arrow: ArrowShape::new()?,
        })
    }
}

const PATTERNS: &[CanonicalPattern] = &[
    ("function_declaration", "function $NAME($$$PARAMS) { $$$BODY }"),
    ("arrow_function", "($$$PARAMS) => $EXPR"),
    ("arrow_function_block", "($$$PARAMS) => { $$$BODY }"),
    ("class_declaration", "class $NAME { $$$BODY }"),
    ("method_definition", "$NAME($$$PARAMS) { $$$BODY }"),
    ("import_statement", "import $NAME from '$MODULE'"),
    ("export_statement", "export $$$DECL"),
    ("for_loop", "for ($INIT; $COND; $UPDATE) { $$$BODY }"),
    ("for_of_loop", "for (const $VAR of $ITERABLE) { $$$BODY }"),
    ("for_in_loop", "for (const $VAR in $OBJECT) { $$$BODY }"),
    ("try_catch", "try { $$$BODY } catch ($ERR) { $$$HANDLER }"),
    ("if_statement", "if ($COND) { $$$BODY }"),
    ("if_else_statement", "if ($COND) { $$$THEN_BODY } else { $$$ELSE_BODY }"),
    ("ternary_operator", "$COND ? $THEN : $ELSE"),
    ("destructuring_assignment", "const { $$$PROPS } = $OBJ"),
    ("async_function", "async function $NAME($$$PARAMS) { $$$BODY }"),
    ("await_expression", "await $EXPR"),
    ("jsx_element", "<$TAG $$$PROPS>$$$CHILDREN</$TAG>"),
    ("console_log", "console.log($$$ARGS)"),
    ("variable_declaration", "const $NAME = $VALUE"),
    ("let_declaration", "let $NAME = $VALUE"),
    ("promise_then", "$PROMISE.then($CALLBACK)"),
];

/// Returns the byte offset of the first `=>` that has no parameter list or
/// identifier in front of it.
pub(crate) fn bare_arrow(pattern: &str) -> Option<usize> {
    let mut search_from = 0;
    while let Some(found) = pattern[search_from..].find("=>") {
        let pos = search_from + found;
        let head = pattern[..pos].trim_end();
        let valid = match head.chars().last() {
            Some(')') => head.contains('('),
            Some(c) => c.is_alphanumeric() || c == '_' || c == '$',
            None => false,
        };
        if !valid {
            return Some(pos);
        }
        search_from = pos + 2;
    }
    None
}

/// Arrow-function shape heuristic, shared with TypeScript.
///
/// A pattern containing `=>` is fine as long as one arrow has a parameter
/// list or a single identifier in front of it.
pub(crate) struct ArrowShape {
    regex: Regex,
}

impl ArrowShape {
    pub(crate) fn new() -> Result<Self> {
        Ok(Self {
            regex: Regex::new(r"(\(.*\)|[A-Za-z_$][\w$]*)\s*=>")?,
        })
    }

    fn is_malformed(&self, pattern: &str) -> bool {
        pattern.contains("=>") && !self.regex.is_match(pattern)
    }

    pub(crate) fn check(&self, pattern: &str) -> Vec<PatternError> {
        if !self.is_malformed(pattern) {
            return Vec::new();
        }
        let pos = bare_arrow(pattern)
            .or_else(|| pattern.find("=>"))
            .unwrap_or(0);

        vec![
            PatternError::new(
                ErrorKind::InvalidArrowFunction,
                Severity::Warning,
                "Arrow function syntax might be invalid",
            )
            .at(pos, 2)
            .suggest("Use (params) => expr or param => expr"),
        ]
    }

    /// Inserts an empty parameter list in front of a bare arrow.
    pub(crate) fn quick_fix(&self, pattern: &str) -> Option<Suggestion> {
        if !self.is_malformed(pattern) {
            return None;
        }
        let pos = bare_arrow(pattern)?;
        let head = pattern[..pos].trim_end();
        let separator = if head.is_empty() { "" } else { " " };
        Some(Suggestion {
            original: pattern.to_string(),
            suggested: format!("{head}{separator}() {}", &pattern[pos..]),
            confidence: 0.7,
            reason: "Arrow functions need parameters".to_string(),
            applied_fixes: vec!["Added empty parameter list".to_string()],
        })
    }
}

pub(crate) const TIPS: &[&str] = &[
    "Include braces { } for function bodies",
    "Semicolons are optional but can affect matching",
    "For JSX: <$TAG>$$$CHILDREN</$TAG>",
];

impl Language for JavaScript {
    fn name(&self) -> &'static str {
        "javascript"
    }

    fn aliases(&self) -> &[&'static str] {
        &["js", "jsx"]
    }

    fn extensions(&self) -> &[&'static str] {
        &["js", "jsx", "mjs", "cjs"]
    }

    fn canonical_patterns(&self) -> &[CanonicalPattern] {
        PATTERNS
    }

    fn check(&self, pattern: &str) -> Vec<PatternError> {
        self.arrow.check(pattern)
    }

    fn quick_fix(&self, pattern: &str) -> Option<Suggestion> {
        self.arrow.quick_fix(pattern)
    }

    fn tips(&self) -> &[&'static str] {
        TIPS
    }
}
