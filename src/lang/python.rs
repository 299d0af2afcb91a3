//! Python language support.

use super::{CanonicalPattern, Language};
use crate::pattern::{ErrorKind, PatternError, Severity, Suggestion, is_ident_byte};

/// Python programming language.
pub struct Python;

/// Keywords that open a compound statement ending in `:`.
const COMPOUND_KEYWORDS: &[&str] = &[
    "if", "elif", "else", "for", "while", "def", "class", "try", "except", "finally", "with",
];

const PATTERNS: &[CanonicalPattern] = &[
    ("function_definition", "def $NAME($$$PARAMS):"),
    ("function_with_body", "def $NAME($$$PARAMS):\n    $$$BODY"),
    ("function_call", "$NAME($$$ARGS)"),
    ("function_with_decorator", "@$DECORATOR\ndef $NAME($$$PARAMS):"),
    ("function_with_type_hints", "def $NAME($$$PARAMS) -> $RETURN_TYPE:"),
    ("async_function", "async def $NAME($$$PARAMS):"),
    ("class_definition", "class $NAME:"),
    ("class_with_bases", "class $NAME($$$BASES):"),
    ("method_definition", "def $NAME(self, $$$PARAMS):"),
    ("if_statement", "if $CONDITION:"),
    ("if_else_statement", "if $CONDITION:\n    $$$THEN_BODY\nelse:\n    $$$ELSE_BODY"),
    ("for_loop", "for $VAR in $ITERABLE:"),
    ("while_loop", "while $CONDITION:"),
    ("try_except", "try:\n    $$$BODY\nexcept $EXCEPTION:\n    $$$HANDLER"),
    ("with_statement", "with $CONTEXT as $VAR:"),
    ("import_statement", "import $MODULE"),
    ("from_import", "from $MODULE import $NAME"),
    ("import_as", "import $MODULE as $ALIAS"),
    ("lambda", "lambda $$$PARAMS: $EXPR"),
    ("list_comprehension", "[$EXPR for $VAR in $ITER]"),
    ("dict_comprehension", "{$KEY: $VALUE for $VAR in $ITER}"),
    ("print_statement", "print($$$ARGS)"),
    ("return_statement", "return $EXPR"),
    ("assignment", "$NAME = $VALUE"),
    ("augmented_assignment", "$NAME += $VALUE"),
    ("walrus_operator", "$NAME := $EXPR"),
];

/// Finds the last compound keyword that starts a line.
///
/// Only line-leading keywords count, so comprehensions and conditional
/// expressions (`$A if $B else $C`) never trigger. Returns the keyword's byte
/// offset and text.
pub(crate) fn last_compound_keyword(pattern: &str) -> Option<(usize, &'static str)> {
    let mut offset = 0;
    let mut found = None;

    for line in pattern.split_inclusive('\n') {
        let mut rest = line.trim_start();
        let mut start = offset + (line.len() - rest.len());

        if let Some(after) = rest.strip_prefix("async") {
            if after.starts_with([' ', '\t']) {
                let trimmed = after.trim_start();
                start += rest.len() - trimmed.len();
                rest = trimmed;
            }
        }

        let word_len = rest.bytes().take_while(|b| is_ident_byte(*b)).count();
        let word = &rest[..word_len];
        if let Some(keyword) = COMPOUND_KEYWORDS.iter().find(|k| **k == word) {
            found = Some((start, *keyword));
        }

        offset += line.len();
    }

    found
}

impl Language for Python {
    fn name(&self) -> &'static str {
        "python"
    }

    fn aliases(&self) -> &[&'static str] {
        &["py", "python3"]
    }

    fn extensions(&self) -> &[&'static str] {
        &["py", "pyi"]
    }

    fn canonical_patterns(&self) -> &[CanonicalPattern] {
        PATTERNS
    }

    /// Warns when a compound statement has no `:` anywhere in the pattern.
    ///
    /// Presence-only: a colon elsewhere (e.g. in an annotation) silences it.
    fn check(&self, pattern: &str) -> Vec<PatternError> {
        if pattern.contains(':') {
            return Vec::new();
        }
        let Some((pos, keyword)) = last_compound_keyword(pattern) else {
            return Vec::new();
        };

        vec![
            PatternError::new(
                ErrorKind::MissingColon,
                Severity::Warning,
                format!("Python compound statement '{keyword}' might be missing colon"),
            )
            .at(pos, keyword.len())
            .suggest("Add : after the statement if matching complete statements")
            .fixable(),
        ]
    }

    fn quick_fix(&self, pattern: &str) -> Option<Suggestion> {
        let trimmed = pattern.trim_end();
        if trimmed.ends_with(':') || last_compound_keyword(pattern).is_none() {
            return None;
        }
        Some(Suggestion {
            original: pattern.to_string(),
            suggested: format!("{trimmed}:"),
            confidence: 0.9,
            reason: "Python statements need colons".to_string(),
            applied_fixes: vec!["Added missing colon".to_string()],
        })
    }

    fn tips(&self) -> &[&'static str] {
        &[
            "Don't forget colons after def/class/if/for/while statements",
            "Use proper indentation for multi-line patterns",
        ]
    }
}
