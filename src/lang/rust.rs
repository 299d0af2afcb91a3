//! Rust language support.
//!
//! No shape heuristics: the matching engine copes with partial Rust patterns
//! well, so only the library and a semicolon quick fix are provided.

use super::{CanonicalPattern, Language};
use crate::pattern::Suggestion;

/// Rust programming language.
pub struct Rust;

const PATTERNS: &[CanonicalPattern] = &[
    ("function", "fn $NAME($$$PARAMS) { $$$BODY }"),
    ("function_simple", "fn $NAME"),
    ("function_with_return", "fn $NAME($$$PARAMS) -> $RET_TYPE { $$$BODY }"),
    ("async_function", "async fn $NAME($$$PARAMS) { $$$BODY }"),
    ("pub_function", "pub fn $NAME($$$PARAMS) { $$$BODY }"),
    ("struct_def", "struct $NAME { $$$FIELDS }"),
    ("tuple_struct", "struct $NAME($$$FIELDS);"),
    ("enum_def", "enum $NAME { $$$VARIANTS }"),
    ("impl_block", "impl $TYPE { $$$BODY }"),
    ("impl_trait", "impl $TRAIT for $TYPE { $$$BODY }"),
    ("trait_def", "trait $NAME { $$$BODY }"),
    ("match_expr", "match $EXPR { $$$ARMS }"),
    ("if_let", "if let $PATTERN = $EXPR { $$$BODY }"),
    ("while_let", "while let $PATTERN = $EXPR { $$$BODY }"),
    ("variable", "let $NAME = $VALUE"),
    ("mutable_variable", "let mut $NAME = $VALUE"),
    ("macro_call", "$MACRO!($$$ARGS)"),
    ("unwrap_call", "$EXPR.unwrap()"),
    ("await_expr", "$EXPR.await"),
    ("use_statement", "use $PATH"),
    ("derive_attribute", "#[derive($$$TRAITS)]"),
    ("const_item", "const $NAME: $TYPE = $VALUE"),
];

const STATEMENT_KEYWORDS: &[&str] = &["let", "use", "type", "const"];

impl Language for Rust {
    fn name(&self) -> &'static str {
        "rust"
    }

    fn aliases(&self) -> &[&'static str] {
        &["rs"]
    }

    fn extensions(&self) -> &[&'static str] {
        &["rs"]
    }

    fn canonical_patterns(&self) -> &[CanonicalPattern] {
        PATTERNS
    }

    fn quick_fix(&self, pattern: &str) -> Option<Suggestion> {
        let trimmed = pattern.trim();
        if trimmed.is_empty() || trimmed.ends_with([';', '}', ')']) {
            return None;
        }
        let first_word = trimmed.split_whitespace().next()?;
        if !STATEMENT_KEYWORDS.contains(&first_word) {
            return None;
        }
        Some(Suggestion {
            original: pattern.to_string(),
            suggested: format!("{};", pattern.trim_end()),
            confidence: 0.8,
            reason: "Rust statements need semicolons".to_string(),
            applied_fixes: vec!["Added missing semicolon".to_string()],
        })
    }

    fn tips(&self) -> &[&'static str] {
        &[
            "Include semicolons at the end of statements",
            "For async functions: async fn $NAME",
            "For generics: $NAME<$TYPE>",
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_shape_checks() {
        assert!(Rust.check("fn $NAME(").is_empty());
    }

    #[test]
    fn test_semicolon_quick_fix() {
        let fix = Rust.quick_fix("let $X = $Y").unwrap();
        assert_eq!(fix.suggested, "let $X = $Y;");
        assert!(Rust.quick_fix("let $X = $Y;").is_none());
        assert!(Rust.quick_fix("fn $NAME").is_none());
        assert!(Rust.quick_fix("letter").is_none());
    }
}
