//! Go language support.

use super::{CanonicalPattern, Language};

/// Go programming language.
pub struct Go;

const PATTERNS: &[CanonicalPattern] = &[
    ("function", "func $NAME($$$PARAMS) $$$RETURN_TYPE"),
    ("function_with_body", "func $NAME($$$PARAMS) $RETURN { $$$BODY }"),
    ("method", "func ($RECEIVER $TYPE) $NAME($$$PARAMS) $$$RETURN_TYPE"),
    ("struct", "type $NAME struct { $$$FIELDS }"),
    ("interface", "type $NAME interface { $$$METHODS }"),
    ("variable", "$NAME := $VALUE"),
    ("if_statement", "if $COND { $$$BODY }"),
    ("error_check", "if err != nil { $$$ERROR_HANDLING }"),
    ("for_loop", "for $INIT; $CONDITION; $POST { $$$BODY }"),
    ("range_loop", "for $KEY, $VALUE := range $COLLECTION { $$$BODY }"),
    ("switch", "switch $EXPR { $$$CASES }"),
    ("channel_send", "$CHAN <- $VALUE"),
    ("defer", "defer $EXPR"),
    ("goroutine", "go $FUNC($$$ARGS)"),
    ("import", "import ($$$IMPORTS)"),
];

impl Language for Go {
    fn name(&self) -> &'static str {
        "go"
    }

    fn aliases(&self) -> &[&'static str] {
        &["golang"]
    }

    fn extensions(&self) -> &[&'static str] {
        &["go"]
    }

    fn canonical_patterns(&self) -> &[CanonicalPattern] {
        PATTERNS
    }

    fn tips(&self) -> &[&'static str] {
        &["Go conditions take no parentheses: if $COND { $$$BODY }"]
    }
}
