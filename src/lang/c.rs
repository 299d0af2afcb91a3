//! C language support.

use super::{CanonicalPattern, Language};

/// C programming language.
pub struct C;

const PATTERNS: &[CanonicalPattern] = &[
    ("function", "$RET_TYPE $NAME($$$PARAMS)"),
    ("function_with_body", "$RET_TYPE $NAME($$$PARAMS) { $$$BODY }"),
    ("struct", "struct $NAME { $$$FIELDS };"),
    ("variable", "$TYPE $NAME = $VALUE;"),
    ("enum", "enum $NAME { $$$VALUES }"),
    ("typedef", "typedef $OLD_TYPE $NEW_TYPE;"),
    ("function_pointer", "$RET_TYPE (*$NAME)($$$PARAMS)"),
    ("if_statement", "if ($COND) { $$$BODY }"),
    ("for_loop", "for ($INIT; $COND; $UPDATE) { $$$BODY }"),
    ("while_loop", "while ($COND) { $$$BODY }"),
    ("switch", "switch ($EXPR) { $$$CASES }"),
    ("include", "#include $HEADER"),
    ("define", "#define $NAME $VALUE"),
    ("malloc_call", "$PTR = malloc($SIZE)"),
    ("free_call", "free($PTR)"),
];

impl Language for C {
    fn name(&self) -> &'static str {
        "c"
    }

    fn aliases(&self) -> &[&'static str] {
        &["h"]
    }

    fn extensions(&self) -> &[&'static str] {
        &["c", "h"]
    }

    fn canonical_patterns(&self) -> &[CanonicalPattern] {
        PATTERNS
    }
}
