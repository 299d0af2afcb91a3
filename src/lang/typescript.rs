//! TypeScript language support.

use super::javascript::{ArrowShape, TIPS};
use super::{CanonicalPattern, Language};
use crate::error::Result;
use crate::pattern::{PatternError, Suggestion};

/// TypeScript programming language.
pub struct TypeScript {
    arrow: ArrowShape,
}

impl TypeScript {
    pub fn new() -> Result<Self> {
        Ok(Self {
            arrow: ArrowShape::new()?,
        })
    }
}

const PATTERNS: &[CanonicalPattern] = &[
    ("typed_function", "function $NAME($$$PARAMS): $RETURN_TYPE { $$$BODY }"),
    ("typed_arrow", "($$$PARAMS): $RETURN_TYPE => $EXPR"),
    ("interface", "interface $NAME { $$$PROPS }"),
    ("interface_extends", "interface $NAME extends $BASE { $$$PROPS }"),
    ("type_alias", "type $NAME = $TYPE"),
    ("generic_function", "function $NAME<$T>($$$PARAMS): $RETURN { $$$BODY }"),
    ("enum", "enum $NAME { $$$VALUES }"),
    ("namespace", "namespace $NAME { $$$BODY }"),
    ("class_implements", "class $NAME implements $INTERFACE { $$$BODY }"),
    ("type_guard", "$VAR is $TYPE"),
    ("as_expression", "$EXPR as $TYPE"),
    ("readonly_property", "readonly $PROP: $TYPE"),
    ("import_statement", "import { $$$NAMES } from '$MODULE'"),
    ("const_declaration", "const $NAME: $TYPE = $VALUE"),
];

impl Language for TypeScript {
    fn name(&self) -> &'static str {
        "typescript"
    }

    fn aliases(&self) -> &[&'static str] {
        &["ts", "tsx"]
    }

    fn extensions(&self) -> &[&'static str] {
        &["ts", "tsx", "mts", "cts"]
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
