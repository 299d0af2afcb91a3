//! Language-independent pattern checks.
//!
//! Each checker scans a pattern string and reports [`PatternError`]s. No
//! checker fails or panics on any input; an unexpected input simply yields
//! no findings for that category.
//!
//! Language-specific heuristics live with each language in [`crate::lang`].

mod brackets;
mod lexical;
mod metavars;

pub use brackets::{BracketChecker, closer_for};
pub use lexical::{Guard, LEXICAL_RULES, LexicalChecker, LexicalRule};
pub use metavars::{Arity, MetaVar, MetaVarChecker, scan as scan_metavars};

use crate::pattern::PatternError;

/// A single category of pattern check.
pub trait PatternCheck: Send + Sync {
    /// Returns a short name used in logs.
    fn name(&self) -> &'static str;

    /// Scans the pattern and returns findings in scan order.
    fn check(&self, pattern: &str) -> Vec<PatternError>;
}
