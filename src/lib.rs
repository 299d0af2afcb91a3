//! # Pattern Doctor
//!
//! Diagnostics and auto-correction for structural code-search patterns.
//!
//! A pattern is source code with capture tokens: `$NAME` binds one syntax
//! node, `$$$ARGS` binds zero or more. This crate explains why such a pattern
//! is malformed or matches nothing, and proposes fixes:
//! - Bracket balance, capture-token syntax and common lexical slips
//! - Per-language shape heuristics (Python colons, JS/TS arrow functions)
//! - Similar patterns from a per-language library, relaxed variants, examples
//! - Mechanical correction of fixable findings, with a confidence score
//!
//! ## Quick Start
//!
//! ```rust
//! use pattern_doctor::prelude::*;
//!
//! let analyzer = PatternAnalyzer::new()?;
//! let diagnostic = analyzer.analyze_pattern("if ($COND {", "javascript", None);
//!
//! assert!(!diagnostic.is_valid);
//! assert!(diagnostic.has_error(ErrorKind::UnclosedBracket));
//! assert_eq!(diagnostic.corrected_pattern.as_deref(), Some("if ($COND {})"));
//! # Ok::<(), pattern_doctor::error::DoctorError>(())
//! ```
//!
//! ## Reports
//!
//! ```rust
//! use pattern_doctor::prelude::*;
//!
//! let analyzer = PatternAnalyzer::new()?;
//! let report = analyzer.report("def $F(", "python", None, None);
//!
//! println!("{}", report.to_json()?);
//! if let Some(help) = &report.help_message {
//!     eprintln!("{help}");
//! }
//! # Ok::<(), pattern_doctor::error::DoctorError>(())
//! ```
//!
//! ## Supported Languages
//!
//! - Python (`.py`, `.pyi`)
//! - JavaScript (`.js`, `.jsx`, `.mjs`, `.cjs`)
//! - TypeScript (`.ts`, `.tsx`, `.mts`, `.cts`)
//! - Rust (`.rs`)
//! - Go (`.go`)
//! - C (`.c`, `.h`)
//!
//! Any other language name is accepted; it simply gets no language-specific
//! checks and only the library entries loaded for it from files.

pub mod analyzer;
pub mod check;
pub mod config;
pub mod correct;
pub mod diff;
pub mod engine;
pub mod error;
pub mod lang;
pub mod library;
pub mod pattern;
pub mod report;
pub mod suggest;

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::analyzer::PatternAnalyzer;
    pub use crate::check::{BracketChecker, LexicalChecker, MetaVarChecker, PatternCheck};
    pub use crate::config::AnalyzerConfig;
    pub use crate::correct::{AutoCorrector, Correction, Edit, Rewriter};
    pub use crate::diff::{DiffSummary, colorized_diff, inline_diff};
    pub use crate::engine::{
        CapturedNode, EngineMatch, MatchEngine, Point, Range, SearchOutcome, explain_search,
    };
    pub use crate::error::{DoctorError, Result};
    pub use crate::lang::{C, Go, JavaScript, Language, LanguageRegistry, Python, Rust, TypeScript};
    pub use crate::library::{LibraryEntry, PatternLibrary};
    pub use crate::pattern::{
        ErrorKind, PatternDiagnostic, PatternError, Severity, Suggestion,
    };
    pub use crate::report::{DiagnosticReport, HelpLimits};
    pub use crate::suggest::{NoMatchSuggestions, SuggestionGenerator, VariantGenerator};
}

pub use prelude::*;
