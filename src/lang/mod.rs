//! Per-language strategies: canonical patterns and shape heuristics.
//!
//! Adding a language means adding a [`Language`] implementation and
//! registering it; nothing else branches on language names. Lookups for an
//! unknown language return `None`, which callers treat as "no
//! language-specific checks".

mod c;
mod go;
mod javascript;
mod python;
mod rust;
mod typescript;

pub use c::C;
pub use go::Go;
pub use javascript::JavaScript;
pub use python::Python;
pub use rust::Rust;
pub use typescript::TypeScript;

use crate::error::Result;
use crate::pattern::{PatternError, Suggestion};
use std::path::Path;

/// A named canonical pattern: `(semantic name, pattern)`.
pub type CanonicalPattern = (&'static str, &'static str);

/// A programming language the pattern doctor knows about.
pub trait Language: Send + Sync {
    /// Returns the canonical lowercase name of the language.
    fn name(&self) -> &'static str;

    /// Returns alternative names accepted on lookup (e.g. `"py"`).
    fn aliases(&self) -> &[&'static str] {
        &[]
    }

    /// Returns the file extensions associated with this language.
    fn extensions(&self) -> &[&'static str];

    /// Returns the built-in canonical patterns, in display order.
    fn canonical_patterns(&self) -> &[CanonicalPattern];

    /// Runs the language's shape heuristics.
    ///
    /// Findings must be advisory: never [`crate::pattern::Severity::Critical`].
    fn check(&self, _pattern: &str) -> Vec<PatternError> {
        Vec::new()
    }

    /// Proposes a language-specific rewrite of the pattern, if one applies.
    fn quick_fix(&self, _pattern: &str) -> Option<Suggestion> {
        None
    }

    /// Returns short writing tips shown when a pattern matches nothing.
    fn tips(&self) -> &[&'static str] {
        &[]
    }

    /// Checks if this language answers to the given name or alias.
    fn matches_name(&self, name: &str) -> bool {
        self.name().eq_ignore_ascii_case(name)
            || self.aliases().iter().any(|a| a.eq_ignore_ascii_case(name))
    }

    /// Checks if this language handles the given file extension.
    fn matches_extension(&self, ext: &str) -> bool {
        self.extensions().iter().any(|e| e.eq_ignore_ascii_case(ext))
    }
}

/// Registry of supported languages.
#[derive(Default)]
pub struct LanguageRegistry {
    languages: Vec<Box<dyn Language>>,
}

impl LanguageRegistry {
    /// Creates a new registry with all built-in languages.
    ///
    /// Fails only if a language's heuristics cannot be compiled.
    pub fn new() -> Result<Self> {
        let mut registry = Self::default();
        registry.register(Box::new(Python));
        registry.register(Box::new(JavaScript::new()?));
        registry.register(Box::new(TypeScript::new()?));
        registry.register(Box::new(Rust));
        registry.register(Box::new(Go));
        registry.register(Box::new(C));
        Ok(registry)
    }

    /// Registers a new language.
    pub fn register(&mut self, lang: Box<dyn Language>) {
        self.languages.push(lang);
    }

    /// Finds a language by name or alias.
    pub fn by_name(&self, name: &str) -> Option<&dyn Language> {
        self.languages
            .iter()
            .find(|l| l.matches_name(name.trim()))
            .map(|l| l.as_ref())
    }

    /// Finds a language by file extension.
    pub fn by_extension(&self, ext: &str) -> Option<&dyn Language> {
        self.languages
            .iter()
            .find(|l| l.matches_extension(ext))
            .map(|l| l.as_ref())
    }

    /// Detects the language for a given file path.
    pub fn detect(&self, path: &Path) -> Option<&dyn Language> {
        path.extension()
            .and_then(|ext| ext.to_str())
            .and_then(|ext| self.by_extension(ext))
    }

    /// Resolves a user-supplied language identifier to its canonical name.
    ///
    /// Unknown identifiers are returned lowercased so they still key the
    /// pattern library consistently.
    pub fn canonical_name(&self, name: &str) -> String {
        self.by_name(name)
            .map(|l| l.name().to_string())
            .unwrap_or_else(|| name.trim().to_ascii_lowercase())
    }

    /// Returns all registered languages.
    pub fn all(&self) -> &[Box<dyn Language>] {
        &self.languages
    }
}
