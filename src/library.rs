//! The canonical pattern library.
//!
//! Built once from the [`LanguageRegistry`] and optionally extended from
//! YAML or JSON files, then shared read-only by every analysis.
//!
//! # Example YAML
//!
//! ```yaml
//! python:
//!   print_call: "print($$$ARGS)"
//! kotlin:
//!   fun_decl: "fun $NAME($$$PARAMS) { $$$BODY }"
//! ```

use crate::check::{BracketChecker, PatternCheck};
use crate::error::{DoctorError, Result};
use crate::lang::LanguageRegistry;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;
use tracing::{debug, warn};

/// A named, well-formed example pattern.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LibraryEntry {
    pub name: String,
    pub pattern: String,
}

impl LibraryEntry {
    pub fn new(name: impl Into<String>, pattern: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            pattern: pattern.into(),
        }
    }

    /// Renders the entry as `name: pattern`.
    pub fn display(&self) -> String {
        format!("{}: {}", self.name, self.pattern)
    }
}

/// The on-disk shape of a library file: language to name to pattern.
pub type LibraryFile = BTreeMap<String, BTreeMap<String, String>>;

/// Per-language canonical patterns, keyed by language then semantic name.
#[derive(Debug, Clone, Default)]
pub struct PatternLibrary {
    languages: BTreeMap<String, Vec<LibraryEntry>>,
}

impl PatternLibrary {
    /// Creates an empty library.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a library from every registered language's built-in patterns.
    pub fn from_registry(registry: &LanguageRegistry) -> Self {
        let mut library = Self::new();
        for lang in registry.all() {
            let entries = lang
                .canonical_patterns()
                .iter()
                .map(|(name, pattern)| LibraryEntry::new(*name, *pattern))
                .collect();
            library.languages.insert(lang.name().to_string(), entries);
        }
        library
    }

    /// Merges entries for a language.
    ///
    /// An entry with the same name replaces the existing one in place.
    /// Entries with structural (bracket) errors are skipped.
    pub fn extend(&mut self, language: &str, entries: impl IntoIterator<Item = LibraryEntry>) {
        let language = language.trim().to_ascii_lowercase();
        let target = self.languages.entry(language.clone()).or_default();

        for entry in entries {
            if !BracketChecker.check(&entry.pattern).is_empty() {
                warn!(
                    language = %language,
                    name = %entry.name,
                    "skipping library entry with unbalanced brackets"
                );
                continue;
            }
            match target.iter_mut().find(|e| e.name == entry.name) {
                Some(existing) => *existing = entry,
                None => target.push(entry),
            }
        }
    }

    /// Merges a parsed library file.
    pub fn merge(&mut self, file: LibraryFile) {
        for (language, entries) in file {
            let entries = entries
                .into_iter()
                .map(|(name, pattern)| LibraryEntry::new(name, pattern));
            self.extend(&language, entries);
        }
    }

    /// Loads and merges a YAML library file.
    pub fn load_yaml(&mut self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)?;
        let file: LibraryFile = serde_yaml::from_str(&content).map_err(|e| DoctorError::Load {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        debug!(path = %path.display(), languages = file.len(), "loaded pattern library");
        self.merge(file);
        Ok(())
    }

    /// Loads and merges a JSON library file.
    pub fn load_json(&mut self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)?;
        let file: LibraryFile = serde_json::from_str(&content).map_err(|e| DoctorError::Load {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        debug!(path = %path.display(), languages = file.len(), "loaded pattern library");
        self.merge(file);
        Ok(())
    }

    /// Loads a library file, picking the format from its extension.
    pub fn load_file(&mut self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        match path.extension().and_then(|e| e.to_str()) {
            Some("json") => self.load_json(path),
            Some("yaml" | "yml") => self.load_yaml(path),
            _ => Err(DoctorError::InvalidConfig(format!(
                "unsupported library file format: {}",
                path.display()
            ))),
        }
    }

    /// Returns the entries for a language in display order.
    pub fn entries(&self, language: &str) -> &[LibraryEntry] {
        self.languages
            .get(language)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// Finds an entry by language and semantic name.
    pub fn get(&self, language: &str, name: &str) -> Option<&LibraryEntry> {
        self.entries(language).iter().find(|e| e.name == name)
    }

    /// Returns the languages that have at least one entry.
    pub fn languages(&self) -> impl Iterator<Item = &str> {
        self.languages
            .iter()
            .filter(|(_, entries)| !entries.is_empty())
            .map(|(lang, _)| lang.as_str())
    }

    /// Returns the total number of entries.
    pub fn len(&self) -> usize {
        self.languages.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
