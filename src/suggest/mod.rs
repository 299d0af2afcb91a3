//! Suggestion generation: library similarity, variants, examples.
//!
//! Everything here is a pure function of the pattern, the library entries it
//! is given, and the findings already computed. The library is injected,
//! never looked up globally.

mod similarity;
mod variants;

pub use similarity::{ScoredEntry, rank, similarity, tokenize};
pub use variants::VariantGenerator;

use crate::error::Result;
use crate::library::LibraryEntry;
use crate::pattern::{ErrorKind, PatternError, Suggestion};

/// Minimum similarity for a library entry whose name shares a keyword with
/// the pattern.
pub const KEYWORD_SIMILARITY_CUTOFF: f64 = 0.4;

/// The three suggestion groups shown when a pattern matched nothing.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NoMatchSuggestions {
    pub variants: Vec<String>,
    pub similar_patterns: Vec<String>,
    pub examples: Vec<String>,
}

/// Produces human-facing suggestions for a pattern.
#[derive(Debug, Clone)]
pub struct SuggestionGenerator {
    variants: VariantGenerator,
    similarity_cutoff: f64,
    max_similar: usize,
    max_examples: usize,
}

impl SuggestionGenerator {
    /// Creates a generator with a cutoff of 0.6 and three similar/example entries.
    pub fn new() -> Result<Self> {
        Ok(Self {
            variants: VariantGenerator::new()?,
            similarity_cutoff: 0.6,
            max_similar: 3,
            max_examples: 3,
        })
    }

    pub fn with_similarity(mut self, cutoff: f64, max_similar: usize) -> Self {
        self.similarity_cutoff = cutoff;
        self.max_similar = max_similar;
        self
    }

    pub fn with_max_examples(mut self, max_examples: usize) -> Self {
        self.max_examples = max_examples;
        self
    }

    /// Returns the closest library entries as `name: pattern`, best first.
    pub fn similar_patterns(&self, pattern: &str, entries: &[LibraryEntry]) -> Vec<String> {
        rank(pattern, entries, self.similarity_cutoff)
            .into_iter()
            .take(self.max_similar)
            .map(|scored| scored.entry.display())
            .collect()
    }

    /// Returns relaxed variants of the pattern.
    pub fn variants(&self, pattern: &str) -> Vec<String> {
        self.variants.variants(pattern)
    }

    /// Returns evenly spaced example patterns: first, about a third in, about
    /// two thirds in.
    pub fn examples(&self, entries: &[LibraryEntry]) -> Vec<String> {
        if self.max_examples == 0 {
            return Vec::new();
        }
        if entries.len() <= self.max_examples {
            return entries.iter().map(|e| e.pattern.clone()).collect();
        }

        let step = (entries.len() / self.max_examples).max(1);
        let mut indices: Vec<usize> = (0..self.max_examples)
            .map(|i| (i * step).min(entries.len() - 1))
            .collect();
        indices.dedup();
        indices
            .into_iter()
            .map(|i| entries[i].pattern.clone())
            .collect()
    }

    /// Returns the combined suggestion list for a diagnostic.
    ///
    /// Order: similar library entries, hints derived from the findings,
    /// variants, examples. Duplicates are dropped.
    pub fn suggestions(
        &self,
        pattern: &str,
        entries: &[LibraryEntry],
        errors: &[PatternError],
    ) -> Vec<String> {
        let mut out = self.similar_patterns(pattern, entries);
        out.extend(error_hints(errors).into_iter().map(str::to_string));
        out.extend(self.variants(pattern));
        out.extend(self.examples(entries));
        dedup(out)
    }

    /// Groups suggestions for a pattern that matched nothing.
    pub fn no_match(&self, pattern: &str, entries: &[LibraryEntry]) -> NoMatchSuggestions {
        NoMatchSuggestions {
            variants: self.variants(pattern),
            similar_patterns: self.similar_patterns(pattern, entries),
            examples: self.examples(entries),
        }
    }

    /// Proposes library entries as rewrites, scored by similarity.
    ///
    /// An entry qualifies above the similarity cutoff, or above
    /// [`KEYWORD_SIMILARITY_CUTOFF`] when a word of its name appears in the
    /// pattern.
    pub fn library_rewrites(&self, pattern: &str, entries: &[LibraryEntry]) -> Vec<Suggestion> {
        let lowered = pattern.to_lowercase();

        rank(pattern, entries, KEYWORD_SIMILARITY_CUTOFF)
            .into_iter()
            .filter(|scored| {
                scored.score >= self.similarity_cutoff || name_matches(&scored.entry.name, &lowered)
            })
            .filter(|scored| scored.entry.pattern != pattern)
            .map(|scored| Suggestion {
                original: pattern.to_string(),
                suggested: scored.entry.pattern.clone(),
                confidence: scored.score,
                reason: format!("Similar to {} pattern", scored.entry.name),
                applied_fixes: vec![format!("Matched {} template", scored.entry.name)],
            })
            .collect()
    }
}

/// True when a word of a snake_case library name appears in the lowercased pattern.
pub(crate) fn name_matches(name: &str, lowered_pattern: &str) -> bool {
    name.split('_')
        .filter(|word| word.len() > 1)
        .any(|word| lowered_pattern.contains(word))
}

/// Returns one generic hint per category of finding present.
pub fn error_hints(errors: &[PatternError]) -> Vec<&'static str> {
    let has = |kinds: &[ErrorKind]| errors.iter().any(|e| kinds.contains(&e.kind));
    let mut hints = Vec::new();

    if has(&[ErrorKind::MissingDollar]) {
        hints.push("Remember to prefix metavariables with $");
    }
    if has(&[ErrorKind::InvalidVariadic]) {
        hints.push("Use $$$ for matching multiple elements (variadic)");
    }
    if has(&[
        ErrorKind::UnclosedBracket,
        ErrorKind::MismatchedBracket,
        ErrorKind::ExtraClosingBracket,
    ]) {
        hints.push("Check that all brackets, braces, and parentheses are balanced");
    }
    if has(&[ErrorKind::EmptyMetavarName, ErrorKind::InvalidMetavarName]) {
        hints.push("Metavariable names start with a letter or underscore, e.g. $NAME or $_");
    }
    if has(&[ErrorKind::MissingColon]) {
        hints.push("Block statements end with ':' before their body");
    }

    hints
}

fn dedup(items: Vec<String>) -> Vec<String> {
    let mut out: Vec<String> = Vec::with_capacity(items.len());
    for item in items {
        if !out.contains(&item) {
            out.push(item);
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lang::LanguageRegistry;
    use crate::library::PatternLibrary;
    use crate::pattern::Severity;

    fn generator() -> SuggestionGenerator {
        SuggestionGenerator::new().unwrap()
    }

    fn entries(n: usize) -> Vec<LibraryEntry> {
        (0..n)
            .map(|i| LibraryEntry::new(format!("e{i}"), format!("p{i}")))
            .collect()
    }

    #[test]
    fn test_examples_evenly_spaced() {
        let examples = generator().examples(&entries(9));
        assert_eq!(examples, vec!["p0", "p3", "p6"]);
    }

    #[test]
    fn test_examples_short_library() {
        assert_eq!(generator().examples(&entries(2)), vec!["p0", "p1"]);
        assert!(generator().examples(&[]).is_empty());
    }

    #[test]
    fn test_similar_patterns_named() {
        let library = PatternLibrary::from_registry(&LanguageRegistry::new().unwrap());
        let similar = generator().similar_patterns("def $NAME($$$PARAMS)", library.entries("python"));
        assert!(!similar.is_empty());
        assert!(similar.len() <= 3);
        assert!(
            similar
                .iter()
                .any(|s| s == "function_definition: def $NAME($$$PARAMS):")
        );
    }

    #[test]
    fn test_error_hints() {
        let errors = vec![
            PatternError::new(ErrorKind::UnclosedBracket, Severity::Critical, "x"),
            PatternError::new(ErrorKind::MismatchedBracket, Severity::Critical, "y"),
        ];
        assert_eq!(
            error_hints(&errors),
            vec!["Check that all brackets, braces, and parentheses are balanced"]
        );
        assert!(error_hints(&[]).is_empty());
    }

    #[test]
    fn test_suggestions_are_unique() {
        let library = PatternLibrary::from_registry(&LanguageRegistry::new().unwrap());
        let suggestions = generator().suggestions("$A + $B", library.entries("python"), &[]);
        let mut sorted = suggestions.clone();
        sorted.sort();
        sorted.dedup();
        assert_eq!(sorted.len(), suggestions.len());
    }

    #[test]
    fn test_library_rewrites_keyword_match() {
        let lib = vec![
            LibraryEntry::new("class_definition", "class $NAME:"),
            LibraryEntry::new("import", "import $MODULE"),
        ];
        let rewrites = generator().library_rewrites("class $NAME", &lib);
        assert_eq!(rewrites.len(), 1);
        assert_eq!(rewrites[0].suggested, "class $NAME:");
        assert_eq!(rewrites[0].reason, "Similar to class_definition pattern");
    }
}
