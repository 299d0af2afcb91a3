//! The diagnostic composer.
//!
//! [`PatternAnalyzer`] owns the read-only pieces (language registry, pattern
//! library, compiled checkers) and runs them in a fixed order for each
//! pattern. It holds no per-call state, so one analyzer can be shared across
//! threads and every call is a pure function of its arguments.
//!
//! # Example
//!
//! ```rust
//! use pattern_doctor::prelude::*;
//!
//! let analyzer = PatternAnalyzer::new()?;
//! let diagnostic = analyzer.analyze_pattern("function $NAME($$PARAMS)", "javascript", None);
//!
//! assert!(diagnostic.has_error(ErrorKind::InvalidVariadic));
//! assert_eq!(
//!     diagnostic.corrected_pattern.as_deref(),
//!     Some("function $NAME($$$PARAMS)")
//! );
//! # Ok::<(), pattern_doctor::error::DoctorError>(())
//! ```

use std::collections::HashSet;

use tracing::debug;

use crate::check::{BracketChecker, LexicalChecker, MetaVarChecker, PatternCheck, closer_for};
use crate::config::AnalyzerConfig;
use crate::correct::{AutoCorrector, Edit, Rewriter, apply};
use crate::error::Result;
use crate::lang::{Language, LanguageRegistry};
use crate::library::{LibraryEntry, PatternLibrary};
use crate::pattern::{ErrorKind, PatternDiagnostic, PatternError, Severity, Suggestion};
use crate::report::{DiagnosticReport, HelpLimits, render_help, render_no_match};
use crate::suggest::SuggestionGenerator;

/// Runs every check on a pattern and assembles a [`PatternDiagnostic`].
pub struct PatternAnalyzer {
    config: AnalyzerConfig,
    registry: LanguageRegistry,
    library: PatternLibrary,
    checks: Vec<Box<dyn PatternCheck>>,
    suggester: SuggestionGenerator,
    corrector: AutoCorrector,
    rewriter: Rewriter,
}

impl PatternAnalyzer {
    /// Creates an analyzer with the default configuration.
    pub fn new() -> Result<Self> {
        Self::with_config(AnalyzerConfig::default())
    }

    /// Creates an analyzer with the built-in languages and the given config.
    pub fn with_config(config: AnalyzerConfig) -> Result<Self> {
        Self::with_registry(config, LanguageRegistry::new()?)
    }

    /// Creates an analyzer over a custom language registry.
    ///
    /// Library files named in the config are loaded here, once.
    pub fn with_registry(config: AnalyzerConfig, registry: LanguageRegistry) -> Result<Self> {
        config.validate()?;

        let mut library = PatternLibrary::from_registry(&registry);
        for path in &config.library_files {
            library.load_file(path)?;
        }

        let checks: Vec<Box<dyn PatternCheck>> = vec![
            Box::new(BracketChecker::new()),
            Box::new(MetaVarChecker::new()),
            Box::new(LexicalChecker::new()?),
        ];

        let suggester = SuggestionGenerator::new()?
            .with_similarity(config.similarity_cutoff, config.max_similar)
            .with_max_examples(config.max_examples);

        debug!(
            languages = registry.all().len(),
            library_entries = library.len(),
            "pattern analyzer ready"
        );

        Ok(Self {
            config,
            registry,
            library,
            checks,
            suggester,
            corrector: AutoCorrector::new(),
            rewriter: Rewriter::new()?,
        })
    }

    pub fn config(&self) -> &AnalyzerConfig {
        &self.config
    }

    pub fn registry(&self) -> &LanguageRegistry {
        &self.registry
    }

    pub fn library(&self) -> &PatternLibrary {
        &self.library
    }

    fn language(&self, language: &str) -> Option<&dyn Language> {
        self.registry.by_name(language)
    }

    fn entries(&self, language: &str) -> &[LibraryEntry] {
        self.library.entries(&self.registry.canonical_name(language))
    }

    /// Runs the generic and language checks, in that order, without suggestions.
    ///
    /// Findings of the same kind at the same position are reported once.
    pub fn check(&self, pattern: &str, language: &str) -> Vec<PatternError> {
        let mut errors = Vec::new();
        for check in &self.checks {
            let found = check.check(pattern);
            debug!(check = check.name(), findings = found.len(), "ran pattern check");
            errors.extend(found);
        }

        match self.language(language) {
            Some(lang) => {
                let found = lang.check(pattern);
                debug!(language = lang.name(), findings = found.len(), "ran language check");
                errors.extend(found);
            }
            None => debug!(language, "no language checks for unknown language"),
        }

        dedup_findings(errors)
    }

    /// Analyzes a pattern. Never fails: every problem is reported as a finding.
    ///
    /// `code` is the source the pattern was meant to match; it is accepted for
    /// context but does not change the verdict.
    pub fn analyze_pattern(
        &self,
        pattern: &str,
        language: &str,
        code: Option<&str>,
    ) -> PatternDiagnostic {
        let language_name = self.registry.canonical_name(language);

        if pattern.trim().is_empty() {
            return PatternDiagnostic {
                pattern: pattern.to_string(),
                language: language_name,
                errors: vec![
                    PatternError::new(
                        ErrorKind::EmptyPattern,
                        Severity::Critical,
                        "Pattern cannot be empty",
                    )
                    .suggest("Provide a valid pattern for the code you want to match"),
                ],
                suggestions: Vec::new(),
                corrected_pattern: None,
                confidence_score: 0.0,
                is_valid: false,
            };
        }

        let errors = self.check(pattern, language);
        let suggestions = self
            .suggester
            .suggestions(pattern, self.entries(language), &errors);

        let correction = if errors.iter().any(|e| e.auto_fixable) {
            self.corrector.correct(pattern, &errors)
        } else {
            None
        };

        let is_valid = !errors.iter().any(PatternError::is_critical);

        debug!(
            language = %language_name,
            errors = errors.len(),
            is_valid,
            corrected = correction.is_some(),
            code_len = code.map(str::len),
            "analyzed pattern"
        );

        let (corrected_pattern, confidence_score) = match correction {
            Some(c) => (Some(c.pattern), c.confidence),
            None => (None, 0.0),
        };

        PatternDiagnostic {
            pattern: pattern.to_string(),
            language: language_name,
            errors,
            suggestions,
            corrected_pattern,
            confidence_score,
            is_valid,
        }
    }

    /// Returns ranked candidate rewrites, best first, without duplicates.
    ///
    /// Combines the automatic correction, the rewrite table, similar library
    /// entries and the language's quick fix.
    pub fn suggest_corrections(&self, pattern: &str, language: &str) -> Vec<Suggestion> {
        if pattern.trim().is_empty() {
            return Vec::new();
        }

        let mut candidates = Vec::new();

        let errors = self.check(pattern, language);
        if let Some(correction) = self.corrector.correct(pattern, &errors) {
            candidates.push(Suggestion {
                original: pattern.to_string(),
                suggested: correction.pattern,
                confidence: correction.confidence,
                reason: "Applied automatic fixes".to_string(),
                applied_fixes: correction.applied,
            });
        }

        if let Some(rewrite) = self.rewriter.rewrite(pattern) {
            candidates.push(Suggestion {
                original: pattern.to_string(),
                suggested: rewrite.pattern,
                confidence: rewrite.confidence,
                reason: "Applied rewrite rules".to_string(),
                applied_fixes: rewrite.applied,
            });
        }

        candidates.extend(
            self.suggester
                .library_rewrites(pattern, self.entries(language)),
        );

        if let Some(fix) = self.language(language).and_then(|l| l.quick_fix(pattern)) {
            candidates.push(fix);
        }

        candidates.sort_by(|a, b| b.confidence.total_cmp(&a.confidence));

        let mut seen = HashSet::new();
        candidates.retain(|s| s.suggested != pattern && seen.insert(s.suggested.clone()));
        candidates.truncate(self.config.max_corrections);
        candidates
    }

    /// Returns candidate rewrites addressing one kind of finding.
    pub fn quick_fixes(&self, pattern: &str, language: &str, kind: ErrorKind) -> Vec<String> {
        let matching: Vec<PatternError> = self
            .check(pattern, language)
            .into_iter()
            .filter(|e| e.kind == kind)
            .collect();
        let mut fixes = Vec::new();

        match kind {
            ErrorKind::UnclosedBracket => {
                for error in &matching {
                    let closer = error
                        .position
                        .and_then(|p| pattern.get(p..))
                        .and_then(|rest| rest.chars().next())
                        .and_then(closer_for);
                    if let Some(closer) = closer {
                        fixes.push(format!("{pattern}{closer}"));
                    }
                }
                if matching.len() > 1 {
                    if let Some(c) = self.corrector.correct(pattern, &matching) {
                        fixes.push(c.pattern);
                    }
                }
            }
            ErrorKind::MissingDollar => {
                let edits: Vec<Edit> = matching
                    .iter()
                    .filter_map(|e| e.position)
                    .map(|p| Edit::insert(p, "$", "Added $ to metavariable".to_string(), 1.0))
                    .collect();
                if !edits.is_empty() {
                    fixes.push(apply(pattern, edits).pattern);
                }
            }
            _ => {
                if let Some(c) = self.corrector.correct(pattern, &matching) {
                    fixes.push(c.pattern);
                }
                if kind == ErrorKind::MissingColon && !matching.is_empty() {
                    if let Some(fix) = self.language(language).and_then(|l| l.quick_fix(pattern)) {
                        fixes.push(fix.suggested);
                    }
                }
            }
        }

        let mut seen = HashSet::new();
        fixes.retain(|f| f != pattern && seen.insert(f.clone()));
        fixes
    }

    fn help_limits(&self) -> HelpLimits {
        HelpLimits {
            errors: self.config.max_help_errors,
            suggestions: self.config.max_help_suggestions,
            examples: self.config.max_help_examples,
        }
    }

    /// Builds the caller-facing report, with help text when the pattern is
    /// invalid or the matching engine rejected it.
    pub fn report(
        &self,
        pattern: &str,
        language: &str,
        code: Option<&str>,
        engine_error: Option<&str>,
    ) -> DiagnosticReport {
        let diagnostic = self.analyze_pattern(pattern, language, code);
        let mut report = DiagnosticReport::new(&diagnostic, self.config.correction_threshold);

        if let Some(message) = engine_error {
            report = report.with_original_error(message);
        }

        if report.needs_help() {
            let help = render_help(
                &diagnostic,
                report.corrected_pattern.as_deref(),
                self.entries(language),
                self.help_limits(),
            );
            report = report.with_help(help);
        }

        report
    }

    /// Renders guidance for a pattern that is well-formed but matched nothing.
    pub fn no_match_message(&self, pattern: &str, language: &str) -> String {
        let suggestions = self.suggester.no_match(pattern, self.entries(language));
        let tips = self.language(language).map(|l| l.tips()).unwrap_or_default();
        render_no_match(
            pattern,
            &self.registry.canonical_name(language),
            &suggestions,
            tips,
            self.config.max_help_suggestions,
        )
    }
}

/// Drops repeated findings of the same kind at the same position, keeping
/// the first.
fn dedup_findings(errors: Vec<PatternError>) -> Vec<PatternError> {
    let mut seen = HashSet::new();
    errors
        .into_iter()
        .filter(|e| seen.insert((e.kind, e.position)))
        .collect()
}
