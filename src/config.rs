//! Analyzer configuration.
//!
//! All fields have defaults, so a config file only needs the keys it changes:
//!
//! ```yaml
//! correction_threshold: 0.8
//! library_files:
//!   - patterns/kotlin.yaml
//! ```

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::{DoctorError, Result};

/// Tunables for [`crate::analyzer::PatternAnalyzer`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalyzerConfig {
    /// Minimum confidence for a correction to be reported.
    pub correction_threshold: f64,
    /// Minimum similarity for a library entry to be suggested.
    pub similarity_cutoff: f64,
    pub max_similar: usize,
    pub max_examples: usize,
    pub max_help_errors: usize,
    pub max_help_suggestions: usize,
    pub max_help_examples: usize,
    /// Cap on the ranked correction list.
    pub max_corrections: usize,
    /// Extra YAML or JSON pattern library files, merged in order.
    pub library_files: Vec<PathBuf>,
}

impl Default for AnalyzerConfig {
    fn default() -> Self {
        Self {
            correction_threshold: 0.7,
            similarity_cutoff: 0.6,
            max_similar: 3,
            max_examples: 3,
            max_help_errors: 3,
            max_help_suggestions: 3,
            max_help_examples: 3,
            max_corrections: 5,
            library_files: Vec::new(),
        }
    }
}

impl AnalyzerConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn correction_threshold(mut self, threshold: f64) -> Self {
        self.correction_threshold = threshold;
        self
    }

    pub fn similarity_cutoff(mut self, cutoff: f64) -> Self {
        self.similarity_cutoff = cutoff;
        self
    }

    pub fn max_corrections(mut self, max: usize) -> Self {
        self.max_corrections = max;
        self
    }

    /// Adds a pattern library file to merge at construction.
    pub fn library_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.library_files.push(path.into());
        self
    }

    /// Checks that thresholds are ratios.
    pub fn validate(&self) -> Result<()> {
        for (name, value) in [
            ("correction_threshold", self.correction_threshold),
            ("similarity_cutoff", self.similarity_cutoff),
        ] {
            if !(0.0..=1.0).contains(&value) {
                return Err(DoctorError::InvalidConfig(format!(
                    "{name} must be between 0 and 1, got {value}"
                )));
            }
        }
        Ok(())
    }

    /// Load from a YAML file.
    pub fn from_yaml(path: impl AsRef<Path>) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref()).map_err(|e| {
            DoctorError::Io(std::io::Error::new(
                e.kind(),
                format!("Failed to read config file: {}", e),
            ))
        })?;

        let config: Self = serde_yaml::from_str(&content).map_err(|e| {
            DoctorError::InvalidConfig(format!("Failed to parse YAML config: {}", e))
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Load from a JSON file.
    pub fn from_json(path: impl AsRef<Path>) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref()).map_err(|e| {
            DoctorError::Io(std::io::Error::new(
                e.kind(),
                format!("Failed to read config file: {}", e),
            ))
        })?;

        let config: Self = serde_json::from_str(&content).map_err(|e| {
            DoctorError::InvalidConfig(format!("Failed to parse JSON config: {}", e))
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Load from a file, choosing the format by extension.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        match path.extension().and_then(|e| e.to_str()) {
            Some("json") => Self::from_json(path),
            _ => Self::from_yaml(path),
        }
    }
}
