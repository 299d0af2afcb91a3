//! Error types for the pattern doctor.
//!
//! These cover construction and I/O only. Analyzing a pattern never fails:
//! problems with the pattern itself are reported as [`crate::pattern::PatternError`]s.

use std::path::PathBuf;
use thiserror::Error;

/// The main error type for the pattern doctor.
#[derive(Error, Debug)]
pub enum DoctorError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Regex error: {0}")]
    Regex(#[from] regex::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("Failed to load {path}: {message}")]
    Load { path: PathBuf, message: String },

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Matching engine error: {message}")]
    Engine { message: String },
}

/// A specialized Result type for pattern doctor operations.
pub type Result<T> = std::result::Result<T, DoctorError>;
