//! Error types for the schema compiler
//!
//! Only failures that abort the whole run live here. Per-file failures are
//! collected as [`crate::Problem`] and [`crate::CompileError`] values instead.

use std::path::PathBuf;
use thiserror::Error;

/// Result type for schema compiler operations
pub type Result<T> = std::result::Result<T, SchemaError>;

/// Fatal schema compiler errors
#[derive(Error, Debug)]
pub enum SchemaError {
    #[error("Config not found: {}", path.display())]
    ConfigNotFound { path: PathBuf },

    #[error("No schema files found to compile.")]
    NoSchemasFound,

    #[error("Invalid glob pattern '{pattern}': {reason}")]
    InvalidPattern { pattern: String, reason: String },

    #[error("Unsupported JSON Schema draft: {0}")]
    UnsupportedDraft(String),

    #[error("Config error: {0}")]
    Config(#[from] config_crate::ConfigError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl SchemaError {
    pub(crate) fn pattern(pattern: &str, err: ignore::Error) -> Self {
        SchemaError::InvalidPattern {
            pattern: pattern.to_string(),
            reason: err.to_string(),
        }
    }
}
