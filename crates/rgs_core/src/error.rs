use std::path::PathBuf;
use thiserror::Error;

/// Ingestion failures. Any of these aborts the run before validation.
#[derive(Error, Debug)]
pub enum SourceError {
    #[error("Input file not found: {}", .path.display())]
    NotFound { path: PathBuf },

    #[error("Failed to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid JSONL line {line}: {source}")]
    JsonLine {
        /// 1-based, counting non-blank lines
        line: usize,
        #[source]
        source: serde_json::Error,
    },
}

/// Validator configuration failures.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config JSON: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Invalid config: {0}")]
    Invalid(String),
}

pub type Result<T> = std::result::Result<T, SourceError>;
