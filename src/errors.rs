// Typed errors for the data files and the remote generation call
//
// File/parse failures are fatal for a run; generation failures are
// per-query and get skipped by the inference runner.

use std::path::PathBuf;
use thiserror::Error;

/// Failure while reading an example file or a tuning configuration
#[derive(Debug, Error)]
pub enum DataError {
    #[error("{kind} not found: {}", .path.display())]
    NotFound { kind: &'static str, path: PathBuf },

    #[error("Failed to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid JSON on line {line} of {}: {source}", .path.display())]
    InvalidLine {
        path: PathBuf,
        line: usize,
        #[source]
        source: serde_json::Error,
    },

    #[error("Invalid JSON document {}: {source}", .path.display())]
    InvalidDocument {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Failure from the remote generation capability
#[derive(Debug, Error)]
pub enum GenerationError {
    #[error("Failed to reach generation API: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Generation API request failed\n\nStatus: {status}\nBody: {body}")]
    Api { status: u16, body: String },

    #[error("Failed to parse generation API response: {0}")]
    Decode(String),

    #[error("Generation API returned no text for model {model}")]
    EmptyResponse { model: String },
}

/// Failure while handling one inference query; the runner skips the query
#[derive(Debug, Error)]
pub enum QueryError {
    #[error("Example {index} in the configuration is not a valid demonstration: {source}")]
    InvalidDemonstration {
        index: usize,
        #[source]
        source: serde_json::Error,
    },

    #[error(transparent)]
    Generation(#[from] GenerationError),
}
