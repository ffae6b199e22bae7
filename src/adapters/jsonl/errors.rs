use std::path::PathBuf;
use thiserror::Error;

use crate::domain::foundation::{DomainError, ErrorCode};

/// Errors reading a JSON-lines transcript.
#[derive(Debug, Error)]
pub enum SourceError {
    #[error("Transcript file not found: {}", .0.display())]
    NotFound(PathBuf),

    #[error("Failed to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Errors writing JSON-lines pattern records.
#[derive(Debug, Error)]
pub enum SinkError {
    #[error("Failed to write {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to serialize record '{id}': {source}")]
    Serialization {
        id: String,
        #[source]
        source: serde_json::Error,
    },
}

impl From<SourceError> for DomainError {
    fn from(err: SourceError) -> Self {
        let path = match &err {
            SourceError::NotFound(path) | SourceError::Io { path, .. } => path.display().to_string(),
        };
        DomainError::new(ErrorCode::SourceUnavailable, err.to_string()).with_detail("path", path)
    }
}

impl From<SinkError> for DomainError {
    fn from(err: SinkError) -> Self {
        DomainError::new(ErrorCode::SinkUnavailable, err.to_string())
    }
}
