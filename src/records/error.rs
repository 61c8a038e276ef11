//! Errors from the record collaborators.

use std::path::PathBuf;

use thiserror::Error;

use crate::canvas::ValidationError;

#[derive(Debug, Error)]
pub enum RecordError {
    #[error("failed to access {path:?}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to serialize {key} records: {source}")]
    Serialize {
        key: String,
        source: serde_json::Error,
    },

    #[error("{key} records are malformed: {reason}")]
    Malformed { key: String, reason: String },

    #[error("{kind} {id} not found")]
    NotFound { kind: &'static str, id: String },

    #[error(transparent)]
    Validation(#[from] ValidationError),
}

impl RecordError {
    pub fn not_found(kind: &'static str, id: impl ToString) -> Self {
        RecordError::NotFound {
            kind,
            id: id.to_string(),
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, RecordError::NotFound { .. })
    }
}

pub type RecordResult<T> = Result<T, RecordError>;
