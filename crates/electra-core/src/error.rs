//! Error types for Electra Bot.

use std::path::PathBuf;
use thiserror::Error;

/// Failure to load the club knowledge base document.
#[derive(Error, Debug)]
pub enum KnowledgeError {
    #[error("cannot read knowledge base {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid knowledge base {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Failure while producing an answer from the knowledge base.
///
/// Unassigned roles and no-match are not errors; only a rule that references a record
/// the knowledge base does not contain ends up here.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EngineError {
    #[error("referenced record not found: {kind} '{name}'")]
    MissingRecord { kind: &'static str, name: String },
}

/// Failure of the external fallback answer provider.
#[derive(Error, Debug)]
pub enum FallbackError {
    #[error("fallback request failed: {0}")]
    Transport(String),

    #[error("fallback service returned status {0}")]
    Status(u16),

    #[error("fallback service returned an unexpected body: {0}")]
    InvalidResponse(String),
}

impl FallbackError {
    /// Stable machine-readable code for JSON error bodies.
    pub fn code(&self) -> &'static str {
        match self {
            FallbackError::Transport(_) => "fallback_transport",
            FallbackError::Status(_) => "fallback_status",
            FallbackError::InvalidResponse(_) => "fallback_invalid_response",
        }
    }
}
