//! Error types shared across Cutline crates.

use std::path::PathBuf;

/// Top-level error type for Cutline operations.
#[derive(Debug, thiserror::Error)]
pub enum CutlineError {
    #[error("Invalid edit: {message}")]
    InvalidEdit { message: String },

    #[error("Interpreter error: {message}")]
    Interpreter { message: String },

    #[error("Interpreter timed out after {secs}s")]
    InterpreterTimeout { secs: u64 },

    #[error("Export planning error: {message}")]
    Export { message: String },

    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("File not found: {path}")]
    FileNotFound { path: PathBuf },

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Result type alias using CutlineError.
pub type CutlineResult<T> = Result<T, CutlineError>;

impl CutlineError {
    pub fn invalid_edit(msg: impl Into<String>) -> Self {
        Self::InvalidEdit {
            message: msg.into(),
        }
    }

    pub fn interpreter(msg: impl Into<String>) -> Self {
        Self::Interpreter {
            message: msg.into(),
        }
    }

    pub fn export(msg: impl Into<String>) -> Self {
        Self::Export {
            message: msg.into(),
        }
    }

    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config {
            message: msg.into(),
        }
    }
}
