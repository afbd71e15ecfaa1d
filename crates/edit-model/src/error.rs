//! Errors raised while constructing or loading model values.

use std::path::PathBuf;

/// Errors that can occur when working with edit model values.
#[derive(Debug, thiserror::Error)]
pub enum ModelError {
    #[error("Invalid time range: {start}s to {end}s")]
    InvalidRange { start: f64, end: f64 },

    #[error("Invalid {kind} parameter: {message}")]
    InvalidParameter { kind: &'static str, message: String },

    #[error("I/O error at {path}: {source}")]
    IoError {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Parse error in {path}: {source}")]
    ParseError {
        path: PathBuf,
        source: serde_json::Error,
    },

    #[error("Invalid session: {message}")]
    ValidationError { message: String },
}
