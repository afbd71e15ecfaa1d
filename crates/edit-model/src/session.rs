//! Session interchange file (`session.json`).
//!
//! A session bundles everything needed to rebuild an edit: media duration,
//! analysis inputs, and the current decision list. It is the format the
//! command-line front end reads and writes; the engine itself never
//! touches disk.

use std::collections::HashSet;
use std::path::Path;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::analysis::{Annotation, TranscriptSegment};
use crate::decision::EditDecision;
use crate::error::ModelError;

/// Current session schema version.
pub const SESSION_VERSION: &str = "1.0";

/// Top-level session file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Session {
    /// Schema version.
    pub version: String,

    /// Human-readable session name.
    pub name: String,

    /// Source media duration in seconds.
    pub media_duration: f64,

    /// Creation timestamp.
    pub created_at: DateTime<Utc>,

    /// Last modified timestamp.
    pub modified_at: DateTime<Utc>,

    #[serde(default)]
    pub annotations: Vec<Annotation>,

    #[serde(default)]
    pub transcript: Vec<TranscriptSegment>,

    /// Decision list in authoring order.
    #[serde(default)]
    pub decisions: Vec<EditDecision>,
}

impl Session {
    /// Create an empty session.
    pub fn new(name: impl Into<String>, media_duration: f64) -> Self {
        let now = Utc::now();
        Self {
            version: SESSION_VERSION.to_string(),
            name: name.into(),
            media_duration,
            created_at: now,
            modified_at: now,
            annotations: vec![],
            transcript: vec![],
            decisions: vec![],
        }
    }

    /// Load a session file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ModelError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|e| ModelError::IoError {
            path: path.to_path_buf(),
            source: e,
        })?;
        let session: Session =
            serde_json::from_str(&json).map_err(|e| ModelError::ParseError {
                path: path.to_path_buf(),
                source: e,
            })?;
        if !(session.media_duration.is_finite() && session.media_duration > 0.0) {
            return Err(ModelError::ValidationError {
                message: format!(
                    "media_duration must be positive, got {}",
                    session.media_duration
                ),
            });
        }
        Ok(session)
    }

    /// Write the session, creating parent directories as needed.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), ModelError> {
        let path = path.as_ref();
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(|e| ModelError::IoError {
                path: parent.to_path_buf(),
                source: e,
            })?;
        }
        let json = serde_json::to_string_pretty(self).map_err(|e| ModelError::ParseError {
            path: path.to_path_buf(),
            source: e,
        })?;
        std::fs::write(path, json).map_err(|e| ModelError::IoError {
            path: path.to_path_buf(),
            source: e,
        })
    }

    /// Replace the decision list and bump the modification time.
    pub fn set_decisions(&mut self, decisions: Vec<EditDecision>) {
        self.decisions = decisions;
        self.modified_at = Utc::now();
    }

    /// Report problems that the engine tolerates but a user may want to know
    /// about.
    pub fn validate(&self) -> Vec<String> {
        let mut issues = vec![];
        let mut seen = HashSet::new();

        for decision in &self.decisions {
            if !seen.insert(decision.id.clone()) {
                issues.push(format!("Duplicate decision id: {}", decision.id));
            }
            if let Err(e) = decision.validate() {
                issues.push(format!("Decision {}: {e}", decision.id));
            } else if decision.range.end > self.media_duration {
                issues.push(format!(
                    "Decision {} extends past media end ({:.3}s > {:.3}s)",
                    decision.id, decision.range.end, self.media_duration
                ));
            }
        }

        for annotation in &self.annotations {
            if !(0.0..=1.0).contains(&annotation.confidence) {
                issues.push(format!(
                    "Annotation {} has confidence {} outside [0, 1]",
                    annotation.id, annotation.confidence
                ));
            }
            if annotation.range().is_empty() {
                issues.push(format!("Annotation {} has an empty range", annotation.id));
            }
        }

        issues
    }
}
