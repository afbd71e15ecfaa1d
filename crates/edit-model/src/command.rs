//! Outcome of interpreting a free-text editing command.

use serde::{Deserialize, Serialize};

use crate::decision::EditDecision;
use crate::range::TimeRange;

/// Result handed to UI and history consumers after a command runs.
///
/// A failed result never carries edits.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CommandResult {
    pub success: bool,

    /// Human-readable description of what the command was understood as.
    pub interpretation: String,

    /// Decisions to add to the store.
    pub edits: Vec<EditDecision>,

    /// Ranges touched by `edits`, in the same order.
    pub affected_time_ranges: Vec<TimeRange>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl CommandResult {
    /// A successful result carrying `edits`.
    pub fn applied(interpretation: impl Into<String>, edits: Vec<EditDecision>) -> Self {
        let affected_time_ranges = edits.iter().map(|e| e.range).collect();
        Self {
            success: true,
            interpretation: interpretation.into(),
            edits,
            affected_time_ranges,
            error: None,
        }
    }

    /// A failed result with no edits.
    pub fn failed(interpretation: impl Into<String>, error: impl Into<String>) -> Self {
        Self {
            success: false,
            interpretation: interpretation.into(),
            edits: vec![],
            affected_time_ranges: vec![],
            error: Some(error.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_applied_collects_ranges() {
        let edits = vec![
            EditDecision::cut(TimeRange::from_bounds(1.0, 2.0)).unwrap(),
            EditDecision::cut(TimeRange::from_bounds(5.0, 6.0)).unwrap(),
        ];
        let result = CommandResult::applied("Remove 2 silences", edits);
        assert!(result.success);
        assert_eq!(
            result.affected_time_ranges,
            vec![
                TimeRange::from_bounds(1.0, 2.0),
                TimeRange::from_bounds(5.0, 6.0)
            ]
        );
    }

    #[test]
    fn test_failed_has_no_edits() {
        let result =
            CommandResult::failed("speed up the intro", "interpreter exited with status 1");
        assert!(!result.success);
        assert!(result.edits.is_empty());
        assert!(result.affected_time_ranges.is_empty());
        let json = serde_json::to_string(&result).unwrap();
        assert!(json.contains("\"error\":\"interpreter exited with status 1\""));
    }
}
