//! Edit decisions: declarative operations over a time range.
//!
//! Decisions serialize as flat JSON objects with a `type` discriminator,
//! e.g. `{"id":"ed-..","type":"speed","factor":2.0,"range":{..},..}`.

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::ModelError;
use crate::range::TimeRange;

/// Opaque unique identifier of an edit decision.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DecisionId(String);

static NEXT_ID: AtomicU64 = AtomicU64::new(1);

impl DecisionId {
    /// Generate a process-unique id.
    pub fn generate() -> Self {
        let seq = NEXT_ID.fetch_add(1, Ordering::Relaxed);
        let stamp = Utc::now().timestamp_micros();
        Self(format!("ed-{stamp:x}-{seq:04x}"))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for DecisionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for DecisionId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl From<String> for DecisionId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

/// Vertical placement of a caption.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum CaptionPlacement {
    Top,
    Center,
    #[default]
    Bottom,
}

/// Discriminated union of edit kinds with their parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum EditKind {
    /// Remove the range from the output.
    Cut,

    /// Explicitly keep the range. Cuts always take precedence.
    Keep,

    /// Play the range at `factor` times normal speed.
    Speed { factor: f64 },

    /// Show caption text over the range.
    Caption {
        text: String,
        #[serde(default)]
        placement: CaptionPlacement,
    },

    /// Zoom into a normalized point.
    Zoom {
        /// Magnification (1.0 = none).
        scale: f64,
        /// Normalized X of the zoom center [0.0, 1.0].
        center_x: f64,
        /// Normalized Y of the zoom center [0.0, 1.0].
        center_y: f64,
    },

    /// Audio adjustments for the range.
    Audio {
        /// Linear gain (1.0 = unchanged).
        #[serde(default = "unit_volume")]
        volume: f64,
        #[serde(default)]
        normalize: bool,
        #[serde(default)]
        mute: bool,
    },
}

fn unit_volume() -> f64 {
    1.0
}

impl EditKind {
    /// Short lowercase name, matching the serialized tag.
    pub fn name(&self) -> &'static str {
        match self {
            EditKind::Cut => "cut",
            EditKind::Keep => "keep",
            EditKind::Speed { .. } => "speed",
            EditKind::Caption { .. } => "caption",
            EditKind::Zoom { .. } => "zoom",
            EditKind::Audio { .. } => "audio",
        }
    }

    /// Check kind-specific parameter constraints.
    pub fn validate(&self) -> Result<(), ModelError> {
        let invalid = |message: String| {
            Err(ModelError::InvalidParameter {
                kind: self.name(),
                message,
            })
        };

        match self {
            EditKind::Cut | EditKind::Keep => Ok(()),
            EditKind::Speed { factor } => {
                if factor.is_finite() && *factor > 0.0 {
                    Ok(())
                } else {
                    invalid(format!("speed factor must be positive, got {factor}"))
                }
            }
            EditKind::Caption { text, .. } => {
                if text.trim().is_empty() {
                    invalid("caption text is empty".to_string())
                } else {
                    Ok(())
                }
            }
            EditKind::Zoom {
                scale,
                center_x,
                center_y,
            } => {
                if !(scale.is_finite() && *scale > 0.0) {
                    return invalid(format!("zoom scale must be positive, got {scale}"));
                }
                if !(0.0..=1.0).contains(center_x) || !(0.0..=1.0).contains(center_y) {
                    return invalid(format!(
                        "zoom center ({center_x}, {center_y}) is outside [0, 1]"
                    ));
                }
                Ok(())
            }
            EditKind::Audio { volume, .. } => {
                if volume.is_finite() && *volume >= 0.0 {
                    Ok(())
                } else {
                    invalid(format!("volume must be non-negative, got {volume}"))
                }
            }
        }
    }
}

/// A declarative edit operation over a time range.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EditDecision {
    /// Unique identifier.
    pub id: DecisionId,

    /// Operation and its parameters.
    #[serde(flatten)]
    pub kind: EditKind,

    /// Affected span of original media time.
    pub range: TimeRange,

    /// Command text that produced this decision, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub origin: Option<String>,

    /// Short reason tag such as `"silence"` or `"filler"`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,

    /// Creation time.
    pub created_at: DateTime<Utc>,
}

impl EditDecision {
    /// Create a validated decision with a fresh id.
    pub fn new(kind: EditKind, range: TimeRange) -> Result<Self, ModelError> {
        range.validate()?;
        kind.validate()?;
        Ok(Self {
            id: DecisionId::generate(),
            kind,
            range,
            origin: None,
            label: None,
            created_at: Utc::now(),
        })
    }

    /// Create a cut over `range`.
    pub fn cut(range: TimeRange) -> Result<Self, ModelError> {
        Self::new(EditKind::Cut, range)
    }

    /// Create a speed change over `range`.
    pub fn speed(range: TimeRange, factor: f64) -> Result<Self, ModelError> {
        Self::new(EditKind::Speed { factor }, range)
    }

    /// Attach the command text this decision came from.
    pub fn with_origin(mut self, origin: impl Into<String>) -> Self {
        self.origin = Some(origin.into());
        self
    }

    /// Attach a reason tag.
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    /// Re-check range and parameters (for decisions from untrusted input).
    pub fn validate(&self) -> Result<(), ModelError> {
        self.range.validate()?;
        self.kind.validate()
    }

    pub fn is_cut(&self) -> bool {
        matches!(self.kind, EditKind::Cut)
    }

    /// Speed factor if this is a speed decision.
    pub fn speed_factor(&self) -> Option<f64> {
        match self.kind {
            EditKind::Speed { factor } => Some(factor),
            _ => None,
        }
    }
}
