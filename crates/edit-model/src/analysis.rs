//! Analysis inputs produced by external collaborators: labeled annotations
//! and transcript segments.

use serde::{Deserialize, Serialize};

use crate::range::TimeRange;

/// Category of an analysis annotation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AnnotationType {
    Talking,
    Silence,
    Scene,
    Filler,
    Noise,
    Music,
}

/// A labeled region detected by media analysis.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Annotation {
    pub id: String,

    #[serde(rename = "type")]
    pub kind: AnnotationType,

    /// Start time in seconds.
    pub start_time: f64,

    /// End time in seconds.
    pub end_time: f64,

    /// Detector confidence [0.0, 1.0].
    #[serde(default = "full_confidence")]
    pub confidence: f64,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
}

fn full_confidence() -> f64 {
    1.0
}

impl Annotation {
    pub fn new(
        id: impl Into<String>,
        kind: AnnotationType,
        start_time: f64,
        end_time: f64,
    ) -> Self {
        Self {
            id: id.into(),
            kind,
            start_time,
            end_time,
            confidence: 1.0,
            label: None,
        }
    }

    /// Span covered by this annotation.
    pub fn range(&self) -> TimeRange {
        TimeRange::from_bounds(self.start_time, self.end_time)
    }
}

/// A single timed word inside a transcript segment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TranscriptWord {
    pub text: String,
    pub start_time: f64,
    pub end_time: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub confidence: Option<f64>,
}

/// A transcribed utterance with timing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TranscriptSegment {
    pub id: String,

    /// Start time in seconds.
    pub start_time: f64,

    /// End time in seconds.
    pub end_time: f64,

    pub text: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub speaker: Option<String>,

    /// Set by the transcriber when the whole segment is a filler.
    #[serde(default)]
    pub is_filler: bool,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub words: Vec<TranscriptWord>,
}

impl TranscriptSegment {
    pub fn new(
        id: impl Into<String>,
        start_time: f64,
        end_time: f64,
        text: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            start_time,
            end_time,
            text: text.into(),
            speaker: None,
            is_filler: false,
            words: vec![],
        }
    }

    /// Span covered by this segment.
    pub fn range(&self) -> TimeRange {
        TimeRange::from_bounds(self.start_time, self.end_time)
    }

    /// Word tokens of the segment: timed words when present, otherwise the
    /// whitespace-split text.
    pub fn tokens(&self) -> Vec<&str> {
        if self.words.is_empty() {
            self.text.split_whitespace().collect()
        } else {
            self.words.iter().map(|w| w.text.as_str()).collect()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_annotation_json_uses_type_tag() {
        let raw = r#"{"id":"s1","type":"silence","start_time":10.0,"end_time":12.0,"confidence":0.9}"#;
        let parsed: Annotation = serde_json::from_str(raw).unwrap();
        assert_eq!(parsed.kind, AnnotationType::Silence);
        assert_eq!(parsed.range(), TimeRange::from_bounds(10.0, 12.0));
        assert!(parsed.label.is_none());
    }

    #[test]
    fn test_annotation_confidence_defaults_to_one() {
        let raw = r#"{"id":"t1","type":"talking","start_time":0.0,"end_time":3.0}"#;
        let parsed: Annotation = serde_json::from_str(raw).unwrap();
        assert_eq!(parsed.confidence, 1.0);
    }

    #[test]
    fn test_tokens_prefer_timed_words() {
        let mut segment = TranscriptSegment::new("t1", 0.0, 2.0, "um so anyway");
        assert_eq!(segment.tokens(), vec!["um", "so", "anyway"]);

        segment.words = vec![TranscriptWord {
            text: "uh".to_string(),
            start_time: 0.0,
            end_time: 0.4,
            confidence: None,
        }];
        assert_eq!(segment.tokens(), vec!["uh"]);
    }
}
