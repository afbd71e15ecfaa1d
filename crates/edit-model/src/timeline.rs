//! Preview timeline: the retimed, post-cut view of the source media.
//!
//! Timelines are derived values. They are rebuilt from the decision list
//! whenever it or the media duration changes and are never edited in place.

use serde::{Deserialize, Serialize};

use crate::range::TimeRange;

/// One kept stretch of source media and where it lands in preview time.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PreviewSegment {
    pub original_start: f64,
    pub original_end: f64,
    pub preview_start: f64,
    pub preview_end: f64,
    /// Playback rate (> 0). Preview length is original length / factor.
    pub speed_factor: f64,
    /// Always false for builder output; cut regions are gaps in original time.
    #[serde(default)]
    pub is_cut: bool,
}

impl PreviewSegment {
    pub fn original_range(&self) -> TimeRange {
        TimeRange::from_bounds(self.original_start, self.original_end)
    }

    pub fn original_duration(&self) -> f64 {
        self.original_end - self.original_start
    }

    pub fn preview_duration(&self) -> f64 {
        self.preview_end - self.preview_start
    }
}

/// Ordered preview segments with aggregate statistics.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PreviewTimeline {
    /// Kept segments ordered by both original and preview time.
    pub segments: Vec<PreviewSegment>,
    /// Source media duration in seconds.
    pub original_duration: f64,
    /// Sum of segment preview lengths.
    pub preview_duration: f64,
    /// Length of merged cut ranges inside the media.
    pub total_cut_duration: f64,
    /// Number of merged cut ranges inside the media.
    pub cut_count: usize,
}

impl PreviewTimeline {
    /// A timeline with nothing kept.
    pub fn empty(original_duration: f64) -> Self {
        Self {
            segments: vec![],
            original_duration,
            preview_duration: 0.0,
            total_cut_duration: 0.0,
            cut_count: 0,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// Original-time spans that survive the cuts, merging adjacent
    /// segments that were split only by a speed change.
    pub fn kept_ranges(&self) -> Vec<TimeRange> {
        let mut kept: Vec<TimeRange> = Vec::with_capacity(self.segments.len());
        for segment in &self.segments {
            match kept.last_mut() {
                Some(last) if last.end == segment.original_start => {
                    last.end = segment.original_end;
                }
                _ => kept.push(segment.original_range()),
            }
        }
        kept
    }

    /// Fraction of the source that survives, in preview time.
    pub fn compression_ratio(&self) -> f64 {
        if self.original_duration > 0.0 {
            self.preview_duration / self.original_duration
        } else {
            0.0
        }
    }
}
