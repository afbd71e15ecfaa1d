//! Time ranges over the source media timeline.
//!
//! Ranges are half-open `[start, end)` in seconds of original (unedited)
//! media time.

use serde::{Deserialize, Serialize};

use crate::error::ModelError;

/// A half-open span of media time in seconds.
///
/// Well-formed ranges satisfy `0 <= start < end`. [`TimeRange::new`]
/// enforces this; [`TimeRange::from_bounds`] and deserialization do not,
/// so downstream interval math must tolerate degenerate values.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TimeRange {
    /// Inclusive start (seconds).
    pub start: f64,
    /// Exclusive end (seconds).
    pub end: f64,
}

impl TimeRange {
    /// Create a validated range.
    pub fn new(start: f64, end: f64) -> Result<Self, ModelError> {
        let range = Self { start, end };
        range.validate()?;
        Ok(range)
    }

    /// Create a range without validation.
    pub const fn from_bounds(start: f64, end: f64) -> Self {
        Self { start, end }
    }

    /// Check `0 <= start < end` with finite bounds.
    pub fn validate(&self) -> Result<(), ModelError> {
        if !self.start.is_finite() || !self.end.is_finite() || self.start < 0.0 {
            return Err(ModelError::InvalidRange {
                start: self.start,
                end: self.end,
            });
        }
        if self.end <= self.start {
            return Err(ModelError::InvalidRange {
                start: self.start,
                end: self.end,
            });
        }
        Ok(())
    }

    /// Length in seconds; zero for degenerate ranges.
    pub fn duration(&self) -> f64 {
        if self.is_empty() {
            0.0
        } else {
            self.end - self.start
        }
    }

    /// True when the range covers no time (including NaN bounds).
    pub fn is_empty(&self) -> bool {
        !(self.end > self.start)
    }

    /// Whether `t` lies in `[start, end)`.
    pub fn contains_time(&self, t: f64) -> bool {
        t >= self.start && t < self.end
    }

    /// Whether `other` lies entirely within this range.
    pub fn contains_range(&self, other: &TimeRange) -> bool {
        self.start <= other.start && other.end <= self.end
    }

    /// Whether the two ranges share any time.
    pub fn overlaps(&self, other: &TimeRange) -> bool {
        self.start < other.end && other.start < self.end
    }

    /// Intersection with `[lo, hi)`, or `None` if nothing remains.
    pub fn clip(&self, lo: f64, hi: f64) -> Option<TimeRange> {
        if self.is_empty() {
            return None;
        }
        let clipped = TimeRange::from_bounds(self.start.max(lo), self.end.min(hi));
        (!clipped.is_empty()).then_some(clipped)
    }

    /// Intersection of two ranges.
    pub fn intersect(&self, other: &TimeRange) -> Option<TimeRange> {
        self.clip(other.start, other.end)
    }
}
