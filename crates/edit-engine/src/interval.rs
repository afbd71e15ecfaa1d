//! Interval algebra over half-open time ranges.
//!
//! Every function here is pure and tolerant of bad input: zero-length,
//! inverted, NaN, and out-of-bounds ranges are dropped or clipped rather
//! than rejected, so callers stay robust when the media duration changes
//! under an existing decision list.

use std::cmp::Ordering;

use cutline_edit_model::range::TimeRange;

/// Merge overlapping or touching ranges.
///
/// Output is sorted by start, non-overlapping, and minimal: ranges that
/// share a boundary (`a.end == b.start`) are joined. Empty ranges are
/// dropped.
pub fn merge_overlapping(ranges: &[TimeRange]) -> Vec<TimeRange> {
    let mut sorted: Vec<TimeRange> = ranges.iter().copied().filter(|r| !r.is_empty()).collect();
    sorted.sort_by(|a, b| a.start.partial_cmp(&b.start).unwrap_or(Ordering::Equal));

    let mut merged: Vec<TimeRange> = Vec::with_capacity(sorted.len());
    for candidate in sorted {
        match merged.last_mut() {
            Some(last) if candidate.start <= last.end => {
                last.end = last.end.max(candidate.end);
            }
            _ => merged.push(candidate),
        }
    }
    merged
}

/// Clip ranges to `[0, duration)`, dropping anything left empty.
pub fn clip_to_duration(ranges: &[TimeRange], duration: f64) -> Vec<TimeRange> {
    ranges
        .iter()
        .filter_map(|r| r.clip(0.0, duration))
        .collect()
}

/// Complement of `cuts` within `[0, duration)`: the kept ranges.
///
/// Cuts are clipped to the media and merged first, so the input may be
/// unsorted and overlapping. A cut covering the whole duration yields no
/// kept ranges; a non-positive or non-finite duration yields none either.
pub fn subtract_from_duration(duration: f64, cuts: &[TimeRange]) -> Vec<TimeRange> {
    if !(duration.is_finite() && duration > 0.0) {
        return vec![];
    }

    let merged = merge_overlapping(&clip_to_duration(cuts, duration));
    let mut kept = Vec::with_capacity(merged.len() + 1);
    let mut cursor = 0.0;

    for cut in &merged {
        if cut.start > cursor {
            kept.push(TimeRange::from_bounds(cursor, cut.start));
        }
        cursor = cursor.max(cut.end);
    }
    if cursor < duration {
        kept.push(TimeRange::from_bounds(cursor, duration));
    }
    kept
}

/// Half-open overlap test.
pub fn overlaps(a: &TimeRange, b: &TimeRange) -> bool {
    a.overlaps(b)
}

/// Whether `inner` lies entirely inside `outer`.
pub fn contains(outer: &TimeRange, inner: &TimeRange) -> bool {
    outer.contains_range(inner)
}

/// Total length of a set of ranges after merging.
pub fn total_duration(ranges: &[TimeRange]) -> f64 {
    merge_overlapping(ranges).iter().map(TimeRange::duration).sum()
}
