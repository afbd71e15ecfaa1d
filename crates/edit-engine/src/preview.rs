//! Preview timeline construction.
//!
//! # Algorithm
//!
//! 1. **Cuts:** collect every Cut range, clip to the media, merge.
//! 2. **Kept ranges:** complement of the merged cuts within `[0, duration)`.
//! 3. **Speed split:** split each kept range at Speed boundaries that fall
//!    inside it; each piece takes the factor of the first Speed decision
//!    (authoring order) that fully contains it, or 1.
//! 4. **Retime:** lay pieces end to end in preview time, joining adjacent
//!    pieces that ended up with the same factor.
//!
//! Cuts always win: a Speed or Keep decision over a cut region has no effect.

use std::cmp::Ordering;

use cutline_edit_model::decision::EditDecision;
use cutline_edit_model::range::TimeRange;
use cutline_edit_model::timeline::{PreviewSegment, PreviewTimeline};

use crate::interval::{clip_to_duration, merge_overlapping, subtract_from_duration};

/// Build the preview timeline for `decisions` over media of `duration`
/// seconds.
pub fn build_preview_timeline(duration: f64, decisions: &[EditDecision]) -> PreviewTimeline {
    if !(duration.is_finite() && duration > 0.0) {
        tracing::debug!(duration, "Invalid media duration, returning empty timeline");
        return PreviewTimeline::empty(0.0);
    }

    let cut_ranges: Vec<TimeRange> = decisions
        .iter()
        .filter(|d| d.is_cut())
        .map(|d| d.range)
        .collect();
    let merged_cuts = merge_overlapping(&clip_to_duration(&cut_ranges, duration));
    let kept = subtract_from_duration(duration, &merged_cuts);

    let speeds: Vec<(TimeRange, f64)> = decisions
        .iter()
        .filter_map(|d| d.speed_factor().map(|f| (d.range, f)))
        .filter(|(range, factor)| !range.is_empty() && factor.is_finite() && *factor > 0.0)
        .collect();

    let mut segments = Vec::with_capacity(kept.len());
    let mut preview_cursor = 0.0;

    for range in &kept {
        for (piece, factor) in speed_pieces(range, &speeds) {
            let preview_end = preview_cursor + piece.duration() / factor;
            segments.push(PreviewSegment {
                original_start: piece.start,
                original_end: piece.end,
                preview_start: preview_cursor,
                preview_end,
                speed_factor: factor,
                is_cut: false,
            });
            preview_cursor = preview_end;
        }
    }

    let total_cut_duration = merged_cuts.iter().map(TimeRange::duration).sum();

    tracing::debug!(
        decisions = decisions.len(),
        segments = segments.len(),
        cuts = merged_cuts.len(),
        preview_duration = preview_cursor,
        "Built preview timeline"
    );

    PreviewTimeline {
        segments,
        original_duration: duration,
        preview_duration: preview_cursor,
        total_cut_duration,
        cut_count: merged_cuts.len(),
    }
}

/// Split a kept range at speed boundaries and assign each piece a factor.
fn speed_pieces(range: &TimeRange, speeds: &[(TimeRange, f64)]) -> Vec<(TimeRange, f64)> {
    let mut bounds = vec![range.start, range.end];
    for (speed_range, _) in speeds {
        for edge in [speed_range.start, speed_range.end] {
            if edge > range.start && edge < range.end {
                bounds.push(edge);
            }
        }
    }
    bounds.sort_by(|a, b| a.partial_cmp(b).unwrap_or(Ordering::Equal));
    bounds.dedup();

    let mut pieces: Vec<(TimeRange, f64)> = Vec::with_capacity(bounds.len() - 1);
    for pair in bounds.windows(2) {
        let piece = TimeRange::from_bounds(pair[0], pair[1]);
        let factor = speeds
            .iter()
            .find(|(speed_range, _)| speed_range.contains_range(&piece))
            .map(|(_, factor)| *factor)
            .unwrap_or(1.0);

        match pieces.last_mut() {
            Some((last, last_factor)) if *last_factor == factor => last.end = piece.end,
            _ => pieces.push((piece, factor)),
        }
    }
    pieces
}

#[cfg(test)]
mod tests {
    use super::*;

    fn r(start: f64, end: f64) -> TimeRange {
        TimeRange::from_bounds(start, end)
    }

    fn cut(start: f64, end: f64) -> EditDecision {
        EditDecision::cut(r(start, end)).unwrap()
    }

    fn speed(start: f64, end: f64, factor: f64) -> EditDecision {
        EditDecision::speed(r(start, end), factor).unwrap()
    }

    #[test]
    fn test_two_cuts() {
        let timeline = build_preview_timeline(100.0, &[cut(0.0, 10.0), cut(40.0, 50.0)]);
        assert_eq!(timeline.kept_ranges(), vec![r(10.0, 40.0), r(50.0, 100.0)]);
        assert_eq!(timeline.preview_duration, 80.0);
        assert_eq!(timeline.cut_count, 2);
        assert_eq!(timeline.total_cut_duration, 20.0);
    }

    #[test]
    fn test_overlapping_cuts_count_once() {
        let timeline = build_preview_timeline(60.0, &[cut(5.0, 15.0), cut(10.0, 20.0)]);
        assert_eq!(timeline.cut_count, 1);
        assert_eq!(timeline.total_cut_duration, 15.0);
        assert_eq!(timeline.kept_ranges(), vec![r(0.0, 5.0), r(20.0, 60.0)]);
    }

    #[test]
    fn test_speed_splits_range() {
        let timeline = build_preview_timeline(40.0, &[speed(20.0, 30.0, 2.0)]);
        let expected = [
            (0.0, 20.0, 0.0, 20.0, 1.0),
            (20.0, 30.0, 20.0, 25.0, 2.0),
            (30.0, 40.0, 25.0, 35.0, 1.0),
        ];
        assert_eq!(timeline.segments.len(), 3);
        for (seg, (os, oe, ps, pe, f)) in timeline.segments.iter().zip(expected) {
            assert_eq!(
                (seg.original_start, seg.original_end, seg.preview_start, seg.preview_end),
                (os, oe, ps, pe)
            );
            assert_eq!(seg.speed_factor, f);
            assert!(!seg.is_cut);
        }
        assert_eq!(timeline.preview_duration, 35.0);
    }

    #[test]
    fn test_first_speed_in_input_order_wins() {
        let timeline =
            build_preview_timeline(10.0, &[speed(0.0, 10.0, 2.0), speed(0.0, 10.0, 4.0)]);
        assert_eq!(timeline.segments.len(), 1);
        assert_eq!(timeline.segments[0].speed_factor, 2.0);
        assert_eq!(timeline.preview_duration, 5.0);
    }

    #[test]
    fn test_overlapping_speeds_do_not_layer() {
        // [0,10) x2 overlaps [5,15) x4: the overlap takes x2, the rest x4.
        let timeline =
            build_preview_timeline(20.0, &[speed(0.0, 10.0, 2.0), speed(5.0, 15.0, 4.0)]);
        let factors: Vec<f64> = timeline.segments.iter().map(|s| s.speed_factor).collect();
        assert_eq!(factors, vec![2.0, 4.0, 1.0]);
        assert_eq!(timeline.segments[0].original_end, 10.0);
        assert_eq!(timeline.preview_duration, 5.0 + 1.25 + 5.0);
    }

    #[test]
    fn test_cut_wins_over_speed() {
        let decisions = [speed(10.0, 20.0, 2.0), cut(10.0, 20.0)];
        let timeline = build_preview_timeline(30.0, &decisions);
        assert!(timeline.segments.iter().all(|s| s.speed_factor == 1.0));
        assert_eq!(timeline.preview_duration, 20.0);

        let reversed = [cut(10.0, 20.0), speed(10.0, 20.0, 2.0)];
        assert_eq!(build_preview_timeline(30.0, &reversed), timeline);
    }

    #[test]
    fn test_speed_over_partially_cut_region() {
        let decisions = [speed(0.0, 20.0, 2.0), cut(5.0, 10.0)];
        let timeline = build_preview_timeline(20.0, &decisions);
        assert_eq!(timeline.segments.len(), 2);
        assert!(timeline.segments.iter().all(|s| s.speed_factor == 2.0));
        assert_eq!(timeline.preview_duration, 7.5);
    }

    #[test]
    fn test_everything_cut() {
        let timeline = build_preview_timeline(30.0, &[cut(0.0, 50.0)]);
        assert!(timeline.is_empty());
        assert_eq!(timeline.preview_duration, 0.0);
        assert_eq!(timeline.total_cut_duration, 30.0);
        assert_eq!(timeline.cut_count, 1);
    }

    #[test]
    fn test_out_of_range_cut_is_ignored_in_stats() {
        let timeline = build_preview_timeline(30.0, &[cut(40.0, 50.0)]);
        assert_eq!(timeline.cut_count, 0);
        assert_eq!(timeline.preview_duration, 30.0);
    }

    #[test]
    fn test_invalid_duration() {
        assert!(build_preview_timeline(0.0, &[]).is_empty());
        assert!(build_preview_timeline(f64::NAN, &[cut(0.0, 1.0)]).is_empty());
    }

    #[test]
    fn test_keep_decisions_do_not_change_timeline() {
        let keep = EditDecision::new(
            cutline_edit_model::decision::EditKind::Keep,
            r(0.0, 10.0),
        )
        .unwrap();
        let with_keep = build_preview_timeline(10.0, &[keep, cut(2.0, 4.0)]);
        let without = build_preview_timeline(10.0, &[cut(2.0, 4.0)]);
        assert_eq!(with_keep, without);
    }
}
