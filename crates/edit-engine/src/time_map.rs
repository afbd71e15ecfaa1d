//! Original ↔ preview time conversion for synchronized seeking.

use cutline_edit_model::decision::{EditDecision, EditKind};
use cutline_edit_model::range::TimeRange;
use cutline_edit_model::timeline::{PreviewSegment, PreviewTimeline};

/// Map an original media time to preview time.
///
/// Returns `None` when `t` falls in a cut (or outside the media). The
/// playback clock is expected to snap forward; see
/// [`original_to_preview_snapped`].
pub fn original_to_preview(t: f64, timeline: &PreviewTimeline) -> Option<f64> {
    let segment = find_original(t, &timeline.segments)?;
    Some(segment.preview_start + (t - segment.original_start) / segment.speed_factor)
}

/// Like [`original_to_preview`], but times inside a cut snap to the start
/// of the next kept segment, and times after the last kept segment snap to
/// the end of the preview.
pub fn original_to_preview_snapped(t: f64, timeline: &PreviewTimeline) -> f64 {
    if let Some(mapped) = original_to_preview(t, timeline) {
        return mapped;
    }
    timeline
        .segments
        .iter()
        .find(|s| s.original_start >= t)
        .map(|s| s.preview_start)
        .unwrap_or(timeline.preview_duration)
}

/// Map a preview time back to original media time.
///
/// Never fails: times past the end clamp to the last kept segment's
/// original end, negative times clamp to the first kept segment's start,
/// and an empty timeline maps everything to 0.
pub fn preview_to_original(t: f64, timeline: &PreviewTimeline) -> f64 {
    let (Some(first), Some(last)) = (timeline.segments.first(), timeline.segments.last()) else {
        return 0.0;
    };

    if t.is_nan() || t <= first.preview_start {
        return first.original_start;
    }
    if t >= last.preview_end {
        return last.original_end;
    }

    let index = timeline
        .segments
        .partition_point(|s| s.preview_end <= t)
        .min(timeline.segments.len() - 1);
    let segment = &timeline.segments[index];
    let mapped = segment.original_start + (t - segment.preview_start) * segment.speed_factor;
    mapped.min(segment.original_end)
}

/// A decision's visibility window in preview time.
#[derive(Debug, Clone, PartialEq)]
pub struct OverlayWindow<'a> {
    pub decision: &'a EditDecision,
    /// Preview-time span where the decision applies.
    pub preview: TimeRange,
}

/// Preview-time windows of caption, zoom, and audio decisions.
///
/// Cut parts of a decision's range vanish from preview time, so the
/// surviving parts are contiguous and each decision yields at most one
/// window. Decisions entirely inside cuts yield nothing.
pub fn overlay_windows<'a>(
    decisions: &'a [EditDecision],
    timeline: &PreviewTimeline,
) -> Vec<OverlayWindow<'a>> {
    let mut windows = vec![];
    for decision in decisions {
        if !matches!(
            decision.kind,
            EditKind::Caption { .. } | EditKind::Zoom { .. } | EditKind::Audio { .. }
        ) {
            continue;
        }

        let mut window: Option<TimeRange> = None;
        for segment in &timeline.segments {
            let Some(part) = decision.range.intersect(&segment.original_range()) else {
                continue;
            };
            let to_preview =
                |t: f64| {
                    segment.preview_start + (t - segment.original_start) / segment.speed_factor
                };
            let start = window.map_or(to_preview(part.start), |w| w.start);
            window = Some(TimeRange::from_bounds(start, to_preview(part.end)));
        }

        if let Some(preview) = window {
            windows.push(OverlayWindow { decision, preview });
        }
    }
    windows
}

/// Binary search for the segment whose original range contains `t`.
fn find_original(t: f64, segments: &[PreviewSegment]) -> Option<&PreviewSegment> {
    let index = segments.partition_point(|s| s.original_end <= t);
    segments
        .get(index)
        .filter(|s| s.original_range().contains_time(t))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::preview::build_preview_timeline;
    use cutline_edit_model::decision::CaptionPlacement;

    fn r(start: f64, end: f64) -> TimeRange {
        TimeRange::from_bounds(start, end)
    }

    fn sample_timeline() -> PreviewTimeline {
        build_preview_timeline(
            100.0,
            &[
                EditDecision::cut(r(0.0, 10.0)).unwrap(),
                EditDecision::cut(r(40.0, 50.0)).unwrap(),
                EditDecision::speed(r(60.0, 80.0), 2.0).unwrap(),
            ],
        )
    }

    #[test]
    fn test_original_to_preview_in_kept_region() {
        let timeline = sample_timeline();
        assert_eq!(original_to_preview(10.0, &timeline), Some(0.0));
        assert_eq!(original_to_preview(25.0, &timeline), Some(15.0));
        assert_eq!(original_to_preview(50.0, &timeline), Some(30.0));
        // 60..80 at 2x lands in 40..50
        assert_eq!(original_to_preview(70.0, &timeline), Some(45.0));
        assert_eq!(original_to_preview(90.0, &timeline), Some(60.0));
    }

    #[test]
    fn test_original_to_preview_in_cut_is_none() {
        let timeline = sample_timeline();
        assert_eq!(original_to_preview(5.0, &timeline), None);
        assert_eq!(original_to_preview(45.0, &timeline), None);
        assert_eq!(original_to_preview(100.0, &timeline), None);
        assert_eq!(original_to_preview(-1.0, &timeline), None);
    }

    #[test]
    fn test_snapped_moves_to_next_segment() {
        let timeline = sample_timeline();
        assert_eq!(original_to_preview_snapped(5.0, &timeline), 0.0);
        assert_eq!(original_to_preview_snapped(45.0, &timeline), 30.0);
        assert_eq!(original_to_preview_snapped(150.0, &timeline), timeline.preview_duration);
    }

    #[test]
    fn test_preview_to_original() {
        let timeline = sample_timeline();
        assert_eq!(preview_to_original(0.0, &timeline), 10.0);
        assert_eq!(preview_to_original(30.0, &timeline), 50.0);
        assert_eq!(preview_to_original(45.0, &timeline), 70.0);
    }

    #[test]
    fn test_preview_to_original_clamps() {
        let timeline = sample_timeline();
        assert_eq!(preview_to_original(1_000.0, &timeline), 100.0);
        assert_eq!(preview_to_original(-3.0, &timeline), 10.0);
        assert_eq!(preview_to_original(0.0, &PreviewTimeline::empty(10.0)), 0.0);
    }

    #[test]
    fn test_overlay_window_closes_over_cut() {
        let timeline = sample_timeline();
        let caption = EditDecision::new(
            EditKind::Caption {
                text: "Hello".to_string(),
                placement: CaptionPlacement::Bottom,
            },
            r(35.0, 55.0),
        )
        .unwrap();
        let hidden = EditDecision::new(
            EditKind::Audio {
                volume: 0.5,
                normalize: false,
                mute: false,
            },
            r(41.0, 49.0),
        )
        .unwrap();
        let cut = EditDecision::cut(r(0.0, 10.0)).unwrap();
        let decisions = vec![caption, hidden, cut];

        let windows = overlay_windows(&decisions, &timeline);
        assert_eq!(windows.len(), 1);
        assert_eq!(windows[0].decision.id, decisions[0].id);
        assert_eq!(windows[0].preview, r(25.0, 35.0));
    }

    #[test]
    fn test_overlay_window_joins_speed_split() {
        let timeline = sample_timeline();
        let zoom = EditDecision::new(
            EditKind::Zoom {
                scale: 2.0,
                center_x: 0.5,
                center_y: 0.5,
            },
            r(55.0, 65.0),
        )
        .unwrap();
        let decisions = vec![zoom];

        let windows = overlay_windows(&decisions, &timeline);
        assert_eq!(windows.len(), 1);
        assert_eq!(windows[0].preview, r(35.0, 42.5));
    }
}
