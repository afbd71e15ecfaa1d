use std::path::PathBuf;

use cutline_common::config::{HistoryConfig, QuickCommandConfig};
use cutline_edit_engine::{
    build_preview_timeline, overlay_windows, EditDecisionStore, QuickCommandContext,
    QuickCommandMatcher,
};
use cutline_edit_model::range::TimeRange;
use cutline_edit_model::session::Session;

fn load_fixture_session() -> Session {
    let path = PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("..")
        .join("..")
        .join("fixtures")
        .join("sample-session")
        .join("session.json");

    Session::load(path).expect("fixture session should load")
}

fn ctx(session: &Session) -> QuickCommandContext<'_> {
    QuickCommandContext {
        duration: session.media_duration,
        annotations: &session.annotations,
        transcript: &session.transcript,
    }
}

fn r(start: f64, end: f64) -> TimeRange {
    TimeRange::from_bounds(start, end)
}

#[test]
fn fixture_session_is_valid() {
    let session = load_fixture_session();
    assert!(session.validate().is_empty(), "{:?}", session.validate());
    assert_eq!(session.decisions.len(), 1);
}

#[test]
fn remove_silence_respects_confidence_floor() {
    let session = load_fixture_session();
    let matcher = QuickCommandMatcher::new(QuickCommandConfig {
        min_confidence: 0.5,
        ..Default::default()
    });

    let result = matcher.try_match("Remove all silence", &ctx(&session)).unwrap();
    assert_eq!(result.affected_time_ranges, vec![r(40.0, 44.0), r(80.0, 86.5)]);

    let mut store =
        EditDecisionStore::from_decisions(session.decisions.clone(), &HistoryConfig::default());
    store.add(result.edits);
    let timeline = build_preview_timeline(session.media_duration, store.decisions());
    assert_eq!(timeline.preview_duration, 109.5);
    assert_eq!(timeline.cut_count, 2);

    // The title caption sits before both cuts and keeps its position.
    let windows = overlay_windows(store.decisions(), &timeline);
    assert_eq!(windows.len(), 1);
    assert_eq!(windows[0].preview, r(5.0, 10.0));

    assert!(store.undo());
    assert_eq!(store.decisions(), session.decisions.as_slice());
}

#[test]
fn cut_fillers_combines_annotations_and_transcript() {
    let session = load_fixture_session();
    let result = QuickCommandMatcher::default()
        .try_match("cut the filler words", &ctx(&session))
        .unwrap();
    // The flagged segment duplicates the filler annotation; the "uh" in t-4
    // marks that whole segment.
    assert_eq!(result.affected_time_ranges, vec![r(12.0, 12.6), r(44.0, 80.0)]);
}

#[test]
fn keep_talking_only_cuts_every_gap() {
    let session = load_fixture_session();
    let result = QuickCommandMatcher::default()
        .try_match("keep only the talking", &ctx(&session))
        .unwrap();
    assert_eq!(
        result.affected_time_ranges,
        vec![r(0.0, 2.0), r(40.0, 44.0), r(80.0, 86.5), r(115.0, 120.0)]
    );
}

#[test]
fn remove_long_pauses() {
    let session = load_fixture_session();
    let result = QuickCommandMatcher::default()
        .try_match("remove pauses longer than 5 seconds", &ctx(&session))
        .unwrap();
    assert_eq!(result.affected_time_ranges, vec![r(80.0, 86.5)]);
}
