use std::path::Path;

use cutline_edit_engine::build_preview_timeline;
use cutline_edit_model::decision::EditDecision;
use cutline_edit_model::range::TimeRange;
use cutline_export_planner::{plan_export, ExportOptions, ExportSegment};

fn r(start: f64, end: f64) -> TimeRange {
    TimeRange::from_bounds(start, end)
}

#[test]
fn plan_follows_cuts_and_speed() {
    let decisions = vec![
        EditDecision::cut(r(0.0, 10.0)).unwrap(),
        EditDecision::cut(r(40.0, 50.0)).unwrap(),
        EditDecision::speed(r(60.0, 80.0), 2.0).unwrap(),
    ];
    let timeline = build_preview_timeline(100.0, &decisions);
    let plan = plan_export(&timeline, &ExportOptions::default());

    assert_eq!(
        plan.segments,
        vec![
            ExportSegment { start: 10.0, end: 40.0, speed: 1.0 },
            ExportSegment { start: 50.0, end: 60.0, speed: 1.0 },
            ExportSegment { start: 60.0, end: 80.0, speed: 2.0 },
            ExportSegment { start: 80.0, end: 100.0, speed: 1.0 },
        ]
    );
    assert_eq!(plan.output_duration, timeline.preview_duration);
    assert!(plan
        .filter_graph
        .as_deref()
        .unwrap()
        .ends_with("[v0][a0][v1][a1][v2][a2][v3][a3]concat=n=4:v=1:a=1[outv][outa]"));
}

#[test]
fn uncut_media_is_a_single_trim() {
    let timeline = build_preview_timeline(12.5, &[]);
    let plan = plan_export(&timeline, &ExportOptions::default());

    assert_eq!(plan.segments.len(), 1);
    let args = plan
        .ffmpeg_args(Path::new("raw.mov"), Path::new("edit.mp4"))
        .unwrap();
    let graph = "[0:v]trim=start=0.000000:end=12.500000,setpts=PTS-STARTPTS[outv];\
                 [0:a]atrim=start=0.000000:end=12.500000,asetpts=PTS-STARTPTS[outa]";
    assert!(args.iter().any(|a| a == graph));
}

#[test]
fn plan_serializes_for_external_tools() {
    let timeline = build_preview_timeline(10.0, &[EditDecision::cut(r(0.0, 10.0)).unwrap()]);
    let plan = plan_export(&timeline, &ExportOptions::default());
    let json = serde_json::to_value(&plan).unwrap();

    assert_eq!(json["segments"], serde_json::json!([]));
    assert_eq!(json["filter_graph"], serde_json::Value::Null);
    assert_eq!(json["video_output"], "[outv]");
}
