//! Export plan: ordered source segments plus a transcoder filter graph.
//!
//! Each kept segment is trimmed from input 0 into its own labeled stream
//! pair, retimed when its speed differs from 1, and all pairs are joined by
//! a single `concat`. A single segment skips concat and writes straight to
//! the output labels.
//!
//! ```text
//! [0:v]trim=..,setpts=..[v0]   [0:a]atrim=..,asetpts=..[a0]
//! [0:v]trim=..,setpts=..[v1]   [0:a]atrim=..,asetpts=..,atempo=..[a1]
//! [v0][a0][v1][a1]concat=n=2:v=1:a=1[outv][outa]
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};

use cutline_common::error::{CutlineError, CutlineResult};
use cutline_edit_model::timeline::PreviewTimeline;

/// Output label of the final video stream.
pub const VIDEO_OUTPUT: &str = "outv";

/// Output label of the final audio stream.
pub const AUDIO_OUTPUT: &str = "outa";

/// Per-stage tempo bounds accepted by `atempo`.
const ATEMPO_MIN: f64 = 0.5;
const ATEMPO_MAX: f64 = 2.0;

/// Export options.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExportOptions {
    /// Plan audio streams. Disable for media without an audio track.
    pub include_audio: bool,
}

impl Default for ExportOptions {
    fn default() -> Self {
        Self {
            include_audio: true,
        }
    }
}

/// A span of source media to keep, in original time.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ExportSegment {
    pub start: f64,
    pub end: f64,
    pub speed: f64,
}

impl ExportSegment {
    /// Length in the output.
    pub fn output_duration(&self) -> f64 {
        (self.end - self.start) / self.speed
    }

    fn is_retimed(&self) -> bool {
        (self.speed - 1.0).abs() > f64::EPSILON
    }
}

/// Everything an external transcoder needs to render the edit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExportPlan {
    pub segments: Vec<ExportSegment>,

    /// Filter graph text; `None` when nothing is kept.
    pub filter_graph: Option<String>,

    /// Label of the video stream to map, e.g. `[outv]`.
    pub video_output: String,

    /// Label of the audio stream to map, if audio is planned.
    pub audio_output: Option<String>,

    /// Output length in seconds.
    pub output_duration: f64,
}

impl ExportPlan {
    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// Render the plan as transcoder arguments (without the program name).
    pub fn ffmpeg_args(&self, input: &Path, output: &Path) -> CutlineResult<Vec<String>> {
        let Some(graph) = &self.filter_graph else {
            return Err(CutlineError::export(
                "Nothing to export: every part of the media is cut",
            ));
        };

        let mut args = vec![
            "-y".to_string(),
            "-hide_banner".to_string(),
            "-loglevel".to_string(),
            "error".to_string(),
            "-i".to_string(),
            input.display().to_string(),
            "-filter_complex".to_string(),
            graph.clone(),
            "-map".to_string(),
            self.video_output.clone(),
        ];
        if let Some(audio) = &self.audio_output {
            args.push("-map".to_string());
            args.push(audio.clone());
        }
        args.push(output.display().to_string());
        Ok(args)
    }
}

/// Build the export plan for `timeline`.
pub fn plan_export(timeline: &PreviewTimeline, options: &ExportOptions) -> ExportPlan {
    let segments: Vec<ExportSegment> = timeline
        .segments
        .iter()
        .map(|s| ExportSegment {
            start: s.original_start,
            end: s.original_end,
            speed: s.speed_factor,
        })
        .collect();

    let filter_graph = build_filter_graph(&segments, options.include_audio);
    let output_duration = segments.iter().map(ExportSegment::output_duration).sum();

    tracing::info!(
        segments = segments.len(),
        retimed = segments.iter().filter(|s| s.is_retimed()).count(),
        output_duration,
        include_audio = options.include_audio,
        "Planned export"
    );

    ExportPlan {
        segments,
        filter_graph,
        video_output: format!("[{VIDEO_OUTPUT}]"),
        audio_output: options
            .include_audio
            .then(|| format!("[{AUDIO_OUTPUT}]")),
        output_duration,
    }
}

fn build_filter_graph(segments: &[ExportSegment], include_audio: bool) -> Option<String> {
    if segments.is_empty() {
        return None;
    }

    let single = segments.len() == 1;
    let mut filters = Vec::with_capacity(segments.len() * 2 + 1);
    let mut concat_inputs = String::new();

    for (i, segment) in segments.iter().enumerate() {
        let (video, audio) = if single {
            (VIDEO_OUTPUT.to_string(), AUDIO_OUTPUT.to_string())
        } else {
            (format!("v{i}"), format!("a{i}"))
        };

        let retime = if segment.is_retimed() {
            format!("{}*(PTS-STARTPTS)", format_factor(1.0 / segment.speed))
        } else {
            "PTS-STARTPTS".to_string()
        };
        filters.push(format!(
            "[0:v]trim=start={start}:end={end},setpts={retime}[{video}]",
            start = format_time(segment.start),
            end = format_time(segment.end),
        ));
        concat_inputs.push_str(&format!("[{video}]"));

        if include_audio {
            let mut chain = format!(
                "[0:a]atrim=start={start}:end={end},asetpts=PTS-STARTPTS",
                start = format_time(segment.start),
                end = format_time(segment.end),
            );
            if segment.is_retimed() {
                for stage in atempo_stages(segment.speed) {
                    chain.push_str(&format!(",atempo={}", format_number(stage)));
                }
            }
            filters.push(format!("{chain}[{audio}]"));
            concat_inputs.push_str(&format!("[{audio}]"));
        }
    }

    if !single {
        let (audio_streams, audio_out) = if include_audio {
            (1, format!("[{AUDIO_OUTPUT}]"))
        } else {
            (0, String::new())
        };
        filters.push(format!(
            "{concat_inputs}concat=n={count}:v=1:a={audio_streams}[{VIDEO_OUTPUT}]{audio_out}",
            count = segments.len(),
        ));
    }

    Some(filters.join(";"))
}

/// Split a tempo factor into stages within the per-stage bounds whose
/// product equals `speed`.
fn atempo_stages(speed: f64) -> Vec<f64> {
    let mut stages = vec![];
    let mut remaining = speed;
    while remaining > ATEMPO_MAX {
        stages.push(ATEMPO_MAX);
        remaining /= ATEMPO_MAX;
    }
    while remaining < ATEMPO_MIN {
        stages.push(ATEMPO_MIN);
        remaining /= ATEMPO_MIN;
    }
    stages.push(remaining);
    stages
}

fn format_time(value: f64) -> String {
    format!("{value:.6}")
}

/// Up to six decimals with trailing zeros removed.
fn format_number(value: f64) -> String {
    let text = format!("{value:.6}");
    text.trim_end_matches('0').trim_end_matches('.').to_string()
}

/// Like [`format_number`], but a non-zero factor never prints as `0`.
fn format_factor(value: f64) -> String {
    let text = format_number(value);
    if text == "0" && value != 0.0 {
        format!("{value}")
    } else {
        text
    }
}
