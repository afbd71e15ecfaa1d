//! Subcommand implementations and shared session helpers.

use std::path::Path;

use cutline_common::config::AppConfig;
use cutline_edit_engine::EditDecisionStore;
use cutline_edit_model::decision::{EditDecision, EditKind};
use cutline_edit_model::session::Session;
use cutline_edit_model::timeline::PreviewTimeline;

pub mod clear;
pub mod command;
pub mod info;
pub mod init;
pub mod map;
pub mod plan;
pub mod preview;
pub mod remove;
pub mod shell;

pub(crate) fn load_session(path: &Path) -> anyhow::Result<Session> {
    let session =
        Session::load(path).map_err(|e| anyhow::anyhow!("Failed to load session: {e}"))?;
    tracing::debug!(
        path = %path.display(),
        decisions = session.decisions.len(),
        annotations = session.annotations.len(),
        "Loaded session"
    );
    Ok(session)
}

pub(crate) fn save_session(session: &Session, path: &Path) -> anyhow::Result<()> {
    session
        .save(path)
        .map_err(|e| anyhow::anyhow!("Failed to save session: {e}"))
}

/// Store seeded with the session's decisions.
pub(crate) fn session_store(session: &Session, config: &AppConfig) -> EditDecisionStore {
    EditDecisionStore::from_decisions(session.decisions.clone(), &config.history)
}

pub(crate) fn describe(decision: &EditDecision) -> String {
    let params = match &decision.kind {
        EditKind::Cut | EditKind::Keep => String::new(),
        EditKind::Speed { factor } => format!(" x{factor}"),
        EditKind::Caption { text, placement } => format!(" {text:?} ({placement:?})"),
        EditKind::Zoom {
            scale,
            center_x,
            center_y,
        } => format!(" {scale}x at ({center_x:.2}, {center_y:.2})"),
        EditKind::Audio {
            volume,
            normalize,
            mute,
        } => format!(" volume={volume} normalize={normalize} mute={mute}"),
    };
    let label = decision
        .label
        .as_deref()
        .map(|l| format!(" [{l}]"))
        .unwrap_or_default();

    format!(
        "{id}  {kind:<7} {start:>9.3}s - {end:>9.3}s{params}{label}",
        id = decision.id,
        kind = decision.kind.name(),
        start = decision.range.start,
        end = decision.range.end,
    )
}

pub(crate) fn print_decisions(decisions: &[EditDecision]) {
    if decisions.is_empty() {
        println!("  (no decisions)");
    }
    for decision in decisions {
        println!("  {}", describe(decision));
    }
}

pub(crate) fn print_timeline_summary(timeline: &PreviewTimeline) {
    println!(
        "  Original: {:.3}s -> Preview: {:.3}s ({:.1}% of original length)",
        timeline.original_duration,
        timeline.preview_duration,
        timeline.compression_ratio() * 100.0
    );
    println!(
        "  Cuts: {} ({:.3}s removed)",
        timeline.cut_count, timeline.total_cut_duration
    );
    println!("  Segments: {}", timeline.segments.len());
}
