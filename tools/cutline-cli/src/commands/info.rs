//! Show session information.

use std::path::PathBuf;

use cutline_common::config::AppConfig;
use cutline_edit_engine::build_preview_timeline;
use cutline_edit_model::analysis::AnnotationType;

pub fn run(path: PathBuf, config: &AppConfig) -> anyhow::Result<()> {
    let session = super::load_session(&path)?;

    println!("Session: {}", session.name);
    println!("  Version: {}", session.version);
    println!("  Created: {}", session.created_at);
    println!("  Modified: {}", session.modified_at);
    println!("  Media duration: {:.3}s", session.media_duration);
    println!();

    println!("Analysis:");
    for kind in [
        AnnotationType::Talking,
        AnnotationType::Silence,
        AnnotationType::Filler,
        AnnotationType::Scene,
        AnnotationType::Noise,
        AnnotationType::Music,
    ] {
        let matching: Vec<_> = session
            .annotations
            .iter()
            .filter(|a| a.kind == kind)
            .collect();
        if matching.is_empty() {
            continue;
        }
        let confident = matching
            .iter()
            .filter(|a| a.confidence >= config.quick_commands.min_confidence)
            .count();
        println!(
            "  {kind:?}: {} ({confident} above confidence {})",
            matching.len(),
            config.quick_commands.min_confidence
        );
    }
    println!("  Transcript segments: {}", session.transcript.len());
    println!();

    println!("Decisions:");
    super::print_decisions(&session.decisions);
    println!();

    println!("Preview:");
    let store = super::session_store(&session, config);
    let timeline = build_preview_timeline(session.media_duration, store.decisions());
    super::print_timeline_summary(&timeline);

    let issues = session.validate();
    if !issues.is_empty() {
        println!("\nValidation issues:");
        for issue in &issues {
            println!("  - {issue}");
        }
    }

    Ok(())
}
