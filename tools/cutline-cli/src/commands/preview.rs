//! Show the preview timeline.

use std::path::PathBuf;

use cutline_edit_engine::{build_preview_timeline, overlay_windows};

pub fn run(path: PathBuf, json: bool) -> anyhow::Result<()> {
    let session = super::load_session(&path)?;
    let timeline = build_preview_timeline(session.media_duration, &session.decisions);

    if json {
        println!("{}", serde_json::to_string_pretty(&timeline)?);
        return Ok(());
    }

    println!("Preview of '{}':", session.name);
    super::print_timeline_summary(&timeline);
    println!();

    println!("  {:>3}  {:>21}  {:>21}  speed", "#", "original", "preview");
    for (i, s) in timeline.segments.iter().enumerate() {
        println!(
            "  {i:>3}  {:>9.3} - {:>9.3}  {:>9.3} - {:>9.3}  x{}",
            s.original_start, s.original_end, s.preview_start, s.preview_end, s.speed_factor
        );
    }

    let windows = overlay_windows(&session.decisions, &timeline);
    if !windows.is_empty() {
        println!();
        println!("Overlays:");
        for window in &windows {
            println!(
                "  {:>9.3} - {:>9.3}  {}",
                window.preview.start,
                window.preview.end,
                super::describe(window.decision)
            );
        }
    }

    Ok(())
}
