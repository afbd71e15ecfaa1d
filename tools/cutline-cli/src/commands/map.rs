//! Convert a time between original and preview time.

use std::path::PathBuf;

use cutline_edit_engine::{
    build_preview_timeline, original_to_preview, original_to_preview_snapped, preview_to_original,
};

pub fn run(path: PathBuf, original: Option<f64>, preview: Option<f64>) -> anyhow::Result<()> {
    let session = super::load_session(&path)?;
    let timeline = build_preview_timeline(session.media_duration, &session.decisions);

    match (original, preview) {
        (Some(t), _) => match original_to_preview(t, &timeline) {
            Some(mapped) => println!("original {t:.3}s -> preview {mapped:.3}s"),
            None => println!(
                "original {t:.3}s is cut; playback resumes at preview {:.3}s",
                original_to_preview_snapped(t, &timeline)
            ),
        },
        (None, Some(t)) => println!(
            "preview {t:.3}s -> original {:.3}s",
            preview_to_original(t, &timeline)
        ),
        (None, None) => anyhow::bail!("Pass --original or --preview"),
    }

    Ok(())
}
