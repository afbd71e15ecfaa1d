//! Create a new session file.

use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;

use cutline_edit_model::session::Session;

pub fn run(
    path: PathBuf,
    duration: f64,
    name: Option<String>,
    annotations: Option<PathBuf>,
    transcript: Option<PathBuf>,
    force: bool,
) -> anyhow::Result<()> {
    if path.exists() && !force {
        anyhow::bail!(
            "{} already exists (use --force to overwrite)",
            path.display()
        );
    }
    if !(duration.is_finite() && duration > 0.0) {
        anyhow::bail!("Duration must be a positive number of seconds, got {duration}");
    }

    let name = name.unwrap_or_else(|| {
        path.file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_else(|| "session".to_string())
    });

    let mut session = Session::new(&name, duration);
    if let Some(file) = annotations {
        session.annotations = read_json_array(&file)?;
    }
    if let Some(file) = transcript {
        session.transcript = read_json_array(&file)?;
    }

    super::save_session(&session, &path)?;

    println!("Created session '{}' at {}", name, path.display());
    println!("  Duration: {duration:.3}s");
    println!("  Annotations: {}", session.annotations.len());
    println!("  Transcript segments: {}", session.transcript.len());

    let issues = session.validate();
    if !issues.is_empty() {
        println!("\nWarnings:");
        for issue in &issues {
            println!("  - {issue}");
        }
    }

    Ok(())
}

fn read_json_array<T: DeserializeOwned>(path: &Path) -> anyhow::Result<Vec<T>> {
    let content = std::fs::read_to_string(path)
        .map_err(|e| anyhow::anyhow!("Failed to read {}: {e}", path.display()))?;
    serde_json::from_str(&content)
        .map_err(|e| anyhow::anyhow!("Failed to parse {}: {e}", path.display()))
}
