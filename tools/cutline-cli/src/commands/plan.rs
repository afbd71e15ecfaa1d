//! Show the export plan for a session.

use std::path::PathBuf;

use cutline_edit_engine::build_preview_timeline;
use cutline_export_planner::{plan_export, ExportOptions};

pub fn run(
    path: PathBuf,
    input: Option<PathBuf>,
    output: PathBuf,
    include_audio: bool,
    json: bool,
) -> anyhow::Result<()> {
    let session = super::load_session(&path)?;
    let timeline = build_preview_timeline(session.media_duration, &session.decisions);
    let plan = plan_export(&timeline, &ExportOptions { include_audio });

    if json {
        println!("{}", serde_json::to_string_pretty(&plan)?);
        return Ok(());
    }

    println!("Export plan for '{}':", session.name);
    println!(
        "  Segments: {} ({:.3}s output)",
        plan.segments.len(),
        plan.output_duration
    );
    for (i, segment) in plan.segments.iter().enumerate() {
        println!(
            "  {i:>3}  {:>9.3} - {:>9.3}  x{}",
            segment.start, segment.end, segment.speed
        );
    }

    let Some(graph) = &plan.filter_graph else {
        println!("\nEverything is cut; there is nothing to export.");
        return Ok(());
    };

    println!();
    println!("Filter graph:");
    for filter in graph.split(';') {
        println!("  {filter}");
    }

    if let Some(input) = input {
        let args = plan.ffmpeg_args(&input, &output)?;
        println!();
        println!("Command:");
        println!("  ffmpeg {}", args.iter().map(|a| shell_quote(a)).collect::<Vec<_>>().join(" "));
    }

    Ok(())
}

fn shell_quote(arg: &str) -> String {
    if arg
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || "-_./:=".contains(c))
    {
        arg.to_string()
    } else {
        format!("'{}'", arg.replace('\'', r"'\''"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shell_quote() {
        assert_eq!(shell_quote("out.mp4"), "out.mp4");
        assert_eq!(shell_quote("[outv]"), "'[outv]'");
        assert_eq!(shell_quote("it's.mp4"), r"'it'\''s.mp4'");
    }
}
