//! Apply a free-text editing command to a session.

use std::path::PathBuf;

use cutline_common::config::AppConfig;
use cutline_edit_engine::{interpreter, CommandProcessor, QuickCommandContext, QuickCommandMatcher};
use cutline_edit_model::command::CommandResult;
use cutline_edit_model::session::Session;

pub fn processor(config: &AppConfig) -> CommandProcessor {
    CommandProcessor::new(
        QuickCommandMatcher::new(config.quick_commands.clone()),
        interpreter::from_config(&config.interpreter),
    )
}

pub async fn resolve(
    processor: &CommandProcessor,
    session: &Session,
    text: &str,
) -> CommandResult {
    let ctx = QuickCommandContext {
        duration: session.media_duration,
        annotations: &session.annotations,
        transcript: &session.transcript,
    };
    processor.process(text, &ctx).await
}

pub async fn run(
    path: PathBuf,
    text: String,
    dry_run: bool,
    config: &AppConfig,
) -> anyhow::Result<()> {
    let mut session = super::load_session(&path)?;
    let result = resolve(&processor(config), &session, &text).await;

    if !result.success {
        anyhow::bail!(
            "Command failed: {}",
            result.error.as_deref().unwrap_or("unknown error")
        );
    }

    println!("{}", result.interpretation);
    super::print_decisions(&result.edits);

    if dry_run {
        println!("\nDry run: session not modified.");
        return Ok(());
    }

    let mut store = super::session_store(&session, config);
    if store.add(result.edits) {
        session.set_decisions(store.decisions().to_vec());
        super::save_session(&session, &path)?;
        println!("\nSaved {} decision(s) to {}", store.len(), path.display());
    } else {
        println!("\nNothing to add.");
    }

    Ok(())
}
