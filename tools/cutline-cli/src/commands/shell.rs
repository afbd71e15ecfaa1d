//! Interactive editing session.
//!
//! Keeps one decision store alive across lines so undo and redo work.
//! History lives only as long as the shell; the session file stores the
//! decision list alone.

use std::io::Write;
use std::path::{Path, PathBuf};

use tokio::io::{AsyncBufReadExt, BufReader};

use cutline_common::config::AppConfig;
use cutline_edit_engine::build_preview_timeline;
use cutline_edit_engine::store::EditDecisionStore;
use cutline_edit_model::decision::DecisionId;
use cutline_edit_model::session::Session;

const HELP: &str = "\
Commands:
  <text>        apply an editing command, e.g. \"remove all silence\"
  list          show current decisions
  preview       show the preview summary
  remove <id>   remove a decision
  clear         remove all decisions
  undo / redo   step through history
  save          write decisions to the session file
  help          show this help
  quit          save and exit";

pub async fn run(path: PathBuf, config: &AppConfig) -> anyhow::Result<()> {
    let mut session = super::load_session(&path)?;
    let mut store = super::session_store(&session, config);
    let processor = super::command::processor(config);
    let mut dirty = false;

    println!(
        "Editing '{}' ({:.3}s, {} decision(s)). Type 'help' for commands.",
        session.name,
        session.media_duration,
        store.len()
    );

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        print!("cutline> ");
        std::io::stdout().flush()?;

        let Some(line) = lines.next_line().await? else {
            println!();
            break;
        };
        let line = line.trim();
        let (verb, rest) = line
            .split_once(char::is_whitespace)
            .map(|(v, r)| (v, r.trim()))
            .unwrap_or((line, ""));

        match verb {
            "" => {}
            "help" => println!("{HELP}"),
            "quit" | "exit" => break,
            "list" => super::print_decisions(store.decisions()),
            "preview" => {
                let timeline = build_preview_timeline(session.media_duration, store.decisions());
                super::print_timeline_summary(&timeline);
            }
            "undo" => {
                if store.undo() {
                    dirty = true;
                    println!("Undone ({} decision(s)).", store.len());
                } else {
                    println!("Nothing to undo.");
                }
            }
            "redo" => {
                if store.redo() {
                    dirty = true;
                    println!("Redone ({} decision(s)).", store.len());
                } else {
                    println!("Nothing to redo.");
                }
            }
            "remove" if !rest.is_empty() => {
                if store.remove(&DecisionId::from(rest)) {
                    dirty = true;
                    println!("Removed {rest}.");
                } else {
                    println!("No decision with id {rest}.");
                }
            }
            "remove" => println!("Usage: remove <id>"),
            "clear" => {
                if store.clear() {
                    dirty = true;
                    println!("Cleared.");
                } else {
                    println!("Nothing to clear.");
                }
            }
            "save" => {
                if save(&mut session, &store, &path) {
                    dirty = false;
                }
            }
            _ => {
                let result = super::command::resolve(&processor, &session, line).await;
                if !result.success {
                    println!(
                        "Command failed: {}",
                        result.error.as_deref().unwrap_or("unknown error")
                    );
                    continue;
                }
                println!("{}", result.interpretation);
                super::print_decisions(&result.edits);
                if store.add(result.edits) {
                    dirty = true;
                }
            }
        }
    }

    if dirty && !save(&mut session, &store, &path) {
        anyhow::bail!("Exited with unsaved changes");
    }

    Ok(())
}

/// Write the store's decisions to `path`. A failure is reported and the
/// shell keeps running with its history intact.
fn save(session: &mut Session, store: &EditDecisionStore, path: &Path) -> bool {
    session.set_decisions(store.decisions().to_vec());
    match super::save_session(session, path) {
        Ok(()) => {
            println!("Saved to {}.", path.display());
            true
        }
        Err(e) => {
            tracing::warn!(path = %path.display(), error = %e, "Shell save failed");
            println!("{e:#}");
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cutline_edit_model::decision::EditDecision;
    use cutline_edit_model::range::TimeRange;

    #[test]
    fn test_failed_save_keeps_history() {
        let dir = std::env::temp_dir().join("cutline_shell_save_test");
        std::fs::create_dir_all(&dir).unwrap();
        let blocker = dir.join("not-a-dir");
        std::fs::write(&blocker, "").unwrap();

        let mut session = Session::new("talk", 60.0);
        let mut store = EditDecisionStore::default();
        store.add(vec![EditDecision::cut(TimeRange::from_bounds(1.0, 2.0)).unwrap()]);

        assert!(!save(&mut session, &store, &blocker.join("session.json")));
        assert!(store.can_undo());
        assert_eq!(store.len(), 1);

        let path = dir.join("session.json");
        assert!(save(&mut session, &store, &path));
        assert_eq!(Session::load(&path).unwrap().decisions.len(), 1);

        std::fs::remove_dir_all(&dir).ok();
    }
}
