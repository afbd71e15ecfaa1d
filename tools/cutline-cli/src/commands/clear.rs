//! Remove every decision from a session.

use std::path::PathBuf;

use cutline_common::config::AppConfig;

pub fn run(path: PathBuf, config: &AppConfig) -> anyhow::Result<()> {
    let mut session = super::load_session(&path)?;
    let mut store = super::session_store(&session, config);
    let count = store.len();

    if store.clear() {
        session.set_decisions(vec![]);
        super::save_session(&session, &path)?;
        println!("Cleared {count} decision(s).");
    } else {
        println!("Session has no decisions; nothing changed.");
    }

    Ok(())
}
