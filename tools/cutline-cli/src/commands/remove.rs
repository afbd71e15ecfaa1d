//! Remove a decision by id.

use std::path::PathBuf;

use cutline_common::config::AppConfig;
use cutline_edit_model::decision::DecisionId;

pub fn run(path: PathBuf, id: String, config: &AppConfig) -> anyhow::Result<()> {
    let mut session = super::load_session(&path)?;
    let mut store = super::session_store(&session, config);

    if store.remove(&DecisionId::from(id.as_str())) {
        session.set_decisions(store.decisions().to_vec());
        super::save_session(&session, &path)?;
        println!("Removed {id} ({} decision(s) left)", store.len());
    } else {
        println!("No decision with id {id}; nothing changed.");
    }

    Ok(())
}
