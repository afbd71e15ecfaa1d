//! Edit decision store with snapshot-based undo/redo.
//!
//! The store holds the ordered decision list behind an `Arc`. Every
//! mutation builds a new list and swaps it in, so a snapshot handed out
//! earlier never changes and history entries share storage with it.
//!
//! History rules:
//! - `add` and `remove` always push the prior list onto the undo stack and
//!   clear the redo stack, even when nothing was added or no id matched.
//! - `clear` does the same, but only when the list is non-empty.
//! - `undo`/`redo` move snapshots between the stacks and are silent no-ops
//!   when their stack is empty.
//! - The undo stack never contains the current list.

use std::collections::HashSet;
use std::sync::Arc;

use cutline_common::config::HistoryConfig;
use cutline_edit_model::decision::{DecisionId, EditDecision};

/// Shared, immutable view of a decision list.
pub type DecisionSnapshot = Arc<Vec<EditDecision>>;

/// Undo/redo stacks of full-list snapshots.
#[derive(Debug, Clone)]
pub struct EditHistory {
    undo_stack: Vec<DecisionSnapshot>,
    redo_stack: Vec<DecisionSnapshot>,
    max_depth: usize,
}

impl EditHistory {
    /// Create a history keeping at most `max_depth` undo entries (minimum 1).
    pub fn new(max_depth: usize) -> Self {
        Self {
            undo_stack: Vec::new(),
            redo_stack: Vec::new(),
            max_depth: max_depth.max(1),
        }
    }

    /// Record `previous` as the state before a new mutation.
    fn record(&mut self, previous: DecisionSnapshot) {
        self.redo_stack.clear();
        self.undo_stack.push(previous);
        if self.undo_stack.len() > self.max_depth {
            let excess = self.undo_stack.len() - self.max_depth;
            self.undo_stack.drain(..excess);
        }
    }

    pub fn can_undo(&self) -> bool {
        !self.undo_stack.is_empty()
    }

    pub fn can_redo(&self) -> bool {
        !self.redo_stack.is_empty()
    }

    pub fn undo_depth(&self) -> usize {
        self.undo_stack.len()
    }

    pub fn redo_depth(&self) -> usize {
        self.redo_stack.len()
    }
}

impl Default for EditHistory {
    fn default() -> Self {
        Self::new(HistoryConfig::default().max_depth)
    }
}

/// Ordered, id-keyed list of edit decisions.
#[derive(Debug, Clone, Default)]
pub struct EditDecisionStore {
    decisions: DecisionSnapshot,
    history: EditHistory,
}

impl EditDecisionStore {
    /// Create an empty store with the given history settings.
    pub fn new(config: &HistoryConfig) -> Self {
        Self {
            decisions: Arc::new(Vec::new()),
            history: EditHistory::new(config.max_depth),
        }
    }

    /// Create a store preloaded with `decisions` and an empty history.
    ///
    /// Later entries whose id repeats an earlier one are dropped.
    pub fn from_decisions(decisions: Vec<EditDecision>, config: &HistoryConfig) -> Self {
        let mut seen = HashSet::new();
        let unique: Vec<EditDecision> = decisions
            .into_iter()
            .filter(|d| seen.insert(d.id.clone()))
            .collect();
        Self {
            decisions: Arc::new(unique),
            history: EditHistory::new(config.max_depth),
        }
    }

    /// Current decisions in authoring order.
    pub fn decisions(&self) -> &[EditDecision] {
        &self.decisions
    }

    /// Cheap shared handle to the current list.
    pub fn snapshot(&self) -> DecisionSnapshot {
        Arc::clone(&self.decisions)
    }

    pub fn get(&self, id: &DecisionId) -> Option<&EditDecision> {
        self.decisions.iter().find(|d| &d.id == id)
    }

    pub fn len(&self) -> usize {
        self.decisions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.decisions.is_empty()
    }

    pub fn history(&self) -> &EditHistory {
        &self.history
    }

    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }

    /// Append decisions. Returns whether the list changed.
    ///
    /// Decisions whose id is already present are skipped. The prior list is
    /// recorded for undo either way.
    pub fn add(&mut self, decisions: Vec<EditDecision>) -> bool {
        let mut seen: HashSet<DecisionId> = self.decisions.iter().map(|d| d.id.clone()).collect();
        let mut next: Vec<EditDecision> = self.decisions.as_ref().clone();
        let before = next.len();

        for decision in decisions {
            if seen.insert(decision.id.clone()) {
                next.push(decision);
            } else {
                tracing::warn!(id = %decision.id, "Skipping decision with duplicate id");
            }
        }

        let added = next.len() - before;
        self.replace(next);
        tracing::debug!(
            added,
            total = self.decisions.len(),
            undo_depth = self.history.undo_depth(),
            "Decisions added"
        );
        added > 0
    }

    /// Remove the decision with `id`. Returns whether a decision matched.
    ///
    /// An unknown id leaves the list as it was but is still recorded for
    /// undo, like any other remove.
    pub fn remove(&mut self, id: &DecisionId) -> bool {
        let next: Vec<EditDecision> = self
            .decisions
            .iter()
            .filter(|d| &d.id != id)
            .cloned()
            .collect();
        let removed = next.len() < self.decisions.len();
        self.replace(next);
        if removed {
            tracing::debug!(%id, total = self.decisions.len(), "Decision removed");
        } else {
            tracing::debug!(%id, "Remove matched no decision");
        }
        removed
    }

    /// Remove every decision. A no-op on an empty list.
    pub fn clear(&mut self) -> bool {
        if self.decisions.is_empty() {
            return false;
        }
        self.replace(Vec::new());
        tracing::debug!(undo_depth = self.history.undo_depth(), "Decisions cleared");
        true
    }

    /// Restore the list from before the last mutation.
    pub fn undo(&mut self) -> bool {
        let Some(previous) = self.history.undo_stack.pop() else {
            return false;
        };
        let current = std::mem::replace(&mut self.decisions, previous);
        self.history.redo_stack.push(current);
        tracing::debug!(
            undo_depth = self.history.undo_depth(),
            redo_depth = self.history.redo_depth(),
            "Undo"
        );
        true
    }

    /// Re-apply the last undone mutation.
    pub fn redo(&mut self) -> bool {
        let Some(next) = self.history.redo_stack.pop() else {
            return false;
        };
        let current = std::mem::replace(&mut self.decisions, next);
        self.history.undo_stack.push(current);
        tracing::debug!(
            undo_depth = self.history.undo_depth(),
            redo_depth = self.history.redo_depth(),
            "Redo"
        );
        true
    }

    /// Swap in a new list, recording the old one for undo.
    fn replace(&mut self, next: Vec<EditDecision>) {
        let previous = std::mem::replace(&mut self.decisions, Arc::new(next));
        self.history.record(previous);
    }
}
