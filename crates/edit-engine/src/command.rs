//! Free-text command pipeline.
//!
//! Quick-command rules run first. Anything they do not recognize is sent to
//! a [`CommandInterpreter`], whose draft edits are validated as a batch: one
//! bad edit fails the whole command and nothing is applied.
//!
//! The pipeline never touches the store. Callers add `CommandResult::edits`
//! themselves once the future resolves.

use serde::{Deserialize, Serialize};

use cutline_common::error::{CutlineError, CutlineResult};
use cutline_edit_model::analysis::{Annotation, TranscriptSegment};
use cutline_edit_model::command::CommandResult;
use cutline_edit_model::decision::{EditDecision, EditKind};
use cutline_edit_model::range::TimeRange;

use crate::quick_command::{QuickCommandContext, QuickCommandMatcher};

/// Payload sent to an interpreter.
#[derive(Debug, Clone, Serialize)]
pub struct InterpretRequest<'a> {
    pub command: &'a str,
    pub duration: f64,
    pub annotations: &'a [Annotation],
    pub transcript: &'a [TranscriptSegment],
}

/// An edit proposed by an interpreter, before validation and id assignment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DraftEdit {
    #[serde(flatten)]
    pub kind: EditKind,
    pub range: TimeRange,
    #[serde(default)]
    pub label: Option<String>,
}

/// An interpreter's answer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InterpretedCommand {
    pub interpretation: String,
    #[serde(default)]
    pub edits: Vec<DraftEdit>,
}

/// Turns free-text commands the quick rules do not cover into draft edits.
#[async_trait::async_trait]
pub trait CommandInterpreter: Send + Sync {
    /// Short name used in logs.
    fn name(&self) -> &str;

    async fn interpret(&self, request: &InterpretRequest<'_>) -> CutlineResult<InterpretedCommand>;
}

/// Quick rules plus interpreter fallback.
pub struct CommandProcessor {
    matcher: QuickCommandMatcher,
    interpreter: Box<dyn CommandInterpreter>,
}

impl CommandProcessor {
    pub fn new(matcher: QuickCommandMatcher, interpreter: Box<dyn CommandInterpreter>) -> Self {
        Self {
            matcher,
            interpreter,
        }
    }

    /// Resolve `text` into edit decisions.
    ///
    /// Never returns an error: interpreter failures and invalid edits come
    /// back as a failed `CommandResult` with no edits.
    pub async fn process(&self, text: &str, ctx: &QuickCommandContext<'_>) -> CommandResult {
        let text = text.trim();
        if text.is_empty() {
            return CommandResult::failed("", "Command is empty");
        }

        if let Some(result) = self.matcher.try_match(text, ctx) {
            return result;
        }

        let request = InterpretRequest {
            command: text,
            duration: ctx.duration,
            annotations: ctx.annotations,
            transcript: ctx.transcript,
        };

        tracing::debug!(
            interpreter = self.interpreter.name(),
            command = text,
            "Delegating command"
        );
        let interpreted = match self.interpreter.interpret(&request).await {
            Ok(interpreted) => interpreted,
            Err(e) => {
                tracing::warn!(
                    interpreter = self.interpreter.name(),
                    error = %e,
                    "Interpreter failed"
                );
                return CommandResult::failed(text, e.to_string());
            }
        };

        match finalize_drafts(text, interpreted.edits) {
            Ok(edits) => {
                tracing::info!(edits = edits.len(), "Interpreted command");
                CommandResult::applied(interpreted.interpretation, edits)
            }
            Err(e) => {
                tracing::warn!(error = %e, "Interpreter returned invalid edits");
                CommandResult::failed(interpreted.interpretation, e.to_string())
            }
        }
    }
}

/// Validate drafts and turn them into decisions. Fails on the first
/// invalid draft.
fn finalize_drafts(origin: &str, drafts: Vec<DraftEdit>) -> CutlineResult<Vec<EditDecision>> {
    drafts
        .into_iter()
        .enumerate()
        .map(|(index, draft)| {
            let decision = EditDecision::new(draft.kind, draft.range)
                .map_err(|e| CutlineError::invalid_edit(format!("edit {index}: {e}")))?
                .with_origin(origin);
            Ok(match draft.label {
                Some(label) => decision.with_label(label),
                None => decision,
            })
        })
        .collect()
}
