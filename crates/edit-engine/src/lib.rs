//! Cutline Edit Engine
//!
//! Turns analysis data and editing commands into a non-destructive edit:
//! - **Interval algebra:** merge, clip, and subtract half-open time ranges
//! - **Decision store:** ordered decisions with snapshot undo/redo
//! - **Preview timeline:** kept, retimed segments after cuts and speed changes
//! - **Time mapping:** original ↔ preview time for synchronized seeking
//! - **Quick commands:** rule-based edits from canonical phrases
//! - **Command pipeline:** quick rules with an external interpreter fallback
//!
//! Everything except the interpreter is pure computation: no I/O, no
//! ambient state. Configuration arrives as explicit arguments.

pub mod command;
pub mod interpreter;
pub mod interval;
pub mod preview;
pub mod quick_command;
pub mod store;
pub mod time_map;

pub use command::{
    CommandInterpreter, CommandProcessor, DraftEdit, InterpretRequest, InterpretedCommand,
};
pub use interpreter::{ProcessInterpreter, UnconfiguredInterpreter};
pub use preview::build_preview_timeline;
pub use quick_command::{QuickCommandContext, QuickCommandMatcher, QuickRule};
pub use store::{DecisionSnapshot, EditDecisionStore, EditHistory};
pub use time_map::{
    original_to_preview, original_to_preview_snapped, overlay_windows, preview_to_original,
    OverlayWindow,
};
