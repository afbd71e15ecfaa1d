//! Cutline Export Planner
//!
//! Converts a preview timeline into what an external transcoder needs to
//! render the edit: the ordered source segments to keep and a filter graph
//! that trims, retimes, and concatenates them.
//!
//! # Pipeline Architecture
//!
//! ```text
//! decisions ── build_preview_timeline ── PreviewTimeline
//!                                              │
//!                                         plan_export
//!                                              │
//!                          ┌───────────────────┴──────────────┐
//!                     segments                          filter graph
//!                 {start,end,speed}          trim ─ retime ─ concat ─ [outv][outa]
//! ```
//!
//! Nothing here runs a transcoder; [`ExportPlan::ffmpeg_args`] only
//! renders the argument list.

pub mod plan;

pub use plan::*;
