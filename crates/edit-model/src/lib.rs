//! Cutline Edit Model
//!
//! Defines the core data contracts for Cutline:
//! - **Ranges:** Half-open spans of original media time
//! - **Decisions:** Declarative edit operations (cut, keep, speed, caption, zoom, audio)
//! - **Analysis:** Annotations and transcript segments from external analyzers
//! - **Timeline:** The derived, retimed preview timeline
//! - **Session:** The on-disk interchange file used by front ends
//!
//! All times are seconds of original (unedited) media unless a field says
//! it is in preview time.

pub mod analysis;
pub mod command;
pub mod decision;
pub mod error;
pub mod range;
pub mod session;
pub mod timeline;

pub use analysis::*;
pub use command::*;
pub use decision::*;
pub use error::*;
pub use range::*;
pub use session::*;
pub use timeline::*;
