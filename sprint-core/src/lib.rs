//! # sprint-core
//!
//! Capture, label and push engine for timed security assessments.
//!
//! Tool output is captured into an [`EntryBuffer`] under a label proposed
//! by [`suggest`]. Each sprint's [`AssessmentConfig`] maps labels to a
//! spreadsheet cell or a document heading, and [`push_all`] delivers the
//! buffer through a [`DocumentAdapter`].
//!
//! ```text
//! capture ──▶ suggest ──▶ EntryBuffer ──┐
//!                                       ├──▶ push_all ──▶ DocumentAdapter
//!             AssessmentConfig ─────────┘
//! ```
//!
//! ## Modules
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`models`] | Entries, destinations, captures |
//! | [`buffer`] | Persisted entry buffer |
//! | [`assessment`] | Per-sprint destinations and label routing |
//! | [`workspace`] | Config directory and active sprint pointer |
//! | [`suggest`] | Label suggestion |
//! | [`adapter`] | Document service boundary and heading rules |
//! | [`push`] | Push engine |

pub mod adapter;
pub mod assessment;
pub mod buffer;
pub mod error;
pub mod models;
pub mod push;
pub mod suggest;
pub mod workspace;

pub use adapter::{DocumentAdapter, Paragraph, ResolvedUrl};
pub use assessment::AssessmentConfig;
pub use buffer::EntryBuffer;
pub use error::{Error, Result};
pub use push::{push_all, push_entry, PushOutcome, PushReport, PushResult};
pub use suggest::suggest;
pub use workspace::Workspace;
