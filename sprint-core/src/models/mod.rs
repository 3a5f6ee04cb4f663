//! Domain models for sprint-hub.
//!
//! # Core Concepts
//!
//! ## Buffer
//!
//! - [`BufferEntry`]: One captured, labeled text fragment waiting to be pushed.
//!   At most one entry exists per label inside a buffer.
//! - [`EntrySource`]: Where the fragment came from (piped stdin, clipboard).
//!
//! ## Assessment
//!
//! - [`DestinationDoc`]: A spreadsheet or text document registered under a sprint.
//! - [`Capture`]: The routing of a label to a spreadsheet cell or to the
//!   position right after a document heading.

mod destination;
mod entry;

pub use destination::*;
pub use entry::*;
