//! # sprint-hub
//!
//! Command-line front end for [`sprint_core`]: capture tool output, label
//! it, and push it into the sprint's Google Sheets and Docs.
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`settings`] | Environment configuration |
//! | [`google`] | Sheets / Docs REST adapter |
//! | [`setup`] | Destination registration prompts |
//! | [`commands`] | Command handlers |
//! | [`input`] | Clipboard and stdin readers |
//! | [`dashboard`] | Terminal dashboard |

pub mod commands;
pub mod dashboard;
pub mod google;
pub mod input;
pub mod settings;
pub mod setup;

pub use settings::Settings;
