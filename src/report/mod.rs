//! Terminal output for the CLI.
//!
//! Formatting lives here so the engine stays free of presentation concerns.

pub mod format;

pub use format::*;
