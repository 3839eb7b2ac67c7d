//! The pricing engine.
//!
//! - `orchestrator`: `Engine`, the single entry point for predictions and training updates
//! - `updater`: full-recompute rate table refresh from the training set

pub mod orchestrator;
pub mod updater;

pub use orchestrator::*;
pub use updater::*;
