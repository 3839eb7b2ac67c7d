//! `quote-engine` library crate.
//!
//! The binary (`quote`) is a thin wrapper around this library so that:
//!
//! - pricing logic is testable without spawning processes
//! - the engine can be embedded behind other front-ends (an HTTP service, a worker)
//!
//! Start at [`engine::Engine`]: `predict` for estimates, `record` for
//! completed jobs.

pub mod app;
pub mod cli;
pub mod domain;
pub mod engine;
pub mod error;
pub mod fit;
pub mod io;
pub mod logging;
pub mod math;
pub mod models;
pub mod rates;
pub mod report;
