//! Domain types used throughout the engine.
//!
//! This module defines:
//!
//! - categorical feature enums (`ExperienceLevel`, `Complexity`)
//! - inputs and labels (`JobFeatures`, `TrainingExample`)
//! - outputs (`PredictionResult`, `PriceRange`) and `EngineConfig`

pub mod types;

pub use types::*;
