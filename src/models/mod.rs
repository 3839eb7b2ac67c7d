//! Estimators and the confidence model.
//!
//! Estimators are kept as small, pure pieces so the engine's fallback policy
//! stays a plain `match`:
//! - `rules`: rate table × multipliers × hours
//! - `learned`: fitted regressor artifact (optional)
//! - `confidence`: score by path and data volume

pub mod confidence;
pub mod learned;
pub mod rules;

pub use confidence::*;
pub use learned::*;
pub use rules::*;
