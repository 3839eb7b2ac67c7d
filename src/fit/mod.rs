//! Learned-model fitting.
//!
//! Responsibilities:
//!
//! - encode categorical features (`encoder`)
//! - fit the configured regressor (`forest` in parallel, or `linear`)
//! - assemble the `LearnedModel` artifact (`trainer`)

pub mod encoder;
pub mod forest;
pub mod linear;
pub mod trainer;

pub use encoder::*;
pub use forest::*;
pub use linear::*;
pub use trainer::*;
