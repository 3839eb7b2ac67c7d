//! Input/output helpers.
//!
//! - `store`: the persistence trait and an in-memory implementation
//! - `file`: JSON-file persistence for training data and the model artifact
//! - `batch`: reading example batches handed to `quote record`

pub mod batch;
pub mod file;
pub mod store;

pub use batch::*;
pub use file::*;
pub use store::*;
