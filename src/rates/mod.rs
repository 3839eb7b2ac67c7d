//! Static pricing tables: base rates, location/complexity multipliers, and the
//! catalog of known industries and locations.

pub mod catalog;
pub mod multipliers;
pub mod table;

pub use catalog::*;
pub use multipliers::*;
pub use table::*;
