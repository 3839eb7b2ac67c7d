//! Numerical utilities: least squares and price rounding.

pub mod ols;
pub mod rounding;

pub use ols::*;
pub use rounding::*;
