//! Mathematical utilities: least squares and scalar statistics.

pub mod ols;
pub mod stats;

pub use ols::*;
pub use stats::*;
