//! Domain types used throughout the pipeline.
//!
//! This module defines:
//!
//! - the fixed year-length constant and combined-table column names
//! - input configuration (`PrepareConfig`)
//! - regression variants (`ModelPreset`, `RegressionSpec`)
//! - the columnar [`Table`] the pipeline produces

pub mod table;
pub mod types;

pub use table::*;
pub use types::*;
