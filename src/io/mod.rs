//! Input/output helpers.
//!
//! - CSV ingest + validation for the five sources (`ingest`)
//! - combined-table / fit-result exports (CSV/JSON) (`export`)

pub mod export;
pub mod ingest;

pub use export::*;
pub use ingest::*;
