//! Regression fitting over the combined table.
//!
//! Responsibilities:
//!
//! - build the design matrix for a `{target, features}` variant
//! - fit by OLS and compute the summary diagnostics
//! - multicollinearity (VIF) and elasticity estimation

pub mod elasticity;
pub mod model;
pub mod vif;

pub use elasticity::*;
pub use model::*;
pub use vif::*;
