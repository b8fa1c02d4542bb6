//! Model estimation.
//!
//! Responsibilities:
//!
//! - assemble the design matrix for the seasonal trend model
//! - solve the least-squares problem
//! - compute in-sample residual diagnostics

pub mod fitter;

pub use fitter::*;
