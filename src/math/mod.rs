//! Mathematical utilities: the least-squares solver behind the fit.

pub mod ols;

pub use ols::*;
