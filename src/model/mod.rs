//! Seasonal linear trend model: feature encoding and evaluation.
//!
//! Small, pure functions so the fitting and forecasting code can stay
//! generic over "how a date becomes numbers".

pub mod features;

pub use features::*;
