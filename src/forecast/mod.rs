//! Forward price estimation.
//!
//! Responsibilities:
//!
//! - define the supported extrapolation window after the last observation
//! - answer point queries for arbitrary in-window dates
//! - enumerate the month-end schedule for the year ahead

pub mod forecaster;
pub mod window;

pub use forecaster::*;
pub use window::*;
