//! Data sources other than a user-supplied CSV.

pub mod sample;

pub use sample::*;
