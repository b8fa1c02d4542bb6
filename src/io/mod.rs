//! Input/output helpers.
//!
//! - CSV ingest + validation (`ingest`)
//! - month-end schedule export (`export`)

pub mod export;
pub mod ingest;

pub use export::*;
pub use ingest::*;
