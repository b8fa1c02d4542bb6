//! Domain types used throughout the pipeline.
//!
//! This module defines:
//!
//! - the historical observations (`PricePoint`, `PriceSeries`, `SeriesStats`)
//! - fit outputs (`SeasonalTrendModel`, `FitQuality`, `FitResult`)
//! - forecast report rows (`ForecastRow`)
//! - the run configuration (`RunConfig`)

pub mod types;

pub use types::*;
