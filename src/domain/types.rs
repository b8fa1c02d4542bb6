//! Shared domain types.
//!
//! These types are intentionally kept lightweight and serializable so they can be:
//!
//! - used in-memory during fitting
//! - exported to CSV
//! - reused by future front-ends without dragging in pipeline code

use std::path::PathBuf;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::AppError;

/// A single dated price observation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PricePoint {
    pub date: NaiveDate,
    pub price: f64,
}

/// The historical price series: unique dates, ascending order.
///
/// Constructed once at load time and read-only afterwards. The constructor
/// owns the two normalization steps the rest of the pipeline relies on:
///
/// - stable sort ascending by date
/// - duplicate dates collapse to their FIRST occurrence (deterministic
///   tie-break; the dropped count is kept for reporting)
#[derive(Debug, Clone)]
pub struct PriceSeries {
    points: Vec<PricePoint>,
    duplicates_dropped: usize,
}

impl PriceSeries {
    /// Normalize raw points into a series.
    ///
    /// Fails on an empty input: every accessor below assumes at least one
    /// observation.
    pub fn from_points(mut points: Vec<PricePoint>) -> Result<Self, AppError> {
        if points.is_empty() {
            return Err(AppError::Input(
                "Price series requires at least one observation.".to_string(),
            ));
        }

        points.sort_by_key(|p| p.date);
        let before = points.len();
        // dedup_by keeps the first element of each run of equal dates.
        points.dedup_by(|a, b| a.date == b.date);
        let duplicates_dropped = before - points.len();

        Ok(Self {
            points,
            duplicates_dropped,
        })
    }

    /// First observed date; the zero point of the trend axis.
    pub fn first_date(&self) -> NaiveDate {
        self.points[0].date
    }

    /// Last observed date; the lower (exclusive) bound of the forecast window.
    pub fn last_obs(&self) -> NaiveDate {
        self.points[self.points.len() - 1].date
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Observations in date order.
    pub fn points(&self) -> &[PricePoint] {
        &self.points
    }

    /// Observed prices in date order (the fit target vector).
    pub fn prices(&self) -> Vec<f64> {
        self.points.iter().map(|p| p.price).collect()
    }

    /// Price on an exact historical date, if observed.
    pub fn price_on(&self, date: NaiveDate) -> Option<f64> {
        self.points
            .binary_search_by_key(&date, |p| p.date)
            .ok()
            .map(|idx| self.points[idx].price)
    }

    /// Summary stats used by the run report.
    pub fn stats(&self) -> SeriesStats {
        let mut price_min = f64::INFINITY;
        let mut price_max = f64::NEG_INFINITY;
        for p in &self.points {
            price_min = price_min.min(p.price);
            price_max = price_max.max(p.price);
        }

        SeriesStats {
            n_points: self.points.len(),
            first_date: self.first_date(),
            last_obs: self.last_obs(),
            price_min,
            price_max,
            duplicates_dropped: self.duplicates_dropped,
        }
    }
}

/// Summary stats about the loaded series.
#[derive(Debug, Clone)]
pub struct SeriesStats {
    pub n_points: usize,
    pub first_date: NaiveDate,
    pub last_obs: NaiveDate,
    pub price_min: f64,
    pub price_max: f64,
    pub duplicates_dropped: usize,
}

/// Fitted coefficients of the seasonal linear trend model.
///
/// The model is linear in 13 coefficients:
///
/// `price(date) = intercept + trend_per_day * t + month_effect(date.month)`
///
/// where `t` counts whole days since `origin` (the first observed date) and
/// January is the reference month absorbed into the intercept, so
/// `month_effects[k]` is the level shift of month `k + 2` relative to
/// January.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SeasonalTrendModel {
    /// First observed date; `t = 0` here.
    pub origin: NaiveDate,
    pub intercept: f64,
    pub trend_per_day: f64,
    /// Level shifts for February..=December, relative to January.
    pub month_effects: [f64; 11],
}

/// Fit quality diagnostics.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FitQuality {
    pub sse: f64,
    pub rmse: f64,
    pub n: usize,
}

/// Fit output: the model plus its in-sample diagnostics.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FitResult {
    pub model: SeasonalTrendModel,
    pub quality: FitQuality,
}

/// One line of the batch forecast report.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ForecastRow {
    pub date: NaiveDate,
    pub price: f64,
}

/// A full run's configuration as understood by the pipeline.
///
/// This is derived from CLI flags (plus defaults). There is no global
/// state: every stage receives what it needs explicitly.
#[derive(Debug, Clone)]
pub struct RunConfig {
    pub csv_path: PathBuf,
    /// Header of the date column (column names are configuration, not contract).
    pub date_column: String,
    /// Header of the price column.
    pub price_column: String,

    /// Generate a synthetic demo series instead of reading the CSV.
    pub demo: bool,
    pub demo_months: usize,
    pub sample_seed: u64,

    pub plot: bool,
    pub plot_width: usize,
    pub plot_height: usize,

    pub export: Option<PathBuf>,
}
