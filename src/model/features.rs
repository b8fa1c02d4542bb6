//! Feature construction for the seasonal linear trend model.
//!
//! The fitter and the forecaster rely on two primitive operations:
//!
//! - build a design row for a given date (for OLS)
//! - predict `price(date)` given fitted coefficients (for queries/reports)
//!
//! Both go through `fill_design_row`. Keeping one encoder is the load-bearing
//! invariant of the whole model: if fit-time and query-time features ever
//! diverge, predictions are silently wrong.

use chrono::{Datelike, NaiveDate};

use crate::domain::SeasonalTrendModel;

/// Number of model coefficients: intercept, day trend, 11 month indicators.
pub const N_COEFFS: usize = 13;

/// Column index of the elapsed-day trend term.
pub const TREND_COL: usize = 1;

/// Whole days elapsed since `origin`.
///
/// Day-level precision matters here: month-end snapshots are not evenly
/// spaced, and truncating to calendar months would bend the trend axis.
pub fn elapsed_days(origin: NaiveDate, date: NaiveDate) -> i64 {
    (date - origin).num_days()
}

/// Fill a design row for the given date.
///
/// Layout: `[1, t, feb, mar, .., dec]`. The indicator column index equals
/// the month number, so January (the reference month) leaves slots 2..=12
/// all zero and its level lives in the intercept.
///
/// # Panics
/// Panics if `out` has fewer than [`N_COEFFS`] slots.
pub fn fill_design_row(origin: NaiveDate, date: NaiveDate, out: &mut [f64]) {
    out[0] = 1.0;
    out[TREND_COL] = elapsed_days(origin, date) as f64;

    let month = date.month() as usize;
    for m in 2..=12 {
        out[m] = if month == m { 1.0 } else { 0.0 };
    }
}

/// Predict the price for `date` under the fitted model.
///
/// Pure linear evaluation, no validation: window enforcement is the
/// forecaster's job.
pub fn predict(model: &SeasonalTrendModel, date: NaiveDate) -> f64 {
    let mut row = [0.0; N_COEFFS];
    fill_design_row(model.origin, date, &mut row);

    let mut y = model.intercept * row[0] + model.trend_per_day * row[TREND_COL];
    for (k, effect) in model.month_effects.iter().enumerate() {
        y += effect * row[k + 2];
    }
    y
}
