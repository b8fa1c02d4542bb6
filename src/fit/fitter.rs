//! Low-level fitting routine for the seasonal trend model.
//!
//! Given the observed series we solve a single ordinary least squares
//! problem:
//!
//! - rows: one per observation
//! - columns: intercept, elapsed days, eleven month indicators
//!
//! and unpack the coefficient vector into a [`SeasonalTrendModel`] together
//! with in-sample residual diagnostics.

use nalgebra::{DMatrix, DVector};

use crate::domain::{FitQuality, FitResult, PriceSeries, SeasonalTrendModel};
use crate::error::AppError;
use crate::math::solve_least_squares;
use crate::model::{N_COEFFS, TREND_COL, fill_design_row, predict};

/// Fit the seasonal trend model to the full history.
///
/// The design matrix has [`N_COEFFS`] columns, so fewer observations than
/// that would leave the system underdetermined; we reject such inputs before
/// touching the solver instead of returning a meaningless interpolant.
pub fn fit(series: &PriceSeries) -> Result<FitResult, AppError> {
    let n = series.len();
    if n < N_COEFFS {
        return Err(AppError::InsufficientData {
            observations: n,
            required: N_COEFFS,
        });
    }

    // The trend column counts days since the first observation, which keeps
    // its magnitude moderate and makes the intercept interpretable as the
    // January level at the start of the sample.
    let origin = series.first_date();

    let mut x = DMatrix::<f64>::zeros(n, N_COEFFS);
    let mut y = DVector::<f64>::zeros(n);
    let mut row = [0.0; N_COEFFS];

    for (i, point) in series.points().iter().enumerate() {
        fill_design_row(origin, point.date, &mut row);
        for (j, v) in row.iter().enumerate() {
            x[(i, j)] = *v;
        }
        y[i] = point.price;
    }

    let beta = solve_least_squares(&x, &y).ok_or_else(|| {
        AppError::Fit("Least-squares solve failed: design matrix is too ill-conditioned.".to_string())
    })?;

    let model = SeasonalTrendModel {
        origin,
        intercept: beta[0],
        trend_per_day: beta[TREND_COL],
        month_effects: std::array::from_fn(|k| beta[k + 2]),
    };

    // Residuals go through the same `predict` the forecast path uses, so the
    // diagnostics measure exactly what callers will see.
    let mut sse = 0.0;
    for point in series.points() {
        let r = point.price - predict(&model, point.date);
        sse += r * r;
    }
    if !sse.is_finite() {
        return Err(AppError::Fit("Fit produced non-finite residuals.".to_string()));
    }
    let rmse = (sse / n as f64).sqrt();

    Ok(FitResult {
        model,
        quality: FitQuality { sse, rmse, n },
    })
}
