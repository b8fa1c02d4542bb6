//! Synthetic demo series generation.
//!
//! The demo mode exists so the tool can be exercised end to end without a
//! price sheet on disk: a seeded trend plus a winter-peaking seasonal cycle
//! plus Gaussian noise, sampled at month ends.

use chrono::{Datelike, NaiveDate};
use rand::prelude::*;
use rand::rngs::StdRng;
use rand_distr::Normal;

use crate::domain::{PricePoint, PriceSeries};
use crate::error::AppError;

/// Shape of the generated series.
#[derive(Debug, Clone)]
pub struct SampleConfig {
    /// Month of this date contributes the first month-end observation.
    pub start: NaiveDate,
    pub months: usize,
    pub seed: u64,
    pub base_price: f64,
    pub trend_per_month: f64,
    /// Peak-to-midline height of the seasonal cycle; peaks in January.
    pub seasonal_amplitude: f64,
    pub noise_sigma: f64,
}

impl Default for SampleConfig {
    fn default() -> Self {
        Self {
            start: NaiveDate::from_ymd_opt(2020, 10, 31).unwrap_or(NaiveDate::MIN),
            months: 48,
            seed: 42,
            base_price: 10.0,
            trend_per_month: 0.05,
            seasonal_amplitude: 1.5,
            noise_sigma: 0.25,
        }
    }
}

/// Demo series with the default shape.
pub fn demo_series(months: usize, seed: u64) -> Result<PriceSeries, AppError> {
    generate_series(&SampleConfig {
        months,
        seed,
        ..SampleConfig::default()
    })
}

/// Generate a month-end series from the config.
pub fn generate_series(config: &SampleConfig) -> Result<PriceSeries, AppError> {
    if config.months == 0 {
        return Err(AppError::Input("Demo months must be > 0.".to_string()));
    }
    if !(config.base_price.is_finite()
        && config.trend_per_month.is_finite()
        && config.seasonal_amplitude.is_finite())
    {
        return Err(AppError::Input(
            "Demo price parameters must be finite.".to_string(),
        ));
    }
    if !(config.noise_sigma.is_finite() && config.noise_sigma >= 0.0) {
        return Err(AppError::Input(
            "Demo noise sigma must be finite and >= 0.".to_string(),
        ));
    }

    let mut rng = StdRng::seed_from_u64(config.seed);
    let normal = Normal::new(0.0, config.noise_sigma)
        .map_err(|e| AppError::Input(format!("Noise distribution error: {e}")))?;

    let mut year = config.start.year();
    let mut month = config.start.month();
    let mut points = Vec::with_capacity(config.months);

    for i in 0..config.months {
        let Some(date) = end_of_month(year, month) else {
            return Err(AppError::Input(
                "Demo range exceeds the supported calendar.".to_string(),
            ));
        };

        let phase = (month as f64 - 1.0) / 12.0;
        let seasonal = config.seasonal_amplitude * (std::f64::consts::TAU * phase).cos();
        let price = config.base_price
            + config.trend_per_month * i as f64
            + seasonal
            + normal.sample(&mut rng);

        points.push(PricePoint {
            date,
            // Keep demo prices positive even under extreme noise draws.
            price: price.max(0.01),
        });

        if month == 12 {
            year += 1;
            month = 1;
        } else {
            month += 1;
        }
    }

    PriceSeries::from_points(points)
}

fn end_of_month(year: i32, month: u32) -> Option<NaiveDate> {
    let (next_year, next_month) = if month == 12 { (year + 1, 1) } else { (year, month + 1) };
    NaiveDate::from_ymd_opt(next_year, next_month, 1)?.pred_opt()
}
