//! Shared pipeline logic used by both CLI subcommands.
//!
//! Keeping this in one place avoids duplicating the core workflow:
//! load (or generate) -> fit -> bind the forecast window -> month-end schedule
//!
//! The subcommands then focus on presentation (forecast table vs per-date
//! query lines).

use crate::data::demo_series;
use crate::domain::{FitResult, ForecastRow, PriceSeries, RunConfig};
use crate::error::AppError;
use crate::forecast::Forecaster;

/// All computed outputs of a single run.
#[derive(Debug, Clone)]
pub struct RunOutput {
    pub series: PriceSeries,
    pub fit: FitResult,
    pub forecaster: Forecaster,
    pub schedule: Vec<ForecastRow>,
}

/// Execute the full pipeline and return the computed outputs.
pub fn run_forecast(config: &RunConfig) -> Result<RunOutput, AppError> {
    // 1) Load the historical series.
    let series = if config.demo {
        demo_series(config.demo_months, config.sample_seed)?
    } else {
        crate::io::load_series(config)?
    };

    // 2) Fit the seasonal trend model.
    let fit = crate::fit::fit(&series)?;

    // 3) Bind the model to the window it may be queried over.
    let forecaster = Forecaster::new(fit.model.clone(), series.last_obs())?;

    // 4) Enumerate the month-end schedule for the year ahead.
    let schedule = forecaster.month_end_schedule();

    Ok(RunOutput {
        series,
        fit,
        forecaster,
        schedule,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use std::path::PathBuf;

    fn demo_config(months: usize) -> RunConfig {
        RunConfig {
            csv_path: PathBuf::from("unused.csv"),
            date_column: "Dates".to_string(),
            price_column: "Prices".to_string(),
            demo: true,
            demo_months: months,
            sample_seed: 42,
            plot: false,
            plot_width: 100,
            plot_height: 25,
            export: None,
        }
    }

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    #[test]
    fn demo_run_schedules_a_full_year_of_month_ends() {
        let run = run_forecast(&demo_config(48)).unwrap();

        assert_eq!(run.series.last_obs(), d(2024, 9, 30));
        assert_eq!(run.schedule.len(), 12);
        assert_eq!(run.schedule[0].date, d(2024, 10, 31));
        assert_eq!(run.schedule[11].date, d(2025, 9, 30));
        assert!(run.schedule.iter().all(|r| r.price.is_finite()));
    }

    #[test]
    fn demo_run_recovers_the_upward_trend() {
        let run = run_forecast(&demo_config(48)).unwrap();
        assert!(run.fit.model.trend_per_day > 0.0);
        // Monthly drift of 0.05 is roughly 0.0016 per day.
        assert!(run.fit.model.trend_per_day < 0.01);
    }

    #[test]
    fn scheduled_prices_agree_with_point_queries() {
        let run = run_forecast(&demo_config(48)).unwrap();
        for row in &run.schedule {
            let queried = run.forecaster.price_on(row.date).unwrap();
            assert!((queried - row.price).abs() < 1e-12);
        }
    }

    #[test]
    fn short_demo_history_fails_with_the_data_error() {
        let err = run_forecast(&demo_config(12)).unwrap_err();
        assert_eq!(err.exit_code(), 3);
    }
}
