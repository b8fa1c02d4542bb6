//! Point queries and the month-end schedule.

use chrono::NaiveDate;

use crate::domain::{ForecastRow, SeasonalTrendModel};
use crate::error::AppError;
use crate::forecast::{ForecastWindow, month_ends_between};
use crate::io::parse_date;
use crate::model::predict;

/// A fitted model bound to the window it may be queried over.
#[derive(Debug, Clone)]
pub struct Forecaster {
    model: SeasonalTrendModel,
    window: ForecastWindow,
}

impl Forecaster {
    pub fn new(model: SeasonalTrendModel, last_obs: NaiveDate) -> Result<Self, AppError> {
        Ok(Self {
            model,
            window: ForecastWindow::after(last_obs)?,
        })
    }

    pub fn window(&self) -> ForecastWindow {
        self.window
    }

    /// Estimated price for a date inside the forecast window.
    pub fn price_on(&self, date: NaiveDate) -> Result<f64, AppError> {
        self.window.check(date)?;
        Ok(predict(&self.model, date))
    }

    /// Parse `raw` with the same date formats the loader accepts, then query.
    pub fn price_for(&self, raw: &str) -> Result<(NaiveDate, f64), AppError> {
        let date = parse_date(raw).ok_or_else(|| AppError::InvalidDate {
            input: raw.to_string(),
        })?;
        let price = self.price_on(date)?;
        Ok((date, price))
    }

    /// Month-end estimates for the year ahead, oldest first.
    ///
    /// Every enumerated date is inside the window by construction, so this
    /// evaluates the model directly instead of re-checking each date.
    pub fn month_end_schedule(&self) -> Vec<ForecastRow> {
        let Some(start) = self.window.last_obs().succ_opt() else {
            return Vec::new();
        };
        month_ends_between(start, self.window.one_year())
            .into_iter()
            .map(|date| ForecastRow {
                date,
                price: predict(&self.model, date),
            })
            .collect()
    }
}
