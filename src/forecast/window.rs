//! The supported forecast window.
//!
//! Extrapolation is only trusted for one year past the end of the sample.
//! The window is half-open at the bottom: the last observed date itself is
//! history, not forecast, so queries must be strictly after it.

use chrono::{Datelike, Duration, NaiveDate};

use crate::error::AppError;

/// How far past the last observation the model may be queried, in days.
pub const FORECAST_HORIZON_DAYS: i64 = 365;

/// The half-open date range `(last_obs, last_obs + 365d]` that queries are
/// accepted for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ForecastWindow {
    last_obs: NaiveDate,
    one_year: NaiveDate,
}

impl ForecastWindow {
    /// Window covering the year after `last_obs`.
    ///
    /// Fails when `last_obs` lies within a year of the supported calendar's
    /// edge, where the upper bound does not exist. Such dates parse (`%Y`
    /// takes up to six digits), so this is an input error, not a panic.
    pub fn after(last_obs: NaiveDate) -> Result<Self, AppError> {
        let one_year = last_obs
            .checked_add_signed(Duration::days(FORECAST_HORIZON_DAYS))
            .ok_or_else(|| {
                AppError::Input(format!(
                    "Cannot forecast a year past {last_obs}: outside the supported calendar range."
                ))
            })?;
        Ok(Self { last_obs, one_year })
    }

    pub fn last_obs(&self) -> NaiveDate {
        self.last_obs
    }

    /// Latest date a query is accepted for (inclusive).
    pub fn one_year(&self) -> NaiveDate {
        self.one_year
    }

    /// Reject dates outside the window, distinguishing the two directions so
    /// callers can tell the user which boundary they crossed.
    pub fn check(&self, date: NaiveDate) -> Result<(), AppError> {
        if date <= self.last_obs {
            return Err(AppError::TooEarly {
                query: date,
                last_obs: self.last_obs,
            });
        }
        if date > self.one_year {
            return Err(AppError::TooLate {
                query: date,
                one_year: self.one_year,
            });
        }
        Ok(())
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.check(date).is_ok()
    }
}

/// Last calendar day of the given month, or `None` past the calendar edge.
fn end_of_month(year: i32, month: u32) -> Option<NaiveDate> {
    let (next_year, next_month) = if month == 12 { (year + 1, 1) } else { (year, month + 1) };
    NaiveDate::from_ymd_opt(next_year, next_month, 1)?.pred_opt()
}

/// All month-end dates `d` with `first <= d <= last`, ascending.
pub fn month_ends_between(first: NaiveDate, last: NaiveDate) -> Vec<NaiveDate> {
    let mut out = Vec::new();
    let mut year = first.year();
    let mut month = first.month();
    loop {
        let Some(end) = end_of_month(year, month) else {
            break;
        };
        if end > last {
            break;
        }
        if end >= first {
            out.push(end);
        }
        if month == 12 {
            year += 1;
            month = 1;
        } else {
            month += 1;
        }
    }
    out
}
