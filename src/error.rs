//! Application error type.
//!
//! One enum covers every failure the pipeline can produce, each variant
//! mapping to a stable process exit code:
//!
//! - 2: input problems (file, schema, unparseable fields)
//! - 3: not enough observations to fit
//! - 4: numerical failure in the solver
//! - 5: query-side errors (bad date string, outside the forecast window)
//!
//! `TooEarly` and `TooLate` are separate variants on purpose: callers need
//! to tell "pick a later date" apart from "pick an earlier one", and each
//! carries the boundary date that was violated.

use chrono::NaiveDate;

#[derive(Debug, Clone)]
pub enum AppError {
    /// Input file, CSV schema, or configuration problem.
    Input(String),
    /// A date or price field in the input could not be interpreted.
    ///
    /// `line` is the 1-based CSV line number (header = line 1). Any bad
    /// field aborts the whole load; a partial series is never fitted.
    Parse { line: usize, message: String },
    /// Fewer historical observations than model coefficients.
    InsufficientData { observations: usize, required: usize },
    /// The least-squares solve failed or produced non-finite coefficients.
    Fit(String),
    /// A query date string could not be parsed.
    InvalidDate { input: String },
    /// Query date is on or before the last observed date.
    TooEarly { query: NaiveDate, last_obs: NaiveDate },
    /// Query date is beyond the one-year extrapolation cap.
    TooLate { query: NaiveDate, one_year: NaiveDate },
}

impl AppError {
    pub fn exit_code(&self) -> u8 {
        match self {
            AppError::Input(_) | AppError::Parse { .. } => 2,
            AppError::InsufficientData { .. } => 3,
            AppError::Fit(_) => 4,
            AppError::InvalidDate { .. } | AppError::TooEarly { .. } | AppError::TooLate { .. } => 5,
        }
    }
}

impl std::fmt::Display for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AppError::Input(message) => write!(f, "{message}"),
            AppError::Parse { line, message } => {
                write!(f, "Line {line}: {message}")
            }
            AppError::InsufficientData {
                observations,
                required,
            } => write!(
                f,
                "Need at least {required} observations to fit the seasonal trend model, got {observations}."
            ),
            AppError::Fit(message) => write!(f, "{message}"),
            AppError::InvalidDate { input } => {
                write!(
                    f,
                    "Invalid query date '{input}'. Expected one of: YYYY-MM-DD, YYYY/MM/DD, MM/DD/YY, MM/DD/YYYY."
                )
            }
            AppError::TooEarly { query, last_obs } => write!(
                f,
                "Date {query} is not in the forecast window: choose a date strictly after the last observed date ({last_obs})."
            ),
            AppError::TooLate { query, one_year } => write!(
                f,
                "Date {query} exceeds the one-year extrapolation cap: latest allowed date is {one_year}."
            ),
        }
    }
}

impl std::error::Error for AppError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bound_errors_name_the_boundary() {
        let last_obs = NaiveDate::from_ymd_opt(2024, 9, 30).unwrap();
        let one_year = NaiveDate::from_ymd_opt(2025, 9, 30).unwrap();

        let early = AppError::TooEarly {
            query: last_obs,
            last_obs,
        };
        let late = AppError::TooLate {
            query: NaiveDate::from_ymd_opt(2025, 10, 1).unwrap(),
            one_year,
        };

        assert!(early.to_string().contains("2024-09-30"));
        assert!(early.to_string().contains("after"));
        assert!(late.to_string().contains("2025-09-30"));
        assert!(late.to_string().contains("cap"));
        assert_eq!(early.exit_code(), 5);
        assert_eq!(late.exit_code(), 5);
    }

    #[test]
    fn exit_codes_follow_error_class() {
        assert_eq!(AppError::Input("x".to_string()).exit_code(), 2);
        assert_eq!(
            AppError::Parse {
                line: 3,
                message: "bad".to_string()
            }
            .exit_code(),
            2
        );
        assert_eq!(
            AppError::InsufficientData {
                observations: 5,
                required: 13
            }
            .exit_code(),
            3
        );
        assert_eq!(AppError::Fit("x".to_string()).exit_code(), 4);
        assert_eq!(
            AppError::InvalidDate {
                input: "nope".to_string()
            }
            .exit_code(),
            5
        );
    }
}
