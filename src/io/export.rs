//! Export the month-end schedule to CSV.
//!
//! The export is meant to be easy to consume in spreadsheets or downstream
//! scripts, so dates are written in ISO form and prices at full precision.

use std::fs::File;
use std::io::Write;
use std::path::Path;

use crate::domain::ForecastRow;
use crate::error::AppError;

/// Write the schedule to a CSV file at `path`.
pub fn write_forecast_csv(path: &Path, rows: &[ForecastRow]) -> Result<(), AppError> {
    let file = File::create(path).map_err(|e| {
        AppError::Input(format!(
            "Failed to create export CSV '{}': {e}",
            path.display()
        ))
    })?;
    write_forecast_rows(file, rows)
}

/// Serialize rows to any writer; header comes from the row field names.
pub fn write_forecast_rows<W: Write>(writer: W, rows: &[ForecastRow]) -> Result<(), AppError> {
    let mut writer = csv::Writer::from_writer(writer);
    for row in rows {
        writer
            .serialize(row)
            .map_err(|e| AppError::Input(format!("Failed to write export CSV row: {e}")))?;
    }
    writer
        .flush()
        .map_err(|e| AppError::Input(format!("Failed to flush export CSV: {e}")))?;
    Ok(())
}
