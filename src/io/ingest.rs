//! CSV ingest and normalization.
//!
//! This module turns a two-column price sheet into a clean [`PriceSeries`]
//! that is safe to fit.
//!
//! Design goals:
//! - **Strict rows**: the first unparseable date or price aborts the load
//!   with its CSV line number (a silently truncated history would bias the
//!   trend estimate)
//! - **Tolerant headers**: column matching is case-insensitive and ignores a
//!   UTF-8 BOM
//! - **Deterministic behavior**: same file, same series

use std::collections::HashMap;
use std::fs::File;
use std::io::Read;

use chrono::NaiveDate;
use csv::StringRecord;

use crate::domain::{PricePoint, PriceSeries, RunConfig};
use crate::error::AppError;

/// Load the configured CSV into a normalized series.
pub fn load_series(config: &RunConfig) -> Result<PriceSeries, AppError> {
    let file = File::open(&config.csv_path).map_err(|e| {
        AppError::Input(format!(
            "Failed to open CSV '{}': {e}",
            config.csv_path.display()
        ))
    })?;
    read_series(file, &config.date_column, &config.price_column)
}

/// Parse a price sheet from any reader.
///
/// Split out from [`load_series`] so tests can feed in-memory CSVs without
/// touching the filesystem.
pub fn read_series<R: Read>(
    reader: R,
    date_column: &str,
    price_column: &str,
) -> Result<PriceSeries, AppError> {
    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let headers = reader
        .headers()
        .map_err(|e| AppError::Input(format!("Failed to read CSV headers: {e}")))?
        .clone();

    let header_map = build_header_map(&headers);
    let date_idx = column_index(&header_map, date_column)?;
    let price_idx = column_index(&header_map, price_column)?;

    let mut points = Vec::new();

    for (idx, result) in reader.records().enumerate() {
        // +2 because:
        // - records() starts at line 1 after headers
        // - CSV is 1-based line numbers
        let line = idx + 2;

        let record = result.map_err(|e| AppError::Parse {
            line,
            message: format!("CSV parse error: {e}"),
        })?;

        let raw_date = get_field(&record, date_idx, date_column, line)?;
        let raw_price = get_field(&record, price_idx, price_column, line)?;

        let date = parse_date(raw_date).ok_or_else(|| AppError::Parse {
            line,
            message: format!(
                "Invalid date '{raw_date}'. Expected one of: YYYY-MM-DD, YYYY/MM/DD, MM/DD/YY, MM/DD/YYYY."
            ),
        })?;
        let price = parse_price(raw_price).ok_or_else(|| AppError::Parse {
            line,
            message: format!("Invalid price '{raw_price}': expected a finite number."),
        })?;

        points.push(PricePoint { date, price });
    }

    if points.is_empty() {
        return Err(AppError::Input(
            "CSV contained a header but no data rows.".to_string(),
        ));
    }

    PriceSeries::from_points(points)
}

fn build_header_map(headers: &StringRecord) -> HashMap<String, usize> {
    headers
        .iter()
        .enumerate()
        .map(|(idx, name)| (normalize_header_name(name), idx))
        .collect()
}

fn normalize_header_name(name: &str) -> String {
    // Excel and other tools sometimes emit UTF-8 CSVs with a BOM prefix on the
    // first header (e.g. "﻿Dates"). If we don't strip it, schema validation
    // will incorrectly report a missing column.
    let name = name.trim().trim_start_matches('\u{feff}');
    name.to_ascii_lowercase()
}

fn column_index(header_map: &HashMap<String, usize>, name: &str) -> Result<usize, AppError> {
    header_map
        .get(&normalize_header_name(name))
        .copied()
        .ok_or_else(|| AppError::Input(format!("Missing required column: `{name}`")))
}

fn get_field<'a>(
    record: &'a StringRecord,
    idx: usize,
    name: &str,
    line: usize,
) -> Result<&'a str, AppError> {
    record
        .get(idx)
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .ok_or_else(|| AppError::Parse {
            line,
            message: format!("Missing required value: `{name}`"),
        })
}

/// Parse a date in one of the formats published price sheets use.
///
/// ISO dates are preferred, but the upstream export writes US-style dates
/// with two-digit years. Because chrono's `%Y` also accepts one- and
/// two-digit years, the try order is load-bearing twice over:
///
/// - `%m/%d/%y` before `%m/%d/%Y`, so `10/31/24` maps to 2024 instead of
///   the four-digit year 24
/// - `%Y/%m/%d` last, so `9/12/24` maps to US 2024-09-12 instead of year 9
///   with month 12; a real `YYYY/MM/DD` still reaches it because a
///   four-digit year can never satisfy `%m`
///
/// Query-date parsing goes through this same function, so any string that
/// loads from a CSV is also accepted on the command line.
pub fn parse_date(s: &str) -> Option<NaiveDate> {
    const FMTS: [&str; 4] = ["%Y-%m-%d", "%m/%d/%y", "%m/%d/%Y", "%Y/%m/%d"];
    for fmt in FMTS {
        if let Ok(d) = NaiveDate::parse_from_str(s, fmt) {
            return Some(d);
        }
    }
    None
}

fn parse_price(s: &str) -> Option<f64> {
    let v = s.parse::<f64>().ok()?;
    if v.is_finite() { Some(v) } else { None }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    #[test]
    fn reads_a_well_formed_sheet_in_date_order() {
        let csv = "\
Dates,Prices
10/31/20,10.1
12/31/20,11.5
11/30/20,10.3
";
        let series = read_series(csv.as_bytes(), "Dates", "Prices").unwrap();
        assert_eq!(series.len(), 3);
        assert_eq!(series.first_date(), d(2020, 10, 31));
        assert_eq!(series.last_obs(), d(2020, 12, 31));
        assert_eq!(series.prices(), vec![10.1, 10.3, 11.5]);
    }

    #[test]
    fn headers_match_case_insensitively_and_ignore_a_bom() {
        let csv = "\u{feff}dates,PRICES\n2024-01-31,12.5\n";
        let series = read_series(csv.as_bytes(), "Dates", "Prices").unwrap();
        assert_eq!(series.len(), 1);
        assert_eq!(series.price_on(d(2024, 1, 31)), Some(12.5));
    }

    #[test]
    fn column_names_are_configuration_and_gaps_pass_through() {
        // A different vendor's headers, plus a two-month hole in the
        // history: neither is an error.
        let csv = "\
day,close
2024-01-31,10.0
2024-04-30,11.0
";
        let series = read_series(csv.as_bytes(), "Day", "Close").unwrap();
        assert_eq!(series.len(), 2);
        assert_eq!(series.first_date(), d(2024, 1, 31));
        assert_eq!(series.last_obs(), d(2024, 4, 30));
    }

    #[test]
    fn missing_column_is_a_schema_error() {
        let csv = "Dates,Close\n2024-01-31,12.5\n";
        let err = read_series(csv.as_bytes(), "Dates", "Prices").unwrap_err();
        assert!(matches!(err, AppError::Input(_)));
        assert!(err.to_string().contains("Prices"));
        assert_eq!(err.exit_code(), 2);
    }

    #[test]
    fn first_bad_price_aborts_with_its_line_number() {
        let csv = "\
Dates,Prices
2024-01-31,12.5
2024-02-29,not-a-number
2024-03-31,13.0
";
        let err = read_series(csv.as_bytes(), "Dates", "Prices").unwrap_err();
        match err {
            AppError::Parse { line, ref message } => {
                assert_eq!(line, 3);
                assert!(message.contains("not-a-number"));
            }
            other => panic!("expected Parse, got {other:?}"),
        }
    }

    #[test]
    fn bad_date_aborts_with_its_line_number() {
        let csv = "Dates,Prices\n2024-13-01,12.5\n";
        let err = read_series(csv.as_bytes(), "Dates", "Prices").unwrap_err();
        match err {
            AppError::Parse { line, ref message } => {
                assert_eq!(line, 2);
                assert!(message.contains("2024-13-01"));
            }
            other => panic!("expected Parse, got {other:?}"),
        }
    }

    #[test]
    fn empty_cell_aborts_instead_of_skipping() {
        let csv = "Dates,Prices\n2024-01-31,\n";
        let err = read_series(csv.as_bytes(), "Dates", "Prices").unwrap_err();
        assert!(matches!(err, AppError::Parse { line: 2, .. }));
    }

    #[test]
    fn header_only_sheet_is_rejected() {
        let csv = "Dates,Prices\n";
        let err = read_series(csv.as_bytes(), "Dates", "Prices").unwrap_err();
        assert!(matches!(err, AppError::Input(_)));
    }

    #[test]
    fn duplicate_dates_are_collapsed_and_counted() {
        let csv = "\
Dates,Prices
2024-01-31,10.0
2024-01-31,99.0
2024-02-29,11.0
";
        let series = read_series(csv.as_bytes(), "Dates", "Prices").unwrap();
        assert_eq!(series.len(), 2);
        assert_eq!(series.price_on(d(2024, 1, 31)), Some(10.0));
        assert_eq!(series.stats().duplicates_dropped, 1);
    }

    #[test]
    fn date_formats_cover_iso_and_us_styles() {
        assert_eq!(parse_date("2020-10-31"), Some(d(2020, 10, 31)));
        assert_eq!(parse_date("2020/10/31"), Some(d(2020, 10, 31)));
        assert_eq!(parse_date("10/31/20"), Some(d(2020, 10, 31)));
        assert_eq!(parse_date("10/31/2020"), Some(d(2020, 10, 31)));
        assert_eq!(parse_date("31/10/2020"), None);
        assert_eq!(parse_date("yesterday"), None);
    }

    #[test]
    fn two_digit_years_never_parse_as_ancient_dates() {
        // `%Y` happily reads one- and two-digit years, so a wrong try
        // order would hand US-style strings to `%Y/%m/%d` or `%m/%d/%Y`.
        // Days at or below 12 are the treacherous cases: the day slot also
        // looks like a plausible month.
        assert_eq!(parse_date("9/30/24"), Some(d(2024, 9, 30)));
        assert_eq!(parse_date("9/12/24"), Some(d(2024, 9, 12)));
        assert_eq!(parse_date("12/1/24"), Some(d(2024, 12, 1)));
    }

    #[test]
    fn low_day_us_dates_load_in_the_right_century() {
        let csv = "\
Dates,Prices
5/6/21,10.0
5/31/21,11.0
";
        let series = read_series(csv.as_bytes(), "Dates", "Prices").unwrap();
        assert_eq!(series.first_date(), d(2021, 5, 6));
        assert_eq!(series.last_obs(), d(2021, 5, 31));
    }
}
