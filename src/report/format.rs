//! Formatted terminal output.
//!
//! We keep formatting code in one place so:
//! - the math/fitting code stays clean and testable
//! - output changes are localized (important for future snapshot tests)

use chrono::NaiveDate;

use crate::domain::{FitResult, ForecastRow, SeriesStats};

/// Format the run summary (series stats + fitted coefficients + diagnostics).
pub fn format_run_summary(stats: &SeriesStats, fit: &FitResult) -> String {
    let mut out = String::new();
    let model = &fit.model;

    out.push_str("=== gascast - Seasonal Natural Gas Price Forecast ===\n");
    out.push_str(&format!(
        "History: n={} | {} .. {}\n",
        stats.n_points, stats.first_date, stats.last_obs
    ));
    out.push_str(&format!(
        "Prices : [{:.2}, {:.2}]\n",
        stats.price_min, stats.price_max
    ));
    if stats.duplicates_dropped > 0 {
        out.push_str(&format!(
            "Note   : {} duplicate date(s) dropped, first occurrence kept\n",
            stats.duplicates_dropped
        ));
    }

    out.push_str("\nModel:\n");
    out.push_str(&format!("- intercept    : {:.6}\n", model.intercept));
    out.push_str(&format!(
        "- trend        : {:.6}/day ({:+.3}/year)\n",
        model.trend_per_day,
        model.trend_per_day * 365.0
    ));
    out.push_str(&format!(
        "- month effects: {} (Feb..Dec, relative to January)\n",
        fmt_vec(&model.month_effects)
    ));
    out.push_str(&format!(
        "- fit          : SSE={:.3} RMSE={:.3} (n={})\n",
        fit.quality.sse, fit.quality.rmse, fit.quality.n
    ));

    out
}

/// Format the month-end forecast table.
///
/// The layout is fixed: date left-aligned in 12 columns, two spaces, price
/// right-aligned in 10 with two decimals. Downstream scripts scrape this
/// output, so the header and rule must not drift.
pub fn format_forecast_table(last_obs: NaiveDate, rows: &[ForecastRow]) -> String {
    let mut out = String::new();

    out.push_str("Forecast: Natural-Gas Month-End Prices\n");
    out.push_str("=======================================\n");
    out.push_str(&format!("(based on data up to {last_obs})\n"));
    out.push('\n');

    out.push_str(&format!("{:<12}  {:>10}\n", "Date", "Price"));
    for row in rows {
        out.push_str(&format_price_line(row.date, row.price));
        out.push('\n');
    }

    out
}

/// One date/price line, aligned like the forecast table rows.
pub fn format_price_line(date: NaiveDate, price: f64) -> String {
    format!("{:<12}  {:>10.2}", date.to_string(), price)
}

fn fmt_vec(v: &[f64]) -> String {
    let parts: Vec<String> = v.iter().map(|x| format!("{x:.3}")).collect();
    format!("[{}]", parts.join(", "))
}
