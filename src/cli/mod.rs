//! Command-line parsing for the seasonal price forecaster.
//!
//! The goal of this module is to keep **argument parsing** and **command
//! dispatch** separate from the modeling/math code.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Top-level CLI.
#[derive(Debug, Parser)]
#[command(
    name = "gascast",
    version,
    about = "Seasonal month-end price forecaster for natural gas"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

/// CLI subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Fit the model and print the month-end forecast for the year ahead.
    Forecast(ForecastArgs),
    /// Fit the model and price specific dates inside the forecast window.
    Query(QueryArgs),
}

/// Where the historical series comes from.
#[derive(Debug, Parser, Clone)]
pub struct SourceArgs {
    /// Path to the historical price CSV.
    #[arg(long, default_value = "Nat_Gas.csv")]
    pub csv: PathBuf,

    /// Header of the date column.
    #[arg(long, default_value = "Dates")]
    pub date_column: String,

    /// Header of the price column.
    #[arg(long, default_value = "Prices")]
    pub price_column: String,

    /// Generate a seeded synthetic series instead of reading the CSV.
    #[arg(long)]
    pub demo: bool,

    /// Months of synthetic history in demo mode.
    #[arg(long, default_value_t = 48)]
    pub demo_months: usize,

    /// Random seed for demo mode.
    #[arg(long, default_value_t = 42)]
    pub seed: u64,
}

/// Options for the forecast report.
#[derive(Debug, Parser)]
pub struct ForecastArgs {
    #[command(flatten)]
    pub source: SourceArgs,

    /// Render an ASCII plot in the terminal (enabled by default).
    #[arg(long, default_value_t = true)]
    pub plot: bool,

    /// Disable the terminal plot.
    #[arg(long)]
    pub no_plot: bool,

    /// Plot width (columns).
    #[arg(long, default_value_t = 100)]
    pub width: usize,

    /// Plot height (rows).
    #[arg(long, default_value_t = 25)]
    pub height: usize,

    /// Export the month-end schedule to CSV.
    #[arg(long)]
    pub export: Option<PathBuf>,
}

/// Options for pricing individual dates.
#[derive(Debug, Parser)]
pub struct QueryArgs {
    #[command(flatten)]
    pub source: SourceArgs,

    /// Dates to price (YYYY-MM-DD or common US formats).
    #[arg(value_name = "DATE", required = true)]
    pub dates: Vec<String>,
}
