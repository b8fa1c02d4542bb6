//! Top-level application orchestration.
//!
//! `src/main.rs` is intentionally tiny; this module is the "real main" that:
//! - parses CLI arguments
//! - loads (or generates) the price history
//! - fits the seasonal trend model
//! - prints the forecast report/plot or per-date query lines
//! - writes optional exports

use clap::Parser;

use crate::cli::{Command, ForecastArgs, QueryArgs, SourceArgs};
use crate::domain::RunConfig;
use crate::error::AppError;

pub mod pipeline;

/// Entry point for the `gascast` binary.
pub fn run() -> Result<(), AppError> {
    // We want `gascast` and `gascast --demo` to behave like
    // `gascast forecast ...`.
    //
    // Clap requires a subcommand name, so we do a small, explicit rewrite of
    // the argv list before parsing. This preserves a clean clap structure
    // while retaining the short invocation.
    let argv = rewrite_args(std::env::args().collect());
    let cli = crate::cli::Cli::parse_from(argv);

    match cli.command {
        Command::Forecast(args) => handle_forecast(args),
        Command::Query(args) => handle_query(args),
    }
}

fn handle_forecast(args: ForecastArgs) -> Result<(), AppError> {
    let config = run_config_from_args(&args);
    let run = pipeline::run_forecast(&config)?;

    print!(
        "{}",
        crate::report::format_run_summary(&run.series.stats(), &run.fit)
    );
    println!();
    print!(
        "{}",
        crate::report::format_forecast_table(run.series.last_obs(), &run.schedule)
    );

    if config.plot {
        let plot = crate::plot::render_ascii_plot(
            &run.series,
            &run.fit,
            &run.schedule,
            config.plot_width,
            config.plot_height,
        );
        println!();
        print!("{plot}");
    }

    if let Some(path) = &config.export {
        crate::io::write_forecast_csv(path, &run.schedule)?;
    }

    Ok(())
}

/// Price each requested date, stopping at the first one that is rejected.
fn handle_query(args: QueryArgs) -> Result<(), AppError> {
    let config = source_config(&args.source);
    let run = pipeline::run_forecast(&config)?;

    for raw in &args.dates {
        let (date, price) = run.forecaster.price_for(raw)?;
        println!("{}", crate::report::format_price_line(date, price));
    }

    Ok(())
}

pub fn run_config_from_args(args: &ForecastArgs) -> RunConfig {
    RunConfig {
        csv_path: args.source.csv.clone(),
        date_column: args.source.date_column.clone(),
        price_column: args.source.price_column.clone(),
        demo: args.source.demo,
        demo_months: args.source.demo_months,
        sample_seed: args.source.seed,
        plot: args.plot && !args.no_plot,
        plot_width: args.width,
        plot_height: args.height,
        export: args.export.clone(),
    }
}

fn source_config(source: &SourceArgs) -> RunConfig {
    RunConfig {
        csv_path: source.csv.clone(),
        date_column: source.date_column.clone(),
        price_column: source.price_column.clone(),
        demo: source.demo,
        demo_months: source.demo_months,
        sample_seed: source.seed,
        plot: false,
        plot_width: 100,
        plot_height: 25,
        export: None,
    }
}

/// Rewrite argv so `gascast` defaults to `gascast forecast`.
///
/// Rules:
/// - `gascast`                     -> `gascast forecast`
/// - `gascast --demo ...`          -> `gascast forecast --demo ...`
/// - `gascast --help/--version/-h` -> unchanged (show top-level help/version)
fn rewrite_args(mut argv: Vec<String>) -> Vec<String> {
    let Some(arg1) = argv.get(1).cloned() else {
        argv.push("forecast".to_string());
        return argv;
    };

    let is_top_level_help_or_version =
        matches!(arg1.as_str(), "-h" | "--help" | "-V" | "--version" | "help");
    if is_top_level_help_or_version {
        return argv;
    }

    let is_subcommand = matches!(arg1.as_str(), "forecast" | "query");
    if is_subcommand {
        return argv;
    }

    // If the first token is a flag, treat it as "forecast flags".
    if arg1.starts_with('-') {
        argv.insert(1, "forecast".to_string());
        return argv;
    }

    // Otherwise, leave as-is.
    argv
}

#[cfg(test)]
mod tests {
    use super::*;

    fn argv(parts: &[&str]) -> Vec<String> {
        parts.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn bare_invocation_defaults_to_forecast() {
        assert_eq!(rewrite_args(argv(&["gascast"])), argv(&["gascast", "forecast"]));
        assert_eq!(
            rewrite_args(argv(&["gascast", "--demo"])),
            argv(&["gascast", "forecast", "--demo"])
        );
    }

    #[test]
    fn explicit_subcommands_and_help_pass_through() {
        assert_eq!(
            rewrite_args(argv(&["gascast", "query", "2025-01-31"])),
            argv(&["gascast", "query", "2025-01-31"])
        );
        assert_eq!(
            rewrite_args(argv(&["gascast", "--help"])),
            argv(&["gascast", "--help"])
        );
    }
}
