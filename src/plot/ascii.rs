//! ASCII plotting for terminal output.
//!
//! This is intentionally "dumb" (fixed-size grid), optimized for:
//! - quick visual sanity checks in a terminal
//! - deterministic output (helpful for golden tests)
//!
//! Plot elements:
//! - observed prices: `o`
//! - fitted curve: `-` line
//! - forecast month-ends: `+`

use chrono::{Duration, NaiveDate};

use crate::domain::{FitResult, ForecastRow, PriceSeries};
use crate::model::predict;

/// Render history, the fitted curve, and the forecast schedule on one grid.
///
/// The x axis runs from the first observation to the last scheduled
/// month-end (or the last observation when the schedule is empty).
pub fn render_ascii_plot(
    series: &PriceSeries,
    fit: &FitResult,
    schedule: &[ForecastRow],
    width: usize,
    height: usize,
) -> String {
    let width = width.max(10);
    let height = height.max(5);

    let first = series.first_date();
    let last = schedule
        .last()
        .map(|r| r.date)
        .unwrap_or_else(|| series.last_obs());
    // A one-point history would collapse the axis; a single day of span keeps
    // the mapping finite.
    let span_days = (last - first).num_days().max(1);

    let observed: Vec<(f64, f64)> = series
        .points()
        .iter()
        .map(|p| ((p.date - first).num_days() as f64, p.price))
        .collect();
    let forecast: Vec<(f64, f64)> = schedule
        .iter()
        .map(|r| ((r.date - first).num_days() as f64, r.price))
        .collect();
    let curve = sample_curve(fit, first, span_days, width);

    let (y_min, y_max) = y_range(&observed, &forecast, &curve).unwrap_or((0.0, 1.0));
    let (y_min, y_max) = pad_range(y_min, y_max, 0.05);

    let mut grid = vec![vec![' '; width]; height];

    // Draw the curve first so points can overlay it.
    draw_curve(&mut grid, &curve, span_days as f64, y_min, y_max);

    for &(day, price) in &observed {
        let x = map_x(day, span_days as f64, width);
        let y = map_y(price, y_min, y_max, height);
        grid[y][x] = 'o';
    }
    for &(day, price) in &forecast {
        let x = map_x(day, span_days as f64, width);
        let y = map_y(price, y_min, y_max, height);
        grid[y][x] = '+';
    }

    let mut out = String::new();
    out.push_str(&format!(
        "Plot: {first} .. {last} | price=[{y_min:.2}, {y_max:.2}]\n"
    ));
    for row in grid {
        out.push_str(&row.into_iter().collect::<String>());
        out.push('\n');
    }

    out
}

/// Evaluate the fitted model on `n` dates spread evenly over the x axis.
fn sample_curve(fit: &FitResult, first: NaiveDate, span_days: i64, n: usize) -> Vec<(f64, f64)> {
    let n = n.max(2);
    let mut out = Vec::with_capacity(n);
    for i in 0..n {
        let u = i as f64 / (n as f64 - 1.0);
        let day = (u * span_days as f64).round() as i64;
        let date = first + Duration::days(day);
        out.push((day as f64, predict(&fit.model, date)));
    }
    out
}

fn y_range(
    observed: &[(f64, f64)],
    forecast: &[(f64, f64)],
    curve: &[(f64, f64)],
) -> Option<(f64, f64)> {
    let mut min_y = f64::INFINITY;
    let mut max_y = f64::NEG_INFINITY;

    for &(_, y) in observed.iter().chain(forecast.iter()).chain(curve.iter()) {
        min_y = min_y.min(y);
        max_y = max_y.max(y);
    }

    if min_y.is_finite() && max_y.is_finite() && max_y > min_y {
        Some((min_y, max_y))
    } else {
        None
    }
}

fn pad_range(min: f64, max: f64, frac: f64) -> (f64, f64) {
    let span = (max - min).abs();
    let pad = (span * frac).max(1e-12);
    (min - pad, max + pad)
}

fn map_x(day: f64, span_days: f64, width: usize) -> usize {
    let width = width.max(2);
    let u = (day / span_days).clamp(0.0, 1.0);
    (u * (width as f64 - 1.0)).round() as usize
}

fn map_y(y: f64, y_min: f64, y_max: f64, height: usize) -> usize {
    let height = height.max(2);
    let u = ((y - y_min) / (y_max - y_min)).clamp(0.0, 1.0);
    // y=top is max -> row 0
    (height as f64 - 1.0 - (u * (height as f64 - 1.0))).round() as usize
}

fn draw_curve(grid: &mut [Vec<char>], curve: &[(f64, f64)], span_days: f64, y_min: f64, y_max: f64) {
    if curve.len() < 2 {
        return;
    }
    let height = grid.len();
    let width = grid[0].len();

    let mut prev = None;
    for &(day, y) in curve {
        let x = map_x(day, span_days, width);
        let yy = map_y(y, y_min, y_max, height);
        if let Some((x0, y0)) = prev {
            draw_line(grid, x0, y0, x, yy, '-');
        } else {
            grid[yy][x] = '-';
        }
        prev = Some((x, yy));
    }
}

/// Integer line drawing (Bresenham-ish).
fn draw_line(grid: &mut [Vec<char>], x0: usize, y0: usize, x1: usize, y1: usize, ch: char) {
    let mut x0 = x0 as isize;
    let mut y0 = y0 as isize;
    let x1 = x1 as isize;
    let y1 = y1 as isize;

    let dx = (x1 - x0).abs();
    let sx = if x0 < x1 { 1 } else { -1 };
    let dy = -(y1 - y0).abs();
    let sy = if y0 < y1 { 1 } else { -1 };
    let mut err = dx + dy;

    loop {
        if y0 >= 0
            && (y0 as usize) < grid.len()
            && x0 >= 0
            && (x0 as usize) < grid[0].len()
            && grid[y0 as usize][x0 as usize] == ' '
        {
            grid[y0 as usize][x0 as usize] = ch;
        }

        if x0 == x1 && y0 == y1 {
            break;
        }
        let e2 = 2 * err;
        if e2 >= dy {
            err += dy;
            x0 += sx;
        }
        if e2 <= dx {
            err += dx;
            y0 += sy;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{FitQuality, PricePoint, SeasonalTrendModel};

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    fn flat_fit(level: f64) -> FitResult {
        FitResult {
            model: SeasonalTrendModel {
                origin: d(2024, 1, 1),
                intercept: level,
                trend_per_day: 0.0,
                month_effects: [0.0; 11],
            },
            quality: FitQuality {
                sse: 0.0,
                rmse: 0.0,
                n: 2,
            },
        }
    }

    #[test]
    fn plot_golden_snapshot_small() {
        let series = PriceSeries::from_points(vec![
            PricePoint {
                date: d(2024, 1, 1),
                price: 9.0,
            },
            PricePoint {
                date: d(2024, 1, 10),
                price: 11.0,
            },
        ])
        .unwrap();
        let schedule = [ForecastRow {
            date: d(2024, 1, 19),
            price: 10.0,
        }];

        let txt = render_ascii_plot(&series, &flat_fit(10.0), &schedule, 10, 5);
        let expected = concat!(
            "Plot: 2024-01-01 .. 2024-01-19 | price=[8.90, 11.10]\n",
            "     o    \n",
            "          \n",
            "---------+\n",
            "          \n",
            "o         \n",
        );
        assert_eq!(txt, expected);
    }

    #[test]
    fn every_observation_lands_on_the_grid() {
        let points: Vec<PricePoint> = (0..12)
            .map(|i| PricePoint {
                date: d(2024, 1, 1) + Duration::days(i * 30),
                price: 10.0 + (i % 4) as f64,
            })
            .collect();
        let series = PriceSeries::from_points(points).unwrap();

        let txt = render_ascii_plot(&series, &flat_fit(11.0), &[], 40, 12);
        let o_count = txt.chars().filter(|&c| c == 'o').count();
        assert_eq!(o_count, 12);
        assert!(txt.starts_with("Plot: 2024-01-01 .. 2024-11-26 | price=["));
    }

    #[test]
    fn forecast_markers_appear_after_history() {
        let series = PriceSeries::from_points(vec![
            PricePoint {
                date: d(2024, 1, 31),
                price: 10.0,
            },
            PricePoint {
                date: d(2024, 6, 30),
                price: 12.0,
            },
        ])
        .unwrap();
        let schedule = [
            ForecastRow {
                date: d(2024, 7, 31),
                price: 12.5,
            },
            ForecastRow {
                date: d(2024, 8, 31),
                price: 13.0,
            },
        ];

        let txt = render_ascii_plot(&series, &flat_fit(11.0), &schedule, 60, 15);
        assert_eq!(txt.chars().filter(|&c| c == '+').count(), 2);

        // '+' columns must all lie to the right of every 'o' column.
        let lines: Vec<&str> = txt.lines().skip(1).collect();
        let max_o = lines
            .iter()
            .flat_map(|l| l.char_indices().filter(|&(_, c)| c == 'o').map(|(i, _)| i))
            .max()
            .unwrap();
        let min_plus = lines
            .iter()
            .flat_map(|l| l.char_indices().filter(|&(_, c)| c == '+').map(|(i, _)| i))
            .min()
            .unwrap();
        assert!(min_plus > max_o);
    }
}
