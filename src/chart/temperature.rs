//! Temperature charts: regional extremes, seasonal averages, yearly trend.

use std::path::Path;

use anyhow::{ensure, Result};
use plotters::prelude::*;

use crate::stats;
use crate::table::Table;

use super::{chart_path, heat_color, min_max, padded_bounds, season_color};

/// Scatter of each region's lowest vs highest temperature, colored by its
/// average temperature.
pub fn extremes_scatter(table: &Table, label: &str, out_dir: &Path) -> Result<()> {
    ensure!(!table.is_empty(), "no rows for temperature extremes scatter");
    let lows = table.f64s("lowest_temp")?;
    let highs = table.f64s("highest_temp")?;
    let avgs = table.f64s("avg_temp")?;

    let path = chart_path(out_dir, label, "temp_extremes");
    let root = BitMapBackend::new(&path, (1000, 600)).into_drawing_area();
    root.fill(&WHITE)?;

    let (x_lo, x_hi) = padded_bounds(&lows);
    let (y_lo, y_hi) = padded_bounds(&highs);
    let (avg_lo, avg_hi) = min_max(&avgs);

    let mut chart = ChartBuilder::on(&root)
        .caption(
            format!("Temperature Extremes by Region ({label}, 2014-2023)"),
            ("sans-serif", 24),
        )
        .margin(10)
        .x_label_area_size(40)
        .y_label_area_size(55)
        .build_cartesian_2d(x_lo..x_hi, y_lo..y_hi)?;

    chart
        .configure_mesh()
        .x_desc("Minimum Temperature (°F)")
        .y_desc("Maximum Temperature (°F)")
        .light_line_style(BLACK.mix(0.15))
        .draw()?;

    chart.draw_series(lows.iter().zip(&highs).zip(&avgs).map(|((low, high), avg)| {
        let t = if avg_hi > avg_lo {
            (avg - avg_lo) / (avg_hi - avg_lo)
        } else {
            0.5
        };
        Circle::new((*low, *high), 5, heat_color(t).mix(0.7).filled())
    }))?;

    root.present()?;
    Ok(())
}

/// One line per season of average temperature over the years.
pub fn seasonal_averages(table: &Table, label: &str, out_dir: &Path) -> Result<()> {
    ensure!(!table.is_empty(), "no rows for seasonal temperature chart");
    let years = table.f64s("year")?;
    let temps = table.f64s("avg_temp")?;

    let path = chart_path(out_dir, label, "avg_temp_by_season_over_time");
    let root = BitMapBackend::new(&path, (1000, 600)).into_drawing_area();
    root.fill(&WHITE)?;

    let (x_lo, x_hi) = padded_bounds(&years);
    let (y_lo, y_hi) = padded_bounds(&temps);

    let mut chart = ChartBuilder::on(&root)
        .caption(
            format!("Average Temperature by Season Over Time ({label})"),
            ("sans-serif", 24),
        )
        .margin(10)
        .x_label_area_size(40)
        .y_label_area_size(55)
        .build_cartesian_2d(x_lo..x_hi, y_lo..y_hi)?;

    chart
        .configure_mesh()
        .x_desc("Year")
        .y_desc("Average Temperature (°F)")
        .x_label_formatter(&|year| format!("{}", *year as i32))
        .light_line_style(BLACK.mix(0.15))
        .draw()?;

    for season in table.distinct("season")? {
        let rows = table.filter_eq("season", &season)?;
        let points: Vec<(f64, f64)> = rows
            .f64s("year")?
            .into_iter()
            .zip(rows.f64s("avg_temp")?)
            .collect();
        let color = season_color(&season);

        chart
            .draw_series(LineSeries::new(points, color.stroke_width(3)))?
            .label(season)
            .legend(move |(x, y)| {
                PathElement::new(vec![(x, y), (x + 18, y)], color.stroke_width(3))
            });
    }

    chart
        .configure_series_labels()
        .border_style(BLACK)
        .background_style(WHITE.mix(0.8))
        .draw()?;

    root.present()?;
    Ok(())
}

/// 2x2 grid with one panel per season, each with its own trend line.
pub fn seasonal_small_multiples(table: &Table, label: &str, out_dir: &Path) -> Result<()> {
    let seasons = table.distinct("season")?;
    ensure!(!seasons.is_empty(), "no seasons for small multiples chart");
    let years = table.f64s("year")?;
    let temps = table.f64s("avg_temp")?;

    let path = chart_path(out_dir, label, "avg_temp_by_season_small_multiples");
    let root = BitMapBackend::new(&path, (1200, 800)).into_drawing_area();
    root.fill(&WHITE)?;
    let root = root.titled(
        &format!("Average Temperature by Season Over Time ({label})"),
        ("sans-serif", 26),
    )?;

    // shared axes across panels
    let (x_lo, x_hi) = padded_bounds(&years);
    let (y_lo, y_hi) = padded_bounds(&temps);

    let panels = root.split_evenly((2, 2));
    for (panel, season) in panels.iter().zip(&seasons) {
        let rows = table.filter_eq("season", season)?;
        let xs = rows.f64s("year")?;
        let ys = rows.f64s("avg_temp")?;

        let mut chart = ChartBuilder::on(panel)
            .caption(season, ("sans-serif", 18))
            .margin(8)
            .x_label_area_size(30)
            .y_label_area_size(45)
            .build_cartesian_2d(x_lo..x_hi, y_lo..y_hi)?;

        chart
            .configure_mesh()
            .x_desc("Year")
            .y_desc("Avg. Temp (°F)")
            .x_label_formatter(&|year| format!("{}", *year as i32))
            .light_line_style(BLACK.mix(0.15))
            .draw()?;

        chart.draw_series(LineSeries::new(
            xs.iter().copied().zip(ys.iter().copied()),
            season_color(season).stroke_width(3),
        ))?;

        if let Some(fit) = stats::linear_regression(&xs, &ys) {
            chart
                .draw_series(LineSeries::new(
                    xs.iter().map(|&x| (x, fit.at(x))),
                    BLACK.stroke_width(2),
                ))?
                .label("Trend Line")
                .legend(|(x, y)| PathElement::new(vec![(x, y), (x + 18, y)], BLACK));

            chart
                .configure_series_labels()
                .border_style(BLACK)
                .background_style(WHITE.mix(0.8))
                .draw()?;
        }
    }

    root.present()?;
    Ok(())
}

/// Yearly average line with a regression trend line and ±2σ anomaly markers.
pub fn yearly_trend(table: &Table, label: &str, out_dir: &Path) -> Result<()> {
    ensure!(!table.is_empty(), "no rows for yearly temperature trend");
    let years = table.f64s("year")?;
    let temps = table.f64s("avg_temp")?;
    let flagged = stats::anomalies(&temps);

    let path = chart_path(out_dir, label, "avg_yearly_temp_trend");
    let root = BitMapBackend::new(&path, (1000, 600)).into_drawing_area();
    root.fill(&WHITE)?;

    let (x_lo, x_hi) = padded_bounds(&years);
    let (y_lo, y_hi) = padded_bounds(&temps);

    let mut chart = ChartBuilder::on(&root)
        .caption(
            format!("Average Yearly Temperature Trend ({label})"),
            ("sans-serif", 24),
        )
        .margin(10)
        .x_label_area_size(40)
        .y_label_area_size(55)
        .build_cartesian_2d(x_lo..x_hi, y_lo..y_hi)?;

    chart
        .configure_mesh()
        .x_desc("Year")
        .y_desc("Average Temperature (°F)")
        .x_label_formatter(&|year| format!("{}", *year as i32))
        .light_line_style(BLACK.mix(0.15))
        .draw()?;

    chart
        .draw_series(LineSeries::new(
            years.iter().copied().zip(temps.iter().copied()),
            BLUE.stroke_width(2),
        ))?
        .label("Yearly Average")
        .legend(|(x, y)| PathElement::new(vec![(x, y), (x + 18, y)], BLUE.stroke_width(2)));

    let anomaly_color = RGBColor(0xE6, 0x9F, 0x00);
    chart
        .draw_series(
            years
                .iter()
                .zip(&temps)
                .zip(&flagged)
                .filter(|(_, &is_anomaly)| is_anomaly)
                .map(|((year, temp), _)| Circle::new((*year, *temp), 5, anomaly_color.filled())),
        )?
        .label("Anomaly")
        .legend(move |(x, y)| Circle::new((x + 9, y), 4, anomaly_color.filled()));

    if let Some(fit) = stats::linear_regression(&years, &temps) {
        chart
            .draw_series(LineSeries::new(
                years.iter().map(|&year| (year, fit.at(year))),
                BLACK.stroke_width(2),
            ))?
            .label("Trend Line")
            .legend(|(x, y)| PathElement::new(vec![(x, y), (x + 18, y)], BLACK));
    }

    chart
        .configure_series_labels()
        .border_style(BLACK)
        .background_style(WHITE.mix(0.8))
        .draw()?;

    root.present()?;
    Ok(())
}

// -- Tests -------------------------------------------------------------------
