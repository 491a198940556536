//! Precipitation charts: recent-vs-historical comparison, seasonal variation,
//! yearly averages and totals.

use std::path::Path;

use anyhow::{ensure, Result};
use plotters::prelude::*;

use crate::stats;
use crate::table::Table;

use super::{chart_path, padded_bounds, season_color, DARK_BLUE};

/// Two bars comparing the recent five-year average against the historical one.
pub fn recent_vs_historical(table: &Table, label: &str, out_dir: &Path) -> Result<()> {
    ensure!(!table.is_empty(), "no rows for precipitation comparison chart");
    let recent = table.f64s("avg_precipitation_recent")?[0];
    let historical = table.f64s("avg_precipitation_historical")?[0];

    let path = chart_path(out_dir, label, "avg_precipitation");
    let root = BitMapBackend::new(&path, (1000, 600)).into_drawing_area();
    root.fill(&WHITE)?;

    let y_hi = recent.max(historical) * 1.15;

    let mut chart = ChartBuilder::on(&root)
        .caption(
            format!("Average Precipitation ({label}, 5 Year Recent vs. Historical)"),
            ("sans-serif", 24),
        )
        .margin(10)
        .x_label_area_size(40)
        .y_label_area_size(55)
        .build_cartesian_2d((0usize..2usize).into_segmented(), 0.0..y_hi)?;

    chart
        .configure_mesh()
        .y_desc("Average Precipitation")
        .x_label_formatter(&|position| match position {
            SegmentValue::CenterOf(0) => "Recent (2019-2023)".to_string(),
            SegmentValue::CenterOf(1) => "Historical (2014-2018)".to_string(),
            _ => String::new(),
        })
        .disable_x_mesh()
        .light_line_style(BLACK.mix(0.15))
        .draw()?;

    chart.draw_series(
        Histogram::vertical(&chart)
            .style(DARK_BLUE.filled())
            .margin(60)
            .data([(0usize, recent), (1, historical)]),
    )?;

    // value labels above the bars
    chart.draw_series([(0usize, recent), (1, historical)].map(|(position, value)| {
        Text::new(
            format!("{value:.2}"),
            (SegmentValue::CenterOf(position), value),
            ("sans-serif", 16).into_font().color(&BLACK),
        )
    }))?;

    root.present()?;
    Ok(())
}

/// 2x2 grid with one panel per season, each with its own trend line.
pub fn seasonal_small_multiples(table: &Table, label: &str, out_dir: &Path) -> Result<()> {
    let seasons = table.distinct("season")?;
    ensure!(!seasons.is_empty(), "no seasons for precipitation small multiples");
    let years = table.f64s("year")?;
    let values = table.f64s("avg_precipitation")?;

    let path = chart_path(out_dir, label, "seasonal_precipitation_small_multiples");
    let root = BitMapBackend::new(&path, (1200, 800)).into_drawing_area();
    root.fill(&WHITE)?;
    let root = root.titled(
        &format!("Precipitation Variation by Season ({label}, 2004-2023)"),
        ("sans-serif", 26),
    )?;

    let (x_lo, x_hi) = padded_bounds(&years);
    let (y_lo, y_hi) = padded_bounds(&values);

    let panels = root.split_evenly((2, 2));
    for (panel, season) in panels.iter().zip(&seasons) {
        let rows = table.filter_eq("season", season)?;
        let xs = rows.f64s("year")?;
        let ys = rows.f64s("avg_precipitation")?;
        let color = season_color(season);

        let mut chart = ChartBuilder::on(panel)
            .caption(season, ("sans-serif", 18))
            .margin(8)
            .x_label_area_size(30)
            .y_label_area_size(45)
            .build_cartesian_2d(x_lo..x_hi, y_lo..y_hi)?;

        chart
            .configure_mesh()
            .x_desc("Year")
            .y_desc("Avg. Precipitation")
            .x_label_formatter(&|year| format!("{}", *year as i32))
            .light_line_style(BLACK.mix(0.15))
            .draw()?;

        chart.draw_series(LineSeries::new(
            xs.iter().copied().zip(ys.iter().copied()),
            color.stroke_width(2),
        ))?;

        if let Some(fit) = stats::linear_regression(&xs, &ys) {
            chart.draw_series(LineSeries::new(
                xs.iter().map(|&x| (x, fit.at(x))),
                color.mix(0.6).stroke_width(1),
            ))?;
        }
    }

    root.present()?;
    Ok(())
}

/// Yearly average precipitation as a single line.
pub fn yearly_average(table: &Table, label: &str, out_dir: &Path) -> Result<()> {
    ensure!(!table.is_empty(), "no rows for yearly precipitation chart");
    let years = table.f64s("year")?;
    let values = table.f64s("avg_precipitation")?;

    let path = chart_path(out_dir, label, "yearly_avg_precipitation");
    let root = BitMapBackend::new(&path, (1000, 600)).into_drawing_area();
    root.fill(&WHITE)?;

    let (x_lo, x_hi) = padded_bounds(&years);
    let (y_lo, y_hi) = padded_bounds(&values);

    let mut chart = ChartBuilder::on(&root)
        .caption(
            format!("Yearly Average Precipitation ({label})"),
            ("sans-serif", 24),
        )
        .margin(10)
        .x_label_area_size(40)
        .y_label_area_size(55)
        .build_cartesian_2d(x_lo..x_hi, y_lo..y_hi)?;

    chart
        .configure_mesh()
        .x_desc("Year")
        .y_desc("Average Precipitation")
        .x_label_formatter(&|year| format!("{}", *year as i32))
        .light_line_style(BLACK.mix(0.15))
        .draw()?;

    chart.draw_series(LineSeries::new(
        years.into_iter().zip(values),
        BLUE.stroke_width(2),
    ))?;

    root.present()?;
    Ok(())
}

/// Yearly total precipitation as one bar per year.
pub fn yearly_total(table: &Table, label: &str, out_dir: &Path) -> Result<()> {
    ensure!(!table.is_empty(), "no rows for yearly total precipitation chart");
    let years: Vec<i32> = table
        .f64s("year")?
        .into_iter()
        .map(|year| year as i32)
        .collect();
    let totals = table.f64s("total_precipitation")?;

    let path = chart_path(out_dir, label, "yearly_total_precipitation");
    let root = BitMapBackend::new(&path, (1000, 600)).into_drawing_area();
    root.fill(&WHITE)?;

    let first = *years.iter().min().unwrap_or(&0);
    let last = *years.iter().max().unwrap_or(&0);
    let (_, y_hi) = padded_bounds(&totals);

    let mut chart = ChartBuilder::on(&root)
        .caption(
            format!("Yearly Total Precipitation ({label})"),
            ("sans-serif", 24),
        )
        .margin(10)
        .x_label_area_size(40)
        .y_label_area_size(55)
        .build_cartesian_2d((first..last + 1).into_segmented(), 0.0..y_hi)?;

    chart
        .configure_mesh()
        .x_desc("Year")
        .y_desc("Total Precipitation")
        .x_label_formatter(&|position| match position {
            SegmentValue::CenterOf(year) | SegmentValue::Exact(year) => year.to_string(),
            SegmentValue::Last => String::new(),
        })
        .disable_x_mesh()
        .light_line_style(BLACK.mix(0.15))
        .draw()?;

    chart.draw_series(
        Histogram::vertical(&chart)
            .style(DARK_BLUE.filled())
            .margin(4)
            .data(years.into_iter().zip(totals)),
    )?;

    root.present()?;
    Ok(())
}

// -- Tests -------------------------------------------------------------------
