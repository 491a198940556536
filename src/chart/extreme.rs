//! Extreme weather event charts: count trends per event type and faceted
//! decade-shift comparisons by region.

use std::collections::HashMap;
use std::path::Path;

use anyhow::{ensure, Result};
use plotters::prelude::*;

use crate::table::Table;

use super::{chart_path, event_color, padded_bounds, DARK_BLUE};

pub fn event_trends(table: &Table, label: &str, out_dir: &Path) -> Result<()> {
    trend_chart(
        table,
        &format!("Trend of Extreme Weather Event Counts Over Time ({label})"),
        "Event Count",
        &chart_path(out_dir, label, "extreme_event_counts_trend"),
        false,
    )
}

pub fn event_trends_log_scale(table: &Table, label: &str, out_dir: &Path) -> Result<()> {
    trend_chart(
        table,
        &format!("Trend of Extreme Weather Event Counts Over Time ({label}, Logarithmic Scale)"),
        "Event Count (Log Scale)",
        &chart_path(out_dir, label, "extreme_event_counts_trend_log_scale"),
        true,
    )
}

fn trend_chart(
    table: &Table,
    title: &str,
    y_desc: &str,
    path: &Path,
    log_scale: bool,
) -> Result<()> {
    ensure!(!table.is_empty(), "no rows for event trend chart");
    let years = table.f64s("year")?;
    let counts = table.f64s("event_count")?;

    let mut series = Vec::new();
    for event_type in table.distinct("event_type")? {
        let rows = table.filter_eq("event_type", &event_type)?;
        let points: Vec<(f64, f64)> = rows
            .f64s("year")?
            .into_iter()
            .zip(rows.f64s("event_count")?)
            .collect();
        series.push((event_type, points));
    }

    let root = BitMapBackend::new(path, (1000, 600)).into_drawing_area();
    root.fill(&WHITE)?;

    let (x_lo, x_hi) = padded_bounds(&years);
    let (y_lo, y_hi) = padded_bounds(&counts);

    let mut builder = ChartBuilder::on(&root);
    builder
        .caption(title, ("sans-serif", 22))
        .margin(10)
        .x_label_area_size(40)
        .y_label_area_size(55);

    // the log coordinate is a different chart type, so each branch draws fully
    if log_scale {
        let floor = counts
            .iter()
            .copied()
            .filter(|&count| count > 0.0)
            .fold(f64::INFINITY, f64::min)
            .min(1.0);
        let mut chart =
            builder.build_cartesian_2d(x_lo..x_hi, (floor..y_hi.max(floor * 10.0)).log_scale())?;
        chart
            .configure_mesh()
            .x_desc("Year")
            .y_desc(y_desc)
            .x_label_formatter(&|year| format!("{}", *year as i32))
            .light_line_style(BLACK.mix(0.15))
            .draw()?;

        for (event_type, points) in &series {
            let color = event_color(event_type);
            chart
                .draw_series(LineSeries::new(
                    points.iter().map(|&(x, y)| (x, y.max(floor))),
                    color.stroke_width(2),
                ))?
                .label(event_type.as_str())
                .legend(move |(x, y)| {
                    PathElement::new(vec![(x, y), (x + 18, y)], color.stroke_width(2))
                });
        }

        chart
            .configure_series_labels()
            .border_style(BLACK)
            .background_style(WHITE.mix(0.8))
            .draw()?;
    } else {
        let mut chart = builder.build_cartesian_2d(x_lo..x_hi, y_lo..y_hi)?;
        chart
            .configure_mesh()
            .x_desc("Year")
            .y_desc(y_desc)
            .x_label_formatter(&|year| format!("{}", *year as i32))
            .light_line_style(BLACK.mix(0.15))
            .draw()?;

        for (event_type, points) in &series {
            let color = event_color(event_type);
            chart
                .draw_series(LineSeries::new(points.iter().copied(), color.stroke_width(2)))?
                .label(event_type.as_str())
                .legend(move |(x, y)| {
                    PathElement::new(vec![(x, y), (x + 18, y)], color.stroke_width(2))
                });
        }

        chart
            .configure_series_labels()
            .border_style(BLACK)
            .background_style(WHITE.mix(0.8))
            .draw()?;
    }

    root.present()?;
    Ok(())
}

/// Faceted bars of the change in event counts per region, one facet per
/// event type.
pub fn count_shift_facets(table: &Table, label: &str, out_dir: &Path) -> Result<()> {
    shift_facets(
        table,
        "count_change",
        &format!("Change in Extreme Event Counts by Region and Type ({label}, 2004-2013 vs 1994-2003)"),
        "Change in Count",
        &chart_path(out_dir, label, "extreme_event_count_change_faceted"),
    )
}

/// Faceted bars of the change in average event intensity per region.
pub fn intensity_shift_facets(table: &Table, label: &str, out_dir: &Path) -> Result<()> {
    shift_facets(
        table,
        "intensity_change",
        &format!(
            "Change in Average Extreme Event Intensity by Region and Type ({label}, 2004-2013 vs 1994-2003)"
        ),
        "Change in Intensity",
        &chart_path(out_dir, label, "extreme_event_intensity_change_faceted"),
    )
}

fn shift_facets(
    table: &Table,
    value_column: &str,
    title: &str,
    y_desc: &str,
    path: &Path,
) -> Result<()> {
    ensure!(!table.is_empty(), "no rows for event shift chart");
    let event_types = table.distinct("event_type")?;
    let regions = regions_by_total_change(table, value_column)?;

    let root = BitMapBackend::new(path, (1500, 560)).into_drawing_area();
    root.fill(&WHITE)?;
    let root = root.titled(title, ("sans-serif", 22))?;

    let panels = root.split_evenly((1, event_types.len()));
    for (panel, event_type) in panels.iter().zip(&event_types) {
        let rows = table.filter_eq("event_type", event_type)?;
        let by_region: HashMap<&str, f64> = rows
            .strs("region")?
            .into_iter()
            .zip(rows.f64s(value_column)?)
            .collect();
        let values: Vec<f64> = regions
            .iter()
            .map(|region| by_region.get(region.as_str()).copied().unwrap_or(0.0))
            .collect();

        let (lo, hi) = super::min_max(&values);
        let y_lo = lo.min(0.0) * 1.1 - 0.1;
        let y_hi = hi.max(0.0) * 1.1 + 0.1;

        let mut chart = ChartBuilder::on(panel)
            .caption(event_type, ("sans-serif", 18))
            .margin(8)
            .x_label_area_size(60)
            .y_label_area_size(50)
            .build_cartesian_2d(
                (0i32..regions.len() as i32).into_segmented(),
                y_lo..y_hi,
            )?;

        let region_names = regions.clone();
        chart
            .configure_mesh()
            .x_desc("Region")
            .y_desc(y_desc)
            .x_label_formatter(&move |position| match position {
                SegmentValue::CenterOf(index) | SegmentValue::Exact(index) => region_names
                    .get(*index as usize)
                    .cloned()
                    .unwrap_or_default(),
                SegmentValue::Last => String::new(),
            })
            .disable_x_mesh()
            .light_line_style(BLACK.mix(0.15))
            .draw()?;

        chart.draw_series(values.iter().enumerate().map(|(index, &value)| {
            Rectangle::new(
                [
                    (SegmentValue::Exact(index as i32), 0.0),
                    (SegmentValue::Exact(index as i32 + 1), value),
                ],
                DARK_BLUE.mix(0.85).filled(),
            )
        }))?;
    }

    root.present()?;
    Ok(())
}

// Regions ordered by the summed absolute change across event types, largest
// shift first.
fn regions_by_total_change(table: &Table, value_column: &str) -> Result<Vec<String>> {
    let region_column = table.strs("region")?;
    let values = table.f64s(value_column)?;

    let mut totals: Vec<(String, f64)> = Vec::new();
    for (region, value) in region_column.into_iter().zip(values) {
        match totals.iter_mut().find(|(name, _)| name == region) {
            Some((_, total)) => *total += value.abs(),
            None => totals.push((region.to_string(), value.abs())),
        }
    }

    totals.sort_by(|a, b| b.1.total_cmp(&a.1));
    Ok(totals.into_iter().map(|(region, _)| region).collect())
}

// -- Tests -------------------------------------------------------------------
