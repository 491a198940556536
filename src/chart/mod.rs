//! Renders analysis tables to static PNG charts with `plotters`.

pub mod extreme;
pub mod precipitation;
pub mod temperature;

use std::path::{Path, PathBuf};

use plotters::style::RGBColor;

// Colorblind-safe palette shared by the season and event type charts.
pub const DARK_BLUE: RGBColor = RGBColor(0x00, 0x72, 0xB2);
pub const ORANGE: RGBColor = RGBColor(0xD5, 0x5E, 0x00);
pub const GREEN: RGBColor = RGBColor(0x00, 0x9E, 0x73);
pub const LIGHT_BLUE: RGBColor = RGBColor(0x56, 0xB4, 0xE9);
pub const GRAY: RGBColor = RGBColor(0x66, 0x66, 0x66);

pub fn season_color(season: &str) -> RGBColor {
    match season {
        "Spring" => DARK_BLUE,
        "Summer" => ORANGE,
        "Autumn" => GREEN,
        "Winter" => LIGHT_BLUE,
        _ => GRAY,
    }
}

pub fn event_color(event_type: &str) -> RGBColor {
    match event_type {
        "Heatwave" => ORANGE,
        "Strong Winds" => GREEN,
        "Heavy Rainfall" => DARK_BLUE,
        _ => GRAY,
    }
}

/// Cold-to-hot gradient for temperature scatter points, `t` in `[0, 1]`.
pub(crate) fn heat_color(t: f64) -> RGBColor {
    let t = t.clamp(0.0, 1.0);
    let lerp = |a: u8, b: u8| (a as f64 + (b as f64 - a as f64) * t).round() as u8;
    // endpoints of the reversed red-yellow-blue map
    RGBColor(lerp(0x45, 0xD7), lerp(0x75, 0x30), lerp(0xB4, 0x27))
}

/// Output path for a rendered chart: `{label}_{name}.png`, label lowercased.
pub fn chart_path(out_dir: &Path, label: &str, name: &str) -> PathBuf {
    out_dir.join(format!("{}_{}.png", label.to_lowercase(), name))
}

pub(crate) fn min_max(values: &[f64]) -> (f64, f64) {
    values.iter().fold(
        (f64::INFINITY, f64::NEG_INFINITY),
        |(lo, hi), v| (lo.min(*v), hi.max(*v)),
    )
}

/// Axis bounds padded by 2% so edge points do not sit on the frame.
pub(crate) fn padded_bounds(values: &[f64]) -> (f64, f64) {
    let (lo, hi) = min_max(values);
    if lo == hi {
        return (lo - 1.0, hi + 1.0);
    }
    let margin = (hi - lo) * 0.02;
    (lo - margin, hi + margin)
}

// -- Tests -------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_lowercase_label_in_chart_path() {
        let path = chart_path(Path::new("visualizations/temperature"), "Portland", "temp_extremes");

        assert_eq!(
            path,
            Path::new("visualizations/temperature/portland_temp_extremes.png")
        );
    }

    #[test]
    fn should_pad_bounds_by_two_percent() {
        let (lo, hi) = padded_bounds(&[0.0, 100.0]);

        assert_eq!(lo, -2.0);
        assert_eq!(hi, 102.0);
    }

    #[test]
    fn should_widen_degenerate_bounds() {
        let (lo, hi) = padded_bounds(&[5.0, 5.0]);

        assert!(lo < 5.0 && hi > 5.0);
    }

    #[test]
    fn should_map_known_seasons_to_palette() {
        assert_eq!(season_color("Summer"), ORANGE);
        assert_eq!(season_color("Winter"), LIGHT_BLUE);
        assert_eq!(season_color("Monsoon"), GRAY);
    }

    #[test]
    fn should_map_event_types_to_palette() {
        assert_eq!(event_color("Heavy Rainfall"), DARK_BLUE);
        assert_eq!(event_color("Hailstorm"), GRAY);
    }

    #[test]
    fn should_interpolate_heat_color_endpoints() {
        assert_eq!(heat_color(0.0), RGBColor(0x45, 0x75, 0xB4));
        assert_eq!(heat_color(1.0), RGBColor(0xD7, 0x30, 0x27));
        assert_eq!(heat_color(-3.0), heat_color(0.0));
    }
}
