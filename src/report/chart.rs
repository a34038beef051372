//! Terminal rendering of chart-ready data.
//!
//! Plotting proper is left to external tools; these helpers print the same
//! series and matrix as text, or hand them out as JSON.

use serde::Serialize;

use crate::error::{FlightError, Result};

use super::shaper::{AggregateSeries, DelayMatrix};

/// Width of a 100% bar, in characters.
const BAR_WIDTH: usize = 40;

/// Renders a series as a horizontal bar chart.
pub fn series_lines(title: &str, series: &AggregateSeries) -> Vec<String> {
    let label_width = series
        .categories
        .iter()
        .map(|c| c.chars().count())
        .max()
        .unwrap_or(0);

    let mut lines = Vec::with_capacity(series.len() + 1);
    lines.push(title.to_string());
    for (category, percentage) in series.iter() {
        lines.push(format!(
            "{category:<label_width$} | {bar:<BAR_WIDTH$} {percentage:>6.2}%",
            bar = bar(percentage)
        ));
    }
    lines
}

fn bar(percentage: f64) -> String {
    let filled = (percentage.clamp(0.0, 100.0) / 100.0 * BAR_WIDTH as f64).round() as usize;
    "#".repeat(filled)
}

/// Renders a matrix as a grid of percentages, one row per origin.
pub fn matrix_lines(title: &str, matrix: &DelayMatrix) -> Vec<String> {
    let cell_width = matrix
        .destinations
        .iter()
        .map(|d| d.chars().count())
        .max()
        .unwrap_or(0)
        .max(6);
    let label_width = matrix
        .origins
        .iter()
        .map(|o| o.chars().count())
        .max()
        .unwrap_or(0)
        .max("ORIGIN".len());

    let mut lines = Vec::with_capacity(matrix.origins.len() + 2);
    lines.push(title.to_string());

    let mut header = format!("{:<label_width$}", "ORIGIN");
    for destination in &matrix.destinations {
        header.push_str(&format!(" {destination:>cell_width$}"));
    }
    lines.push(header);

    for (origin, cells) in matrix.origins.iter().zip(&matrix.cells) {
        let mut line = format!("{origin:<label_width$}");
        for cell in cells {
            line.push_str(&format!(" {cell:>cell_width$.1}"));
        }
        lines.push(line);
    }
    lines
}

/// Serializes chart data as pretty JSON.
pub fn to_json<T: Serialize>(data: &T) -> Result<String> {
    serde_json::to_string_pretty(data)
        .map_err(|e| FlightError::internal(format!("Failed to serialize chart data: {e}")))
}
