//! Chart-ready shapes for the aggregate queries.
//!
//! The shaper keeps the order rows arrive in; sorting belongs to the query.

use std::collections::HashMap;

use serde::Serialize;

use crate::db::QueryResult;
use crate::error::Result;

use super::records::{CategoryPercentage, RoutePercentage};

/// Parallel category and percentage sequences for a bar chart.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct AggregateSeries {
    pub categories: Vec<String>,
    pub percentages: Vec<f64>,
}

impl AggregateSeries {
    pub fn len(&self) -> usize {
        self.categories.len()
    }

    pub fn is_empty(&self) -> bool {
        self.categories.is_empty()
    }

    /// Iterates `(category, percentage)` pairs.
    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> {
        self.categories
            .iter()
            .map(String::as_str)
            .zip(self.percentages.iter().copied())
    }
}

/// Unzips two-column aggregate rows into a series.
pub fn to_series(result: &QueryResult) -> Result<AggregateSeries> {
    let mut series = AggregateSeries {
        categories: Vec::with_capacity(result.len()),
        percentages: Vec::with_capacity(result.len()),
    };

    for record in result.records() {
        let row = CategoryPercentage::try_from(record)?;
        series.categories.push(row.category);
        series.percentages.push(row.percentage);
    }

    Ok(series)
}

/// Percentage delayed per origin (rows) and destination (columns).
///
/// Axes hold only codes seen in the input. A combination that was not
/// reported reads as 0.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct DelayMatrix {
    pub origins: Vec<String>,
    pub destinations: Vec<String>,
    /// `cells[row][col]` for `origins[row]` and `destinations[col]`.
    pub cells: Vec<Vec<f64>>,
}

impl DelayMatrix {
    pub fn is_empty(&self) -> bool {
        self.origins.is_empty()
    }

    /// Cell for a route; `None` when either code is not on its axis.
    pub fn get(&self, origin: &str, destination: &str) -> Option<f64> {
        let row = self.origins.iter().position(|o| o == origin)?;
        let col = self.destinations.iter().position(|d| d == destination)?;
        Some(self.cell(row, col))
    }

    // Rows shorter than the destination axis read as 0 past their end.
    fn cell(&self, row: usize, col: usize) -> f64 {
        self.cells
            .get(row)
            .and_then(|cells| cells.get(col))
            .copied()
            .unwrap_or(0.0)
    }

    /// Reorders the axes. Codes listed in `origin_order` / `destination_order`
    /// come first, in that order; the rest keep their current order. Listed
    /// codes that are not on an axis are ignored.
    pub fn with_axis_order(&self, origin_order: &[&str], destination_order: &[&str]) -> Self {
        let origins = ordered_axis(&self.origins, origin_order);
        let destinations = ordered_axis(&self.destinations, destination_order);

        let cells: Vec<Vec<f64>> = origins
            .iter()
            .map(|&row| destinations.iter().map(|&col| self.cell(row, col)).collect())
            .collect();

        Self {
            origins: origins.iter().map(|&i| self.origins[i].clone()).collect(),
            destinations: destinations
                .iter()
                .map(|&i| self.destinations[i].clone())
                .collect(),
            cells,
        }
    }

    /// Both axes in alphabetical order, the order a heatmap is drawn in.
    pub fn sorted(&self) -> Self {
        let mut origins: Vec<&str> = self.origins.iter().map(String::as_str).collect();
        let mut destinations: Vec<&str> = self.destinations.iter().map(String::as_str).collect();
        origins.sort_unstable();
        destinations.sort_unstable();
        self.with_axis_order(&origins, &destinations)
    }
}

/// Index permutation putting `preferred` names first.
fn ordered_axis(axis: &[String], preferred: &[&str]) -> Vec<usize> {
    let mut order: Vec<usize> = Vec::with_capacity(axis.len());
    let listed = preferred
        .iter()
        .filter_map(|name| axis.iter().position(|a| a == name));
    for i in listed.chain(0..axis.len()) {
        if !order.contains(&i) {
            order.push(i);
        }
    }
    order
}

/// Pivots three-column route rows into a dense matrix, axes in first-seen order.
pub fn to_matrix(result: &QueryResult) -> Result<DelayMatrix> {
    let mut matrix = DelayMatrix::default();
    let mut origin_index: HashMap<String, usize> = HashMap::new();
    let mut destination_index: HashMap<String, usize> = HashMap::new();

    for record in result.records() {
        let route = RoutePercentage::try_from(record)?;

        let row = *origin_index.entry(route.origin.clone()).or_insert_with(|| {
            matrix.origins.push(route.origin.clone());
            matrix.cells.push(vec![0.0; matrix.destinations.len()]);
            matrix.origins.len() - 1
        });

        let col = *destination_index
            .entry(route.destination.clone())
            .or_insert_with(|| {
                matrix.destinations.push(route.destination.clone());
                for cells in &mut matrix.cells {
                    cells.push(0.0);
                }
                matrix.destinations.len() - 1
            });

        matrix.cells[row][col] = route.percentage;
    }

    Ok(matrix)
}
