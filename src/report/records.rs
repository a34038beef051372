//! Typed views of catalog records.
//!
//! One struct per result shape. Conversion from a raw `Record` is where a
//! missing column or an unusable value turns into `MalformedRecord`.

use crate::db::{Record, Value};
use crate::error::{FlightError, Result};
use serde::Serialize;

/// A row of the flight lookups and delayed-flight scans.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FlightRecord {
    pub id: i64,
    pub origin_airport: String,
    pub destination_airport: String,
    pub airline: String,
    /// Delay in minutes; 0 when the store has no delay recorded.
    pub delay: i64,
}

impl FlightRecord {
    pub fn is_delayed(&self) -> bool {
        self.delay > 0
    }
}

impl TryFrom<Record<'_>> for FlightRecord {
    type Error = FlightError;

    fn try_from(record: Record<'_>) -> Result<Self> {
        Ok(Self {
            id: integer(required(&record, "ID")?, "ID")?,
            origin_airport: text(required(&record, "ORIGIN_AIRPORT")?, "ORIGIN_AIRPORT")?,
            destination_airport: text(
                required(&record, "DESTINATION_AIRPORT")?,
                "DESTINATION_AIRPORT",
            )?,
            airline: text(required(&record, "AIRLINE")?, "AIRLINE")?,
            delay: delay_minutes(record.get("DELAY"))?,
        })
    }
}

/// A `(category, percentage)` row of the airline and hour aggregates.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryPercentage {
    pub category: String,
    pub percentage: f64,
}

impl TryFrom<Record<'_>> for CategoryPercentage {
    type Error = FlightError;

    fn try_from(record: Record<'_>) -> Result<Self> {
        let [category, percentage] = record.values() else {
            return Err(FlightError::malformed(format!(
                "expected 2 columns (category, percentage), found {}",
                record.width()
            )));
        };

        Ok(Self {
            category: text(category, "category")?,
            percentage: percentage_value(percentage)?,
        })
    }
}

/// An `(origin, destination, percentage)` row of the route aggregate.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RoutePercentage {
    pub origin: String,
    pub destination: String,
    pub percentage: f64,
}

impl TryFrom<Record<'_>> for RoutePercentage {
    type Error = FlightError;

    fn try_from(record: Record<'_>) -> Result<Self> {
        let [origin, destination, percentage] = record.values() else {
            return Err(FlightError::malformed(format!(
                "expected 3 columns (origin, destination, percentage), found {}",
                record.width()
            )));
        };

        Ok(Self {
            origin: text(origin, "origin")?,
            destination: text(destination, "destination")?,
            percentage: percentage_value(percentage)?,
        })
    }
}

fn required<'a>(record: &Record<'a>, column: &str) -> Result<&'a Value> {
    record
        .get(column)
        .ok_or_else(|| FlightError::malformed(format!("missing column {column}")))
}

fn integer(value: &Value, column: &str) -> Result<i64> {
    match value {
        Value::Int(i) => Ok(*i),
        Value::String(s) => s
            .trim()
            .parse()
            .map_err(|_| FlightError::malformed(format!("{column} is not an integer: {s:?}"))),
        other => Err(FlightError::malformed(format!(
            "{column} is not an integer: {other}"
        ))),
    }
}

// Airport codes in some extracts are numeric, so any scalar displays as text.
fn text(value: &Value, column: &str) -> Result<String> {
    match value {
        Value::String(s) => Ok(s.clone()),
        Value::Int(_) | Value::Float(_) | Value::Bool(_) => Ok(value.to_display_string()),
        Value::Null => Err(FlightError::malformed(format!("{column} is NULL"))),
        Value::Bytes(_) => Err(FlightError::malformed(format!("{column} holds binary data"))),
    }
}

/// Resolves a DELAY cell to minutes.
///
/// Absent, NULL and blank text mean no delay recorded and resolve to 0.
/// Reals are truncated; text must hold an integer.
pub fn delay_minutes(value: Option<&Value>) -> Result<i64> {
    match value {
        None | Some(Value::Null) => Ok(0),
        Some(Value::String(s)) if s.trim().is_empty() => Ok(0),
        Some(Value::Int(i)) => Ok(*i),
        Some(Value::Bool(b)) => Ok(i64::from(*b)),
        Some(Value::Float(f)) if f.is_finite() => Ok(f.trunc() as i64),
        Some(value @ Value::String(_)) => integer(value, "DELAY"),
        Some(other) => Err(FlightError::malformed(format!(
            "DELAY is not an integer: {other}"
        ))),
    }
}

fn percentage_value(value: &Value) -> Result<f64> {
    value
        .as_f64()
        .ok_or_else(|| FlightError::malformed(format!("percentage is not numeric: {value}")))
}
