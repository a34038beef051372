//! Runs one CLI command against the data access layer.
//!
//! Commands return their output lines instead of printing them, so the
//! binary decides where they go and tests can inspect them.

use crate::cli::{Command, OutputFormat};
use crate::data::FlightData;
use crate::db::QueryResult;
use crate::diagnostics::{Diagnostic, DiagnosticSink};
use crate::error::Result;
use crate::query::CatalogQuery;
use crate::report::{chart, render, to_matrix, to_series};

/// Executes `command` and returns what should be shown to the user.
///
/// Store failures have already been reported by `data` and show up here as
/// empty results. Malformed records are reported through `sink`; any lines
/// rendered before the bad record are still returned.
pub async fn execute(
    data: &FlightData,
    command: &Command,
    format: OutputFormat,
    sink: &dyn DiagnosticSink,
) -> Result<Vec<String>> {
    match command {
        Command::Flight { id } => flights(data.flight_by_id(*id).await, format, sink),
        Command::Date { date } => flights(
            data.flights_by_date(date.day, date.month, date.year).await,
            format,
            sink,
        ),
        Command::Airline { name } => {
            flights(data.delayed_flights_by_airline(name).await, format, sink)
        }
        Command::Airport { iata } => {
            flights(data.delayed_flights_by_airport(iata).await, format, sink)
        }
        Command::AirlineDelays => series(
            "Percentage of delayed flights by airline",
            CatalogQuery::PercentageDelayedByAirline,
            data.percentage_delayed_by_airline().await,
            format,
            sink,
        ),
        Command::HourlyDelays => series(
            "Percentage of delayed flights by hour of day",
            CatalogQuery::PercentageDelayedByHour,
            data.percentage_delayed_by_hour().await,
            format,
            sink,
        ),
        Command::RouteDelays => {
            route_matrix(data.percentage_delayed_by_route().await, format, sink)
        }
        Command::Queries => Ok(catalog_lines()),
    }
}

fn flights(
    result: QueryResult,
    format: OutputFormat,
    sink: &dyn DiagnosticSink,
) -> Result<Vec<String>> {
    if format == OutputFormat::Json {
        return Ok(vec![chart::to_json(&result.to_json())?]);
    }

    let rendering = render(&result);
    if let Some(error) = rendering.error {
        sink.report(&Diagnostic::new("render", error));
    }
    Ok(rendering.lines)
}

fn series(
    title: &str,
    query: CatalogQuery,
    result: QueryResult,
    format: OutputFormat,
    sink: &dyn DiagnosticSink,
) -> Result<Vec<String>> {
    let series = match to_series(&result) {
        Ok(series) => series,
        Err(error) => {
            sink.report(&Diagnostic::new(query.name(), error));
            return Ok(Vec::new());
        }
    };

    match format {
        OutputFormat::Json => Ok(vec![chart::to_json(&series)?]),
        OutputFormat::Text => Ok(chart::series_lines(title, &series)),
    }
}

fn route_matrix(
    result: QueryResult,
    format: OutputFormat,
    sink: &dyn DiagnosticSink,
) -> Result<Vec<String>> {
    let matrix = match to_matrix(&result) {
        Ok(matrix) => matrix.sorted(),
        Err(error) => {
            sink.report(&Diagnostic::new(
                CatalogQuery::PercentageDelayedByRoute.name(),
                error,
            ));
            return Ok(Vec::new());
        }
    };

    match format {
        OutputFormat::Json => Ok(vec![chart::to_json(&matrix)?]),
        OutputFormat::Text => Ok(chart::matrix_lines(
            "Percentage of delayed flights by route",
            &matrix,
        )),
    }
}

/// One line per catalog query: name, parameters, columns and description.
pub fn catalog_lines() -> Vec<String> {
    CatalogQuery::ALL
        .iter()
        .map(|query| {
            let spec = query.spec();
            format!(
                "{}({}) -> [{}]  {}",
                spec.name,
                spec.params.join(", "),
                spec.columns.join(", "),
                spec.description
            )
        })
        .collect()
}
