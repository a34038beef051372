//! The fixed set of report queries.
//!
//! Every query names its parameters in binding order (`params[0]` binds `?1`)
//! and declares the columns it returns.

use crate::error::{FlightError, Result};
use serde::Serialize;
use std::fmt;
use std::str::FromStr;

/// Columns returned by the point lookups and delayed-flight scans.
pub const FLIGHT_COLUMNS: &[&str] = &[
    "ID",
    "ORIGIN_AIRPORT",
    "DESTINATION_AIRPORT",
    "AIRLINE",
    "DELAY",
];

const FLIGHT_BY_ID_SQL: &str = r#"
SELECT
    flights.ID AS ID,
    flights.ORIGIN_AIRPORT AS ORIGIN_AIRPORT,
    flights.DESTINATION_AIRPORT AS DESTINATION_AIRPORT,
    airlines.AIRLINE AS AIRLINE,
    flights.AIRLINE_DELAY AS DELAY
FROM
    flights
    JOIN airlines ON flights.AIRLINE = airlines.ID
WHERE
    flights.ID = ?1
"#;

const FLIGHTS_BY_DATE_SQL: &str = r#"
SELECT
    flights.ID AS ID,
    flights.ORIGIN_AIRPORT AS ORIGIN_AIRPORT,
    flights.DESTINATION_AIRPORT AS DESTINATION_AIRPORT,
    airlines.AIRLINE AS AIRLINE,
    flights.AIRLINE_DELAY AS DELAY
FROM
    flights
    JOIN airlines ON flights.AIRLINE = airlines.ID
WHERE
    flights.DAY = ?1
    AND flights.MONTH = ?2
    AND flights.YEAR = ?3
ORDER BY flights.ID
"#;

const DELAYED_FLIGHTS_BY_AIRLINE_SQL: &str = r#"
SELECT
    flights.ID AS ID,
    flights.ORIGIN_AIRPORT AS ORIGIN_AIRPORT,
    flights.DESTINATION_AIRPORT AS DESTINATION_AIRPORT,
    airlines.AIRLINE AS AIRLINE,
    flights.AIRLINE_DELAY AS DELAY
FROM
    flights
    JOIN airlines ON flights.AIRLINE = airlines.ID
WHERE
    LOWER(airlines.AIRLINE) LIKE ?1 ESCAPE '\'
    AND CAST(flights.AIRLINE_DELAY AS INTEGER) > 0
ORDER BY
    airlines.AIRLINE ASC,
    CAST(flights.AIRLINE_DELAY AS INTEGER) DESC,
    flights.ID ASC
"#;

const DELAYED_FLIGHTS_BY_AIRPORT_SQL: &str = r#"
SELECT
    flights.ID AS ID,
    flights.ORIGIN_AIRPORT AS ORIGIN_AIRPORT,
    flights.DESTINATION_AIRPORT AS DESTINATION_AIRPORT,
    airlines.AIRLINE AS AIRLINE,
    flights.AIRLINE_DELAY AS DELAY
FROM
    flights
    JOIN airlines ON flights.AIRLINE = airlines.ID
WHERE
    LOWER(flights.ORIGIN_AIRPORT) LIKE ?1 ESCAPE '\'
    AND CAST(flights.AIRLINE_DELAY AS INTEGER) > 0
ORDER BY
    CAST(flights.AIRLINE_DELAY AS INTEGER) DESC,
    flights.ID ASC
"#;

// Percentages divide by COUNT(AIRLINE_DELAY), which skips NULLs. Groups with
// no recorded delay at all are dropped by HAVING, so the divisor is never 0.

const PERCENTAGE_DELAYED_BY_AIRLINE_SQL: &str = r#"
SELECT
    airlines.AIRLINE AS AIRLINE,
    SUM(CASE WHEN CAST(flights.AIRLINE_DELAY AS INTEGER) > 0 THEN 1 ELSE 0 END) * 100.0
        / COUNT(flights.AIRLINE_DELAY) AS PERCENTAGE_DELAYED
FROM
    flights
    JOIN airlines ON flights.AIRLINE = airlines.ID
GROUP BY airlines.AIRLINE
HAVING COUNT(flights.AIRLINE_DELAY) > 0
ORDER BY airlines.AIRLINE ASC
"#;

const PERCENTAGE_DELAYED_BY_HOUR_SQL: &str = r#"
SELECT
    CAST(flights.SCHEDULED_DEPARTURE / 100 AS INTEGER) AS HOUR,
    SUM(CASE WHEN CAST(flights.AIRLINE_DELAY AS INTEGER) > 0 THEN 1 ELSE 0 END) * 100.0
        / COUNT(flights.AIRLINE_DELAY) AS PERCENTAGE_DELAYED
FROM
    flights
WHERE
    flights.SCHEDULED_DEPARTURE IS NOT NULL
GROUP BY HOUR
HAVING COUNT(flights.AIRLINE_DELAY) > 0
ORDER BY HOUR ASC
"#;

const PERCENTAGE_DELAYED_BY_ROUTE_SQL: &str = r#"
SELECT
    flights.ORIGIN_AIRPORT AS ORIGIN_AIRPORT,
    flights.DESTINATION_AIRPORT AS DESTINATION_AIRPORT,
    SUM(CASE WHEN CAST(flights.AIRLINE_DELAY AS INTEGER) > 0 THEN 1 ELSE 0 END) * 100.0
        / COUNT(flights.AIRLINE_DELAY) AS PERCENTAGE_DELAYED
FROM
    flights
GROUP BY flights.ORIGIN_AIRPORT, flights.DESTINATION_AIRPORT
HAVING COUNT(flights.AIRLINE_DELAY) > 0
ORDER BY flights.ORIGIN_AIRPORT ASC, flights.DESTINATION_AIRPORT ASC
"#;

/// Static description of a catalog query.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct QuerySpec {
    /// Catalog name, e.g. `flight_by_id`.
    pub name: &'static str,
    /// One-line description for listings.
    pub description: &'static str,
    /// SQL text with numbered placeholders.
    #[serde(skip)]
    pub sql: &'static str,
    /// Parameter names in binding order.
    pub params: &'static [&'static str],
    /// Columns every returned record carries.
    pub columns: &'static [&'static str],
}

/// One of the fixed report queries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CatalogQuery {
    FlightById,
    FlightsByDate,
    DelayedFlightsByAirline,
    DelayedFlightsByAirport,
    PercentageDelayedByAirline,
    PercentageDelayedByHour,
    PercentageDelayedByRoute,
}

impl CatalogQuery {
    /// Every catalog query, in menu order.
    pub const ALL: [CatalogQuery; 7] = [
        Self::FlightById,
        Self::FlightsByDate,
        Self::DelayedFlightsByAirline,
        Self::DelayedFlightsByAirport,
        Self::PercentageDelayedByAirline,
        Self::PercentageDelayedByHour,
        Self::PercentageDelayedByRoute,
    ];

    /// Returns the static description of this query.
    pub fn spec(&self) -> &'static QuerySpec {
        match self {
            Self::FlightById => &QuerySpec {
                name: "flight_by_id",
                description: "Show flight by ID",
                sql: FLIGHT_BY_ID_SQL,
                params: &["flight_id"],
                columns: FLIGHT_COLUMNS,
            },
            Self::FlightsByDate => &QuerySpec {
                name: "flights_by_date",
                description: "Show flights by date",
                sql: FLIGHTS_BY_DATE_SQL,
                params: &["day", "month", "year"],
                columns: FLIGHT_COLUMNS,
            },
            Self::DelayedFlightsByAirline => &QuerySpec {
                name: "delayed_flights_by_airline",
                description: "Delayed flights by airline",
                sql: DELAYED_FLIGHTS_BY_AIRLINE_SQL,
                params: &["search_airline"],
                columns: FLIGHT_COLUMNS,
            },
            Self::DelayedFlightsByAirport => &QuerySpec {
                name: "delayed_flights_by_airport",
                description: "Delayed flights by origin airport",
                sql: DELAYED_FLIGHTS_BY_AIRPORT_SQL,
                params: &["iata"],
                columns: FLIGHT_COLUMNS,
            },
            Self::PercentageDelayedByAirline => &QuerySpec {
                name: "percentage_delayed_by_airline",
                description: "Percentage of delayed flights by airline",
                sql: PERCENTAGE_DELAYED_BY_AIRLINE_SQL,
                params: &[],
                columns: &["AIRLINE", "PERCENTAGE_DELAYED"],
            },
            Self::PercentageDelayedByHour => &QuerySpec {
                name: "percentage_delayed_by_hour",
                description: "Percentage of delayed flights by hour of day",
                sql: PERCENTAGE_DELAYED_BY_HOUR_SQL,
                params: &[],
                columns: &["HOUR", "PERCENTAGE_DELAYED"],
            },
            Self::PercentageDelayedByRoute => &QuerySpec {
                name: "percentage_delayed_by_route",
                description: "Percentage of delayed flights by origin/destination pair",
                sql: PERCENTAGE_DELAYED_BY_ROUTE_SQL,
                params: &[],
                columns: &["ORIGIN_AIRPORT", "DESTINATION_AIRPORT", "PERCENTAGE_DELAYED"],
            },
        }
    }

    /// Catalog name of this query.
    pub fn name(&self) -> &'static str {
        self.spec().name
    }
}

impl fmt::Display for CatalogQuery {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for CatalogQuery {
    type Err = FlightError;

    fn from_str(s: &str) -> Result<Self> {
        let wanted = s.trim().to_lowercase();
        Self::ALL
            .into_iter()
            .find(|q| q.name() == wanted)
            .ok_or_else(|| FlightError::query(format!("Unknown catalog query '{s}'")))
    }
}
