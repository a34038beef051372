//! Presenter, shaper and commands over real query results.

use flight_report::cli::{Command, FlightDate, OutputFormat};
use flight_report::commands;
use flight_report::diagnostics::RecordingSink;
use flight_report::report::{render, to_matrix, to_series};
use pretty_assertions::assert_eq;

use super::fixture::{create_database, open_seeded, SCHEMA};

#[tokio::test]
async fn test_render_flight_by_id() {
    let (data, _sink, _dir) = open_seeded().await;

    let rendering = render(&data.flight_by_id(1).await);

    assert!(rendering.is_complete());
    assert_eq!(
        rendering.lines,
        vec!["Got 1 results.", "1. JFK -> LAX by Delta, Delay: 45 Minutes"]
    );
}

#[tokio::test]
async fn test_render_omits_zero_and_missing_delay() {
    let (data, _sink, _dir) = open_seeded().await;

    let on_time = render(&data.flight_by_id(2).await);
    let unrecorded = render(&data.flight_by_id(5).await);

    assert_eq!(on_time.lines[1], "2. JFK -> SFO by Delta");
    assert_eq!(unrecorded.lines[1], "5. ORD -> LAX by United Air Lines");
}

#[tokio::test]
async fn test_render_empty_result() {
    let (data, _sink, _dir) = open_seeded().await;

    let rendering = render(&data.flight_by_id(999).await);

    assert_eq!(rendering.lines, vec!["Got 0 results."]);
    assert!(rendering.is_complete());
}

#[tokio::test]
async fn test_text_delays_are_coerced() {
    let (_dir, config) = create_database(&[
        SCHEMA[0],
        SCHEMA[1],
        "CREATE TABLE flights (
            ID INTEGER PRIMARY KEY, YEAR INTEGER, MONTH INTEGER, DAY INTEGER,
            AIRLINE INTEGER, ORIGIN_AIRPORT TEXT, DESTINATION_AIRPORT TEXT,
            SCHEDULED_DEPARTURE INTEGER, AIRLINE_DELAY TEXT
        )",
        "INSERT INTO airlines VALUES (1, 'Delta')",
        "INSERT INTO flights VALUES
            (1, 2015, 1, 1, 1, 'JFK', 'LAX', 530, ''),
            (2, 2015, 1, 1, 1, 'JFK', 'BOS', 600, '12')",
    ])
    .await;
    let data = flight_report::data::FlightData::open(&config).await.unwrap();

    let rendering = render(&data.flights_by_date(1, 1, 2015).await);

    assert_eq!(
        rendering.lines,
        vec![
            "Got 2 results.",
            "1. JFK -> LAX by Delta",
            "2. JFK -> BOS by Delta, Delay: 12 Minutes",
        ]
    );
}

#[tokio::test]
async fn test_airline_series_pairs_positions() {
    let (data, _sink, _dir) = open_seeded().await;

    let series = to_series(&data.percentage_delayed_by_airline().await).unwrap();

    assert_eq!(series.len(), 3);
    assert_eq!(series.categories[1], "Delta");
    assert!((series.percentages[1] - 200.0 / 3.0).abs() < 1e-9);
}

#[tokio::test]
async fn test_route_matrix_from_store() {
    let (data, _sink, _dir) = open_seeded().await;

    let matrix = to_matrix(&data.percentage_delayed_by_route().await).unwrap();

    assert_eq!(matrix.origins, vec!["ATL", "JFK", "SEA", "SFO"]);
    assert_eq!(matrix.destinations, vec!["JFK", "LAX", "SFO", "ANC"]);
    assert_eq!(matrix.get("JFK", "LAX"), Some(100.0));
    assert_eq!(matrix.get("JFK", "SFO"), Some(0.0));
    // Routes nobody flies read as 0.
    assert_eq!(matrix.get("ATL", "LAX"), Some(0.0));
    assert_eq!(matrix.get("ORD", "LAX"), None);
}

#[tokio::test]
async fn test_date_command_end_to_end() {
    let (data, _store_sink, _dir) = open_seeded().await;
    let sink = RecordingSink::new();
    let command = Command::Date {
        date: FlightDate {
            day: 1,
            month: 1,
            year: 2015,
        },
    };

    let lines = commands::execute(&data, &command, OutputFormat::Text, &sink)
        .await
        .unwrap();

    assert_eq!(
        lines,
        vec![
            "Got 3 results.",
            "1. JFK -> LAX by Delta, Delay: 45 Minutes",
            "2. JFK -> SFO by Delta",
            "6. SEA -> ANC by Alaska Airlines, Delay: 10 Minutes",
        ]
    );
    assert!(sink.is_empty());
}

#[tokio::test]
async fn test_airline_command_json() {
    let (data, _store_sink, _dir) = open_seeded().await;
    let sink = RecordingSink::new();
    let command = Command::Airline {
        name: "delta".to_string(),
    };

    let lines = commands::execute(&data, &command, OutputFormat::Json, &sink)
        .await
        .unwrap();

    let json: serde_json::Value = serde_json::from_str(&lines[0]).unwrap();
    let records = json.as_array().unwrap();
    let ids: Vec<i64> = records
        .iter()
        .map(|record| record["ID"].as_i64().unwrap())
        .collect();
    assert_eq!(ids, vec![1, 3]);
    assert_eq!(records[0]["AIRLINE"], "Delta");
    assert_eq!(records[0]["DELAY"], 45);
}
