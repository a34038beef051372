//! Catalog queries run through `FlightData` against the seeded database.

use flight_report::data::FlightData;
use flight_report::db::{QueryResult, Value};
use flight_report::query::{CatalogQuery, QueryParams};
use flight_report::report::{CategoryPercentage, FlightRecord, RoutePercentage};
use pretty_assertions::assert_eq;

use super::fixture::{create_database, open_seeded, SCHEMA};

fn flights(result: &QueryResult) -> Vec<FlightRecord> {
    result
        .records()
        .map(|record| FlightRecord::try_from(record).unwrap())
        .collect()
}

fn ids(result: &QueryResult) -> Vec<i64> {
    flights(result).iter().map(|f| f.id).collect()
}

#[tokio::test]
async fn test_flight_by_id() {
    let (data, sink, _dir) = open_seeded().await;

    let result = data.flight_by_id(1).await;

    assert_eq!(
        flights(&result),
        vec![FlightRecord {
            id: 1,
            origin_airport: "JFK".to_string(),
            destination_airport: "LAX".to_string(),
            airline: "Delta".to_string(),
            delay: 45,
        }]
    );
    assert!(sink.is_empty());
}

#[tokio::test]
async fn test_flight_by_id_miss_is_empty() {
    let (data, sink, _dir) = open_seeded().await;

    let result = data.flight_by_id(999).await;

    assert!(result.is_empty());
    assert!(sink.is_empty());
}

#[tokio::test]
async fn test_flight_columns_in_catalog_order() {
    let (data, _sink, _dir) = open_seeded().await;

    let result = data.flight_by_id(2).await;

    assert_eq!(
        result.column_names(),
        CatalogQuery::FlightById.spec().columns.to_vec()
    );
    assert_eq!(result.rows[0][4], Value::Int(0));
}

#[tokio::test]
async fn test_flights_by_date_ordered_by_id() {
    let (data, _sink, _dir) = open_seeded().await;

    assert_eq!(ids(&data.flights_by_date(1, 1, 2015).await), vec![1, 2, 6]);
    assert_eq!(ids(&data.flights_by_date(3, 1, 2015).await), vec![7, 8, 9]);
    assert!(data.flights_by_date(1, 1, 2016).await.is_empty());
}

#[tokio::test]
async fn test_null_delay_kept_by_date_lookup() {
    let (data, _sink, _dir) = open_seeded().await;

    let result = data.flights_by_date(3, 1, 2015).await;

    assert_eq!(result.rows[0][4], Value::Null);
    assert_eq!(flights(&result)[0].delay, 0);
}

#[tokio::test]
async fn test_delayed_by_airline_ordering() {
    let (data, _sink, _dir) = open_seeded().await;

    // Airline ascending, then delay descending, ties by ID.
    let result = data.delayed_flights_by_airline("").await;
    assert_eq!(ids(&result), vec![6, 1, 3, 4, 9]);

    let airlines: Vec<String> = flights(&result).into_iter().map(|f| f.airline).collect();
    let mut sorted = airlines.clone();
    sorted.sort();
    assert_eq!(airlines, sorted);
}

#[tokio::test]
async fn test_delayed_by_airline_is_case_and_space_insensitive() {
    let (data, _sink, _dir) = open_seeded().await;

    assert_eq!(ids(&data.delayed_flights_by_airline("delta").await), vec![1, 3]);
    assert_eq!(ids(&data.delayed_flights_by_airline("  DELTA ").await), vec![1, 3]);
    assert_eq!(
        ids(&data.delayed_flights_by_airline("Air Lines").await),
        vec![4, 9]
    );
}

#[tokio::test]
async fn test_delayed_by_airline_results_are_subset() {
    let (data, _sink, _dir) = open_seeded().await;
    let everything = ids(&data.delayed_flights_by_airline("").await);

    for term in ["air", "LINES", "alaska", "ta", "x"] {
        let result = data.delayed_flights_by_airline(term).await;
        for flight in flights(&result) {
            assert!(everything.contains(&flight.id), "{term}: {}", flight.id);
            assert!(flight.delay > 0);
            assert!(flight
                .airline
                .to_lowercase()
                .contains(&term.trim().to_lowercase()));
        }
    }
}

#[tokio::test]
async fn test_wildcards_in_search_are_literal() {
    let (data, sink, _dir) = open_seeded().await;

    assert!(data.delayed_flights_by_airline("%").await.is_empty());
    assert!(data.delayed_flights_by_airline("_").await.is_empty());
    assert!(data.delayed_flights_by_airport("%").await.is_empty());
    assert!(sink.is_empty());
}

#[tokio::test]
async fn test_delayed_by_airport() {
    let (data, _sink, _dir) = open_seeded().await;

    // Flight 2 leaves JFK on time and is left out.
    assert_eq!(ids(&data.delayed_flights_by_airport("JFK").await), vec![1, 9]);
    assert_eq!(ids(&data.delayed_flights_by_airport("jf").await), vec![1, 9]);
    assert!(data.delayed_flights_by_airport("BOS").await.is_empty());
}

#[tokio::test]
async fn test_percentage_by_airline() {
    let (data, _sink, _dir) = open_seeded().await;

    let rows: Vec<CategoryPercentage> = data
        .percentage_delayed_by_airline()
        .await
        .records()
        .map(|record| CategoryPercentage::try_from(record).unwrap())
        .collect();

    // Unrecorded Air has no recorded delays and is excluded.
    let categories: Vec<&str> = rows.iter().map(|r| r.category.as_str()).collect();
    assert_eq!(categories, vec!["Alaska Airlines", "Delta", "United Air Lines"]);

    assert_eq!(rows[0].percentage, 100.0);
    assert!((rows[1].percentage - 200.0 / 3.0).abs() < 1e-9);
    assert_eq!(rows[2].percentage, 100.0);

    for row in &rows {
        assert!((0.0..=100.0).contains(&row.percentage));
    }
}

#[tokio::test]
async fn test_percentage_by_hour() {
    let (data, _sink, _dir) = open_seeded().await;

    let rows: Vec<CategoryPercentage> = data
        .percentage_delayed_by_hour()
        .await
        .records()
        .map(|record| CategoryPercentage::try_from(record).unwrap())
        .collect();

    let pairs: Vec<(&str, f64)> = rows
        .iter()
        .map(|r| (r.category.as_str(), r.percentage))
        .collect();
    assert_eq!(pairs, vec![("5", 100.0), ("8", 50.0), ("17", 100.0)]);
}

#[tokio::test]
async fn test_percentage_by_route() {
    let (data, _sink, _dir) = open_seeded().await;

    let rows: Vec<(String, String, f64)> = data
        .percentage_delayed_by_route()
        .await
        .records()
        .map(|record| {
            let row = RoutePercentage::try_from(record).unwrap();
            (row.origin, row.destination, row.percentage)
        })
        .collect();

    let expected = [
        ("ATL", "JFK", 100.0),
        ("JFK", "LAX", 100.0),
        ("JFK", "SFO", 0.0),
        ("SEA", "ANC", 100.0),
        ("SFO", "JFK", 100.0),
    ];
    assert_eq!(
        rows,
        expected
            .iter()
            .map(|(o, d, p)| (o.to_string(), d.to_string(), *p))
            .collect::<Vec<_>>()
    );
}

#[tokio::test]
async fn test_execute_named_matches_convenience_call() {
    let (data, sink, _dir) = open_seeded().await;

    let params = QueryParams::new().with("search_airline", "%delta%");
    let named = data
        .execute_named("delayed_flights_by_airline", &params)
        .await;

    assert_eq!(ids(&named), vec![1, 3]);
    assert!(sink.is_empty());
}

#[tokio::test]
async fn test_airline_search_with_non_ascii_name() {
    let (_dir, config) = create_database(&[
        SCHEMA[0],
        SCHEMA[1],
        SCHEMA[2],
        "INSERT INTO airlines VALUES (60, 'ÉTOILE Air')",
        "INSERT INTO flights VALUES (1, 2015, 1, 1, 60, 'CDG', 'JFK', 900, 30)",
    ])
    .await;
    let data = FlightData::open(&config).await.unwrap();

    // ASCII letters fold; the accented capital must be typed as stored.
    for term in ["ÉTOILE", "Étoile air", "ÉTOILE AIR", "air"] {
        assert_eq!(ids(&data.delayed_flights_by_airline(term).await), vec![1], "{term}");
    }
    assert!(data.delayed_flights_by_airline("étoile").await.is_empty());
}
