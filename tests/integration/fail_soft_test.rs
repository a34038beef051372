//! Store failures degrade to empty results and exactly one diagnostic.

use std::sync::Arc;

use flight_report::config::DatabaseConfig;
use flight_report::data::FlightData;
use flight_report::diagnostics::RecordingSink;
use flight_report::error::FlightError;
use flight_report::query::CatalogQuery;

use super::fixture::{create_database, open_seeded};

async fn run_every_query(data: &FlightData) -> usize {
    let results = [
        data.flight_by_id(1).await,
        data.flights_by_date(1, 1, 2015).await,
        data.delayed_flights_by_airline("delta").await,
        data.delayed_flights_by_airport("JFK").await,
        data.percentage_delayed_by_airline().await,
        data.percentage_delayed_by_hour().await,
        data.percentage_delayed_by_route().await,
    ];
    assert!(results.iter().all(|r| r.is_empty()));
    results.len()
}

#[tokio::test]
async fn test_missing_tables_fail_soft() {
    let (_dir, config) = create_database(&["CREATE TABLE unrelated (ID INTEGER)"]).await;
    let sink = Arc::new(RecordingSink::new());
    let data = FlightData::open(&config)
        .await
        .unwrap()
        .with_sink(sink.clone());

    let calls = run_every_query(&data).await;

    let diagnostics = sink.diagnostics();
    assert_eq!(calls, CatalogQuery::ALL.len());
    assert_eq!(diagnostics.len(), calls);
    for (diagnostic, query) in diagnostics.iter().zip(CatalogQuery::ALL) {
        assert_eq!(diagnostic.operation, query.name());
        assert!(matches!(diagnostic.error, FlightError::QueryExecution(_)));
    }
}

#[tokio::test]
async fn test_layer_recovers_after_failed_query() {
    let (data, sink, _dir) = open_seeded().await;

    assert!(data
        .execute_named("no_such_query", &Default::default())
        .await
        .is_empty());
    assert_eq!(data.flight_by_id(1).await.len(), 1);
    assert_eq!(sink.len(), 1);
}

#[tokio::test]
async fn test_queries_after_close_fail_soft() {
    let (data, sink, _dir) = open_seeded().await;

    data.close().await.unwrap();
    data.close().await.unwrap();
    assert!(data.is_closed());

    let calls = run_every_query(&data).await;

    let diagnostics = sink.diagnostics();
    assert_eq!(diagnostics.len(), calls);
    assert!(diagnostics
        .iter()
        .all(|d| matches!(d.error, FlightError::StoreUnavailable(_))));
}

#[tokio::test]
async fn test_open_missing_file_is_store_unavailable() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("absent.sqlite3");
    let config = DatabaseConfig::with_url(format!("sqlite:///{}", path.display()));

    let error = FlightData::open(&config).await.err().unwrap();

    assert!(matches!(error, FlightError::StoreUnavailable(_)));
    // Opening is read-only and must not create the file.
    assert!(!path.exists());
}

#[tokio::test]
async fn test_store_is_read_only() {
    let (_dir, config) = create_database(&["CREATE TABLE flights (ID INTEGER)"]).await;
    let client = flight_report::db::connect(&config).await.unwrap();

    let error = client
        .fetch("INSERT INTO flights (ID) VALUES (?1)", &[1i64.into()])
        .await
        .unwrap_err();

    assert!(matches!(error, FlightError::QueryExecution(_)));
}
