//! Data access layer over the flights store.
//!
//! `FlightData` owns one store client for its whole life and runs catalog
//! queries against it. Failures never reach the caller: each one is reported
//! once through the injected `DiagnosticSink` and the call returns an empty
//! result instead.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use tracing::{debug, info};

use crate::config::DatabaseConfig;
use crate::db::{self, DatabaseClient, QueryResult};
use crate::diagnostics::{Diagnostic, DiagnosticSink, TracingSink};
use crate::error::{FlightError, Result};
use crate::query::{search_pattern, CatalogQuery, QueryParams};

/// Fail-soft access to the catalog queries.
pub struct FlightData {
    client: Box<dyn DatabaseClient>,
    sink: Arc<dyn DiagnosticSink>,
    closed: AtomicBool,
}

impl FlightData {
    /// Opens the configured store and logs diagnostics through `tracing`.
    ///
    /// This is the only call that returns a store error: without a store
    /// there is nothing to degrade to.
    pub async fn open(config: &DatabaseConfig) -> Result<Self> {
        let client = db::connect(config).await?;
        info!("Connected to {}", config.display_string());
        Ok(Self::new(client))
    }

    /// Wraps an already connected client.
    pub fn new(client: Box<dyn DatabaseClient>) -> Self {
        Self {
            client,
            sink: Arc::new(TracingSink),
            closed: AtomicBool::new(false),
        }
    }

    /// Replaces the diagnostic sink.
    pub fn with_sink(mut self, sink: Arc<dyn DiagnosticSink>) -> Self {
        self.sink = sink;
        self
    }

    /// Runs a catalog query. Any failure is reported once and yields an
    /// empty result.
    pub async fn execute(&self, query: CatalogQuery, params: &QueryParams) -> QueryResult {
        match self.try_execute(query, params).await {
            Ok(result) => result,
            Err(error) => {
                self.sink.report(&Diagnostic::new(query.name(), error));
                QueryResult::new()
            }
        }
    }

    /// Runs a catalog query looked up by name. Unknown names fail soft too.
    pub async fn execute_named(&self, name: &str, params: &QueryParams) -> QueryResult {
        match name.parse::<CatalogQuery>() {
            Ok(query) => self.execute(query, params).await,
            Err(error) => {
                self.sink.report(&Diagnostic::new(name, error));
                QueryResult::new()
            }
        }
    }

    async fn try_execute(&self, query: CatalogQuery, params: &QueryParams) -> Result<QueryResult> {
        if self.is_closed() {
            return Err(FlightError::store_unavailable(
                "the flights database has been closed",
            ));
        }

        let spec = query.spec();
        let (values, unused) = params.bind_order(spec)?;
        if !unused.is_empty() {
            debug!("Ignoring parameters {:?} not used by {}", unused, spec.name);
        }

        let result = self.client.fetch(spec.sql, &values).await?;

        if !result.is_empty() && result.column_names() != spec.columns {
            return Err(FlightError::query(format!(
                "{} returned columns {:?}, expected {:?}",
                spec.name,
                result.column_names(),
                spec.columns
            )));
        }

        debug!(
            "{} returned {} records in {:?}",
            spec.name, result.row_count, result.execution_time
        );
        Ok(result)
    }

    /// Looks up one flight. Returns zero or one record.
    pub async fn flight_by_id(&self, flight_id: i64) -> QueryResult {
        let params = QueryParams::new().with("flight_id", flight_id);
        self.execute(CatalogQuery::FlightById, &params).await
    }

    /// Lists every flight on a calendar date.
    pub async fn flights_by_date(&self, day: u32, month: u32, year: i32) -> QueryResult {
        let params = QueryParams::new()
            .with("day", day)
            .with("month", month)
            .with("year", year);
        self.execute(CatalogQuery::FlightsByDate, &params).await
    }

    /// Delayed flights whose airline name contains `search_airline`,
    /// ignoring case and surrounding whitespace.
    pub async fn delayed_flights_by_airline(&self, search_airline: &str) -> QueryResult {
        let params = QueryParams::new().with("search_airline", search_pattern(search_airline));
        self.execute(CatalogQuery::DelayedFlightsByAirline, &params)
            .await
    }

    /// Delayed flights whose origin airport code contains `iata`.
    pub async fn delayed_flights_by_airport(&self, iata: &str) -> QueryResult {
        let params = QueryParams::new().with("iata", search_pattern(iata));
        self.execute(CatalogQuery::DelayedFlightsByAirport, &params)
            .await
    }

    pub async fn percentage_delayed_by_airline(&self) -> QueryResult {
        self.execute(CatalogQuery::PercentageDelayedByAirline, &QueryParams::new())
            .await
    }

    pub async fn percentage_delayed_by_hour(&self) -> QueryResult {
        self.execute(CatalogQuery::PercentageDelayedByHour, &QueryParams::new())
            .await
    }

    pub async fn percentage_delayed_by_route(&self) -> QueryResult {
        self.execute(CatalogQuery::PercentageDelayedByRoute, &QueryParams::new())
            .await
    }

    /// Releases the store. Only the first call reaches the client; later
    /// calls, and any query issued afterwards, see a closed layer.
    pub async fn close(&self) -> Result<()> {
        if self.closed.swap(true, Ordering::SeqCst) {
            return Ok(());
        }
        debug!("Closing flights database");
        self.client.close().await
    }

    /// Check if the store has been released.
    pub fn is_closed(&self) -> bool {
        self.closed.load(Ordering::SeqCst)
    }
}
