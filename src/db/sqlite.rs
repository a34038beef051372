//! SQLite store client implementation.
//!
//! Provides the `SqliteClient` struct that implements the `DatabaseClient` trait
//! for the flights database using sqlx.

use crate::config::DatabaseConfig;
use crate::db::{ColumnInfo, DatabaseClient, QueryResult, Row, Value};
use crate::error::{FlightError, Result};
use async_trait::async_trait;
use sqlx::query::Query;
use sqlx::sqlite::{Sqlite, SqliteArguments, SqlitePool, SqlitePoolOptions, SqliteRow};
use sqlx::{Column as SqlxColumn, Row as SqlxRow, TypeInfo, ValueRef};
use std::time::{Duration, Instant};
use tracing::debug;

/// How long to wait for the single pooled connection.
const ACQUIRE_TIMEOUT_SECS: u64 = 10;

/// SQLite store client.
///
/// Holds a pool capped at one connection, so every query reuses the
/// connection opened at construction.
#[derive(Debug)]
pub struct SqliteClient {
    pool: SqlitePool,
    query_timeout: Duration,
}

impl SqliteClient {
    /// Opens the database described by `config`.
    pub async fn connect(config: &DatabaseConfig) -> Result<Self> {
        let options = config.connect_options()?;

        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .min_connections(1)
            .acquire_timeout(Duration::from_secs(ACQUIRE_TIMEOUT_SECS))
            // The one connection lives until close().
            .idle_timeout(None)
            .max_lifetime(None)
            .connect_with(options)
            .await
            .map_err(|e| map_connection_error(e, config))?;

        debug!("Opened flights database at {}", config.display_string());
        Ok(Self {
            pool,
            query_timeout: config.query_timeout(),
        })
    }

    /// Replaces the per-query timeout taken from the config.
    pub fn with_query_timeout(mut self, query_timeout: Duration) -> Self {
        self.query_timeout = query_timeout;
        self
    }

    /// Runs the query inside a transaction scoped to this call.
    ///
    /// The transaction is rolled back explicitly on success; on any error the
    /// guard is dropped, which rolls it back as well.
    async fn fetch_in_transaction(&self, sql: &str, params: &[Value]) -> Result<Vec<SqliteRow>> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| FlightError::from_sqlx(&e))?;

        let query = params
            .iter()
            .fold(sqlx::query(sql), |query, value| bind_value(query, value));

        let rows = query
            .fetch_all(&mut *tx)
            .await
            .map_err(|e| FlightError::from_sqlx(&e))?;

        tx.rollback()
            .await
            .map_err(|e| FlightError::from_sqlx(&e))?;

        Ok(rows)
    }
}

#[async_trait]
impl DatabaseClient for SqliteClient {
    async fn fetch(&self, sql: &str, params: &[Value]) -> Result<QueryResult> {
        let start = Instant::now();

        let rows = tokio::time::timeout(self.query_timeout, self.fetch_in_transaction(sql, params))
            .await
            .map_err(|_| {
                FlightError::query(format!("Query timed out after {:?}", self.query_timeout))
            })??;

        let execution_time = start.elapsed();

        // SQLite only reports columns alongside a row; an empty result has none.
        let columns: Vec<ColumnInfo> = rows.first().map(column_info).unwrap_or_default();
        let rows: Vec<Row> = rows.iter().map(convert_row).collect();

        debug!("Fetched {} rows in {:?}", rows.len(), execution_time);
        Ok(QueryResult::with_data(columns, rows).with_execution_time(execution_time))
    }

    async fn close(&self) -> Result<()> {
        self.pool.close().await;
        Ok(())
    }
}

fn bind_value<'q>(
    query: Query<'q, Sqlite, SqliteArguments<'q>>,
    value: &Value,
) -> Query<'q, Sqlite, SqliteArguments<'q>> {
    match value {
        Value::Null => query.bind(None::<i64>),
        Value::Bool(b) => query.bind(*b),
        Value::Int(i) => query.bind(*i),
        Value::Float(f) => query.bind(*f),
        Value::String(s) => query.bind(s.clone()),
        Value::Bytes(b) => query.bind(b.clone()),
    }
}

/// Extracts column metadata, falling back to the first value's storage class
/// for expression columns that have no declared type.
fn column_info(row: &SqliteRow) -> Vec<ColumnInfo> {
    row.columns()
        .iter()
        .enumerate()
        .map(|(i, col)| {
            let declared = col.type_info();
            let data_type = if declared.is_null() {
                storage_class(row, i).unwrap_or_else(|| "NULL".to_string())
            } else {
                declared.name().to_string()
            };
            ColumnInfo::new(col.name(), data_type)
        })
        .collect()
}

/// Returns the runtime storage class of a value, or `None` for SQL NULL.
fn storage_class(row: &SqliteRow, index: usize) -> Option<String> {
    let raw = row.try_get_raw(index).ok()?;
    if raw.is_null() {
        return None;
    }
    Some(raw.type_info().name().to_uppercase())
}

/// Converts a sqlx SqliteRow to our Row type.
fn convert_row(row: &SqliteRow) -> Row {
    (0..row.len()).map(|i| convert_value(row, i)).collect()
}

/// Converts a single column value by its storage class rather than its
/// declared type, since SQLite columns may hold any class.
fn convert_value(row: &SqliteRow, index: usize) -> Value {
    let Some(storage) = storage_class(row, index) else {
        return Value::Null;
    };

    match storage.as_str() {
        "INTEGER" | "INT" | "INT8" | "BIGINT" => row
            .try_get_unchecked::<i64, _>(index)
            .map(Value::Int)
            .unwrap_or(Value::Null),

        "BOOLEAN" => row
            .try_get_unchecked::<bool, _>(index)
            .map(Value::Bool)
            .unwrap_or(Value::Null),

        "REAL" | "FLOAT" | "DOUBLE" | "NUMERIC" => row
            .try_get_unchecked::<f64, _>(index)
            .map(Value::Float)
            .unwrap_or(Value::Null),

        "BLOB" => row
            .try_get_unchecked::<Vec<u8>, _>(index)
            .map(Value::Bytes)
            .unwrap_or(Value::Null),

        // TEXT and date/time affinities
        _ => row
            .try_get_unchecked::<String, _>(index)
            .map(Value::String)
            .unwrap_or(Value::Null),
    }
}

/// Maps sqlx connection errors to user-friendly messages.
fn map_connection_error(error: sqlx::Error, config: &DatabaseConfig) -> FlightError {
    let location = config.display_string();
    let error_str = error.to_string().to_lowercase();

    if error_str.contains("unable to open database file") {
        FlightError::store_unavailable(format!(
            "Cannot open database at {location}. Check that the file exists and is readable."
        ))
    } else if error_str.contains("file is not a database") {
        FlightError::store_unavailable(format!("{location} is not a SQLite database."))
    } else if error_str.contains("timed out") || error_str.contains("timeout") {
        FlightError::store_unavailable(format!(
            "Timed out opening {location}. Another process may hold a lock on it."
        ))
    } else {
        FlightError::store_unavailable(error.to_string())
    }
}
