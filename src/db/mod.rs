//! Store boundary for flight-report.
//!
//! Provides a trait-based interface over the flights store so the data access
//! layer can run against SQLite or against test doubles interchangeably.

mod mock;
mod sqlite;
mod types;

pub use mock::{FailingDatabaseClient, MockDatabaseClient, RecordedCall};
pub use sqlite::SqliteClient;
pub use types::{ColumnInfo, QueryResult, Record, Row, Value};

use crate::config::DatabaseConfig;
use crate::error::Result;
use async_trait::async_trait;

/// Opens the configured store.
///
/// This is the central factory function for store connections.
pub async fn connect(config: &DatabaseConfig) -> Result<Box<dyn DatabaseClient>> {
    let client = SqliteClient::connect(config).await?;
    Ok(Box::new(client))
}

/// Trait defining the interface for store clients.
///
/// Parameters are bound positionally: `params[0]` binds `?1`, and so on.
#[async_trait]
pub trait DatabaseClient: Send + Sync {
    /// Executes a read query with bound parameters and returns every row.
    async fn fetch(&self, sql: &str, params: &[Value]) -> Result<QueryResult>;

    /// Releases the underlying connection.
    async fn close(&self) -> Result<()>;
}

#[async_trait]
impl<T: DatabaseClient + ?Sized> DatabaseClient for std::sync::Arc<T> {
    async fn fetch(&self, sql: &str, params: &[Value]) -> Result<QueryResult> {
        (**self).fetch(sql, params).await
    }

    async fn close(&self) -> Result<()> {
        (**self).close().await
    }
}
