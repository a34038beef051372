//! Error types for flight-report.
//!
//! Defines the error enum shared by the store boundary, the report layer and
//! the command surface.

use thiserror::Error;

/// Main error type for flight-report operations.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum FlightError {
    /// The store cannot be opened or used (missing file, closed pool, I/O).
    #[error("Store unavailable: {0}")]
    StoreUnavailable(String),

    /// The store rejected or failed a query (bad parameters, schema mismatch, timeout).
    #[error("Query error: {0}")]
    QueryExecution(String),

    /// A returned record lacks a required column or holds an unusable value.
    #[error("Malformed record: {0}")]
    MalformedRecord(String),

    /// Configuration errors (invalid config file, unsupported database URL, etc.)
    #[error("Configuration error: {0}")]
    Config(String),

    /// Internal application errors (unexpected states, bugs, etc.)
    #[error("Internal error: {0}")]
    Internal(String),
}

impl FlightError {
    /// Creates a store-unavailable error with the given message.
    pub fn store_unavailable(msg: impl Into<String>) -> Self {
        Self::StoreUnavailable(msg.into())
    }

    /// Creates a query execution error with the given message.
    pub fn query(msg: impl Into<String>) -> Self {
        Self::QueryExecution(msg.into())
    }

    /// Creates a malformed-record error with the given message.
    pub fn malformed(msg: impl Into<String>) -> Self {
        Self::MalformedRecord(msg.into())
    }

    /// Creates a configuration error with the given message.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Creates an internal error with the given message.
    pub fn internal(msg: impl Into<String>) -> Self {
        Self::Internal(msg.into())
    }

    /// Returns the error category as a string for display purposes.
    pub fn category(&self) -> &'static str {
        match self {
            Self::StoreUnavailable(_) => "Store Unavailable",
            Self::QueryExecution(_) => "Query Error",
            Self::MalformedRecord(_) => "Malformed Record",
            Self::Config(_) => "Configuration Error",
            Self::Internal(_) => "Internal Error",
        }
    }

    /// Classifies a sqlx error into the store-unavailable or query-failure bucket.
    pub fn from_sqlx(error: &sqlx::Error) -> Self {
        match error {
            sqlx::Error::Io(_)
            | sqlx::Error::Tls(_)
            | sqlx::Error::Configuration(_)
            | sqlx::Error::PoolTimedOut
            | sqlx::Error::PoolClosed
            | sqlx::Error::WorkerCrashed => Self::store_unavailable(error.to_string()),
            sqlx::Error::Database(db_error) => {
                let message = db_error.message().to_string();
                if message.contains("unable to open database file") {
                    Self::store_unavailable(message)
                } else {
                    Self::query(message)
                }
            }
            other => Self::query(other.to_string()),
        }
    }
}

/// Result type alias using FlightError.
pub type Result<T> = std::result::Result<T, FlightError>;
