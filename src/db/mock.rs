//! Mock store clients for testing.
//!
//! `MockDatabaseClient` answers with canned results and records every call;
//! `FailingDatabaseClient` fails every call as an unreachable store would.

use super::{DatabaseClient, QueryResult, Value};
use crate::error::{FlightError, Result};
use async_trait::async_trait;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

/// A call observed by `MockDatabaseClient`.
#[derive(Debug, Clone, PartialEq)]
pub struct RecordedCall {
    pub sql: String,
    pub params: Vec<Value>,
}

/// A mock store client that returns predefined results.
///
/// Responses are matched by SQL substring, first match wins. SQL that matches
/// nothing returns an empty result.
#[derive(Default)]
pub struct MockDatabaseClient {
    responses: Vec<(String, Result<QueryResult>)>,
    calls: Mutex<Vec<RecordedCall>>,
    closes: AtomicUsize,
}

impl MockDatabaseClient {
    /// Creates a mock client with no canned responses.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns `result` for any SQL containing `sql_fragment`.
    pub fn with_response(mut self, sql_fragment: impl Into<String>, result: QueryResult) -> Self {
        self.responses.push((sql_fragment.into(), Ok(result)));
        self
    }

    /// Fails any SQL containing `sql_fragment` with `error`.
    pub fn with_error(mut self, sql_fragment: impl Into<String>, error: FlightError) -> Self {
        self.responses.push((sql_fragment.into(), Err(error)));
        self
    }

    /// Calls seen so far, in order.
    pub fn calls(&self) -> Vec<RecordedCall> {
        self.calls
            .lock()
            .map(|calls| calls.clone())
            .unwrap_or_default()
    }

    /// Number of times `close` was called.
    pub fn close_count(&self) -> usize {
        self.closes.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl DatabaseClient for MockDatabaseClient {
    async fn fetch(&self, sql: &str, params: &[Value]) -> Result<QueryResult> {
        if let Ok(mut calls) = self.calls.lock() {
            calls.push(RecordedCall {
                sql: sql.to_string(),
                params: params.to_vec(),
            });
        }

        self.responses
            .iter()
            .find(|(fragment, _)| sql.contains(fragment.as_str()))
            .map(|(_, response)| response.clone())
            .unwrap_or_else(|| Ok(QueryResult::new()))
    }

    async fn close(&self) -> Result<()> {
        self.closes.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}

/// A store client whose every query fails with `StoreUnavailable`.
#[derive(Debug, Default)]
pub struct FailingDatabaseClient {
    attempts: AtomicUsize,
}

impl FailingDatabaseClient {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of queries attempted against this client.
    pub fn attempts(&self) -> usize {
        self.attempts.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl DatabaseClient for FailingDatabaseClient {
    async fn fetch(&self, _sql: &str, _params: &[Value]) -> Result<QueryResult> {
        self.attempts.fetch_add(1, Ordering::SeqCst);
        Err(FlightError::store_unavailable("connection refused"))
    }

    async fn close(&self) -> Result<()> {
        Ok(())
    }
}
