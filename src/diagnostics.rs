//! Diagnostics emitted when an operation degrades instead of failing.
//!
//! The data access layer never hands store errors to its caller; it reports
//! them here and returns an empty result.

use crate::error::FlightError;
use std::sync::Mutex;
use tracing::error;

/// A failure that was absorbed by a fail-soft operation.
#[derive(Debug, Clone, PartialEq)]
pub struct Diagnostic {
    /// Catalog query or report step that failed.
    pub operation: String,
    pub error: FlightError,
}

impl Diagnostic {
    pub fn new(operation: impl Into<String>, error: FlightError) -> Self {
        Self {
            operation: operation.into(),
            error,
        }
    }
}

/// Receives diagnostics.
pub trait DiagnosticSink: Send + Sync {
    fn report(&self, diagnostic: &Diagnostic);
}

/// Logs diagnostics through `tracing` at error level.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingSink;

impl DiagnosticSink for TracingSink {
    fn report(&self, diagnostic: &Diagnostic) {
        error!(
            operation = %diagnostic.operation,
            category = diagnostic.error.category(),
            "{}",
            diagnostic.error
        );
    }
}

/// Keeps every diagnostic in memory. Used by tests and by callers that want
/// to show failures inline.
#[derive(Debug, Default)]
pub struct RecordingSink {
    entries: Mutex<Vec<Diagnostic>>,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Diagnostics reported so far, oldest first.
    pub fn diagnostics(&self) -> Vec<Diagnostic> {
        self.entries
            .lock()
            .map(|entries| entries.clone())
            .unwrap_or_default()
    }

    pub fn len(&self) -> usize {
        self.entries.lock().map(|e| e.len()).unwrap_or_default()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl DiagnosticSink for RecordingSink {
    fn report(&self, diagnostic: &Diagnostic) {
        if let Ok(mut entries) = self.entries.lock() {
            entries.push(diagnostic.clone());
        }
    }
}
