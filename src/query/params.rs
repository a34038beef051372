//! Named query parameters.

use crate::db::Value;
use crate::error::{FlightError, Result};
use std::collections::BTreeMap;

use super::catalog::QuerySpec;

/// Parameter values keyed by name.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct QueryParams {
    values: BTreeMap<String, Value>,
}

impl QueryParams {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds or replaces a named value.
    pub fn with(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.values.insert(name.into(), value.into());
        self
    }

    /// Orders the values the way `spec` binds them.
    ///
    /// Fails if a declared parameter is missing. Names the query does not
    /// declare are returned separately so the caller can report them.
    pub fn bind_order(&self, spec: &QuerySpec) -> Result<(Vec<Value>, Vec<String>)> {
        let ordered = spec
            .params
            .iter()
            .map(|name| {
                self.values.get(*name).cloned().ok_or_else(|| {
                    FlightError::query(format!(
                        "Missing parameter '{name}' for query {}",
                        spec.name
                    ))
                })
            })
            .collect::<Result<Vec<_>>>()?;

        let unused = self
            .values
            .keys()
            .filter(|name| !spec.params.contains(&name.as_str()))
            .cloned()
            .collect();

        Ok((ordered, unused))
    }
}

/// Turns free text into a LIKE pattern matching it as a case-insensitive
/// substring: trimmed, lower-cased, with `%`, `_` and `\` escaped for
/// `ESCAPE '\'`, then wrapped in `%`.
///
/// Only ASCII letters are folded, the same as SQLite's `LOWER()` on the
/// column side, so a term typed as stored always matches.
pub fn search_pattern(term: &str) -> String {
    let mut pattern = String::with_capacity(term.len() + 2);
    pattern.push('%');
    for c in term.trim().to_ascii_lowercase().chars() {
        if matches!(c, '%' | '_' | '\\') {
            pattern.push('\\');
        }
        pattern.push(c);
    }
    pattern.push('%');
    pattern
}
