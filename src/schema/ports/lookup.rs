//! Row-lookup port backing uniqueness and reference-integrity rules.

use crate::schema::domain::{LookupError, Value};

/// A counting query against one table of the row store.
///
/// Every filter must match (conjunction). When `exclude` is set, rows whose
/// column equals the given value are left out of the count; the record
/// adapter uses this to ignore the record being validated.
#[derive(Debug, Clone, PartialEq)]
pub struct LookupQuery {
    /// Table to query.
    pub table: String,
    /// Column/value pairs that must all match.
    pub filters: Vec<(String, Value)>,
    /// Column/value pair identifying rows to ignore.
    pub exclude: Option<(String, Value)>,
}

impl LookupQuery {
    /// Creates a query with no filters against `table`.
    pub fn new(table: impl Into<String>) -> Self {
        Self {
            table: table.into(),
            filters: Vec::new(),
            exclude: None,
        }
    }

    /// Adds an equality filter.
    #[must_use]
    pub fn filter(mut self, column: impl Into<String>, value: Value) -> Self {
        self.filters.push((column.into(), value));
        self
    }

    /// Ignores rows whose `column` equals `value`.
    #[must_use]
    pub fn excluding(mut self, column: impl Into<String>, value: Value) -> Self {
        self.exclude = Some((column.into(), value));
        self
    }
}

/// Read-only access to persisted rows.
pub trait RowLookup: Send + Sync {
    /// Counts rows matching the query.
    ///
    /// # Errors
    ///
    /// Returns [`LookupError`] when the store cannot answer the query.
    fn count(&self, query: &LookupQuery) -> Result<usize, LookupError>;

    /// Returns `true` when at least one row matches the query.
    ///
    /// # Errors
    ///
    /// Returns [`LookupError`] when the store cannot answer the query.
    fn exists(&self, query: &LookupQuery) -> Result<bool, LookupError> {
        Ok(self.count(query)? > 0)
    }
}
