//! In-memory row store.

use crate::schema::domain::{Data, LookupError, Value};
use crate::schema::ports::{LookupQuery, RowLookup};
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

/// Thread-safe in-memory row store keyed by table name.
///
/// Column matching is lenient: numbers compare across numeric kinds and
/// numeric text matches the number it spells.
#[derive(Debug, Clone, Default)]
pub struct InMemoryStore {
    state: Arc<RwLock<HashMap<String, Vec<Data>>>>,
}

impl InMemoryStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates `table` when it does not exist yet.
    ///
    /// # Errors
    ///
    /// Returns [`LookupError::Unavailable`] when the store lock is poisoned.
    pub fn create_table(&self, table: &str) -> Result<(), LookupError> {
        let mut state = self
            .state
            .write()
            .map_err(|err| LookupError::Unavailable(err.to_string()))?;
        state.entry(table.to_owned()).or_default();
        Ok(())
    }

    /// Appends a row to `table`, creating the table when needed.
    ///
    /// # Errors
    ///
    /// Returns [`LookupError::Unavailable`] when the store lock is poisoned.
    pub fn insert(&self, table: &str, row: Data) -> Result<(), LookupError> {
        let mut state = self
            .state
            .write()
            .map_err(|err| LookupError::Unavailable(err.to_string()))?;
        state.entry(table.to_owned()).or_default().push(row);
        Ok(())
    }

    /// Returns a copy of every row in `table`.
    ///
    /// # Errors
    ///
    /// Returns [`LookupError::UnknownTable`] when the table does not exist and
    /// [`LookupError::Unavailable`] when the store lock is poisoned.
    pub fn rows(&self, table: &str) -> Result<Vec<Data>, LookupError> {
        let state = self
            .state
            .read()
            .map_err(|err| LookupError::Unavailable(err.to_string()))?;
        state
            .get(table)
            .cloned()
            .ok_or_else(|| LookupError::UnknownTable(table.to_owned()))
    }
}

impl RowLookup for InMemoryStore {
    fn count(&self, query: &LookupQuery) -> Result<usize, LookupError> {
        let state = self
            .state
            .read()
            .map_err(|err| LookupError::Unavailable(err.to_string()))?;
        let rows = state
            .get(&query.table)
            .ok_or_else(|| LookupError::UnknownTable(query.table.clone()))?;
        Ok(rows.iter().filter(|row| row_matches(row, query)).count())
    }
}

fn row_matches(row: &Data, query: &LookupQuery) -> bool {
    let included = query
        .filters
        .iter()
        .all(|(column, wanted)| row.get(column).is_some_and(|stored| loose_eq(stored, wanted)));
    let excluded = query.exclude.as_ref().is_some_and(|(column, value)| {
        row.get(column).is_some_and(|stored| loose_eq(stored, value))
    });
    included && !excluded
}

fn loose_eq(stored: &Value, wanted: &Value) -> bool {
    if stored.same_as(wanted) {
        return true;
    }
    match (stored, wanted) {
        (Value::Str(text), number @ (Value::Int(_) | Value::Float(_) | Value::Decimal(_)))
        | (number @ (Value::Int(_) | Value::Float(_) | Value::Decimal(_)), Value::Str(text)) => {
            text.trim() == number.to_string()
        }
        _ => false,
    }
}
