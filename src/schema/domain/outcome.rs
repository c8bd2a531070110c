//! Result of a validation run.

use super::Data;
use indexmap::IndexMap;
use serde::Serialize;

/// Error key reserved for failures of the cross-field clean hook.
pub const BASE_ERROR_KEY: &str = "__base__";

/// Clean data and resolved error messages of one validation run.
///
/// A processed field appears in at most one of the two maps. Optional fields
/// with no input, no bound value and no default appear in neither.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ValidationOutcome {
    data: Data,
    errors: IndexMap<String, String>,
}

impl ValidationOutcome {
    /// Creates an outcome from its parts.
    #[must_use]
    pub const fn new(data: Data, errors: IndexMap<String, String>) -> Self {
        Self { data, errors }
    }

    /// Returns `true` when no errors were recorded.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    /// Returns the clean data.
    #[must_use]
    pub const fn data(&self) -> &Data {
        &self.data
    }

    /// Returns the error messages by field name.
    #[must_use]
    pub const fn errors(&self) -> &IndexMap<String, String> {
        &self.errors
    }

    /// Returns the message recorded for `field`.
    #[must_use]
    pub fn error(&self, field: &str) -> Option<&str> {
        self.errors.get(field).map(String::as_str)
    }

    /// Splits the outcome into clean data and errors.
    #[must_use]
    pub fn into_parts(self) -> (Data, IndexMap<String, String>) {
        (self.data, self.errors)
    }
}
