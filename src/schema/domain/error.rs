//! Error types for field validation, coercion and store lookups.

use super::Value;
use indexmap::IndexMap;
use thiserror::Error;

/// A recoverable field-level failure.
///
/// The `key` selects a message template and the `params` fill its
/// placeholders. Validation errors never abort a validation run; the engine
/// resolves them into messages.
#[derive(Debug, Clone, Error, PartialEq)]
#[error("validation failed with key '{key}'")]
pub struct ValidationError {
    key: String,
    params: IndexMap<String, Value>,
}

impl ValidationError {
    /// Creates an error with the given message key and no params.
    pub fn new(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            params: IndexMap::new(),
        }
    }

    /// Adds a template param.
    #[must_use]
    pub fn with_param(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.params.insert(name.into(), value.into());
        self
    }

    /// Returns the message key.
    #[must_use]
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Returns the template params.
    #[must_use]
    pub const fn params(&self) -> &IndexMap<String, Value> {
        &self.params
    }

    /// Returns a single template param.
    #[must_use]
    pub fn param(&self, name: &str) -> Option<&Value> {
        self.params.get(name)
    }
}

/// A failed type conversion of a raw value.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("cannot coerce value ({key}): {detail}")]
pub struct CoercionError {
    /// Message key identifying the target kind, for example `coerce_int`.
    pub key: &'static str,
    /// Description of the parser failure.
    pub detail: String,
}

impl CoercionError {
    /// Creates a coercion error.
    pub fn new(key: &'static str, detail: impl Into<String>) -> Self {
        Self {
            key,
            detail: detail.into(),
        }
    }
}

impl From<CoercionError> for ValidationError {
    fn from(err: CoercionError) -> Self {
        Self::new(err.key).with_param("detail", err.detail)
    }
}

/// Faults raised by the row store behind uniqueness and reference checks.
///
/// Lookup errors are not validation failures; they abort the validation run.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum LookupError {
    /// The store cannot be reached.
    #[error("row store unavailable: {0}")]
    Unavailable(String),

    /// The queried table does not exist.
    #[error("unknown table '{0}'")]
    UnknownTable(String),

    /// The store rejected or failed the query.
    #[error("lookup against '{table}' failed: {message}")]
    Query {
        /// Table that was queried.
        table: String,
        /// Store-provided failure description.
        message: String,
    },
}

/// Result type for engine operations that may hit the row store.
pub type EngineResult<T> = Result<T, LookupError>;

/// Outcome of a failed rule check.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum CheckError {
    /// The value failed the rule.
    #[error(transparent)]
    Invalid(#[from] ValidationError),

    /// The rule could not be evaluated.
    #[error(transparent)]
    Lookup(#[from] LookupError),
}

impl From<CoercionError> for CheckError {
    fn from(err: CoercionError) -> Self {
        Self::Invalid(err.into())
    }
}

/// Errors raised while loading validator options.
#[derive(Debug, Error)]
pub enum OptionsError {
    /// The options document is not valid JSON for the options shape.
    #[error("invalid validator options: {0}")]
    Malformed(#[from] serde_json::Error),
}

/// Errors raised while declaring fields and rules.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum SchemaDefinitionError {
    /// A pattern rule was given an invalid regular expression.
    #[error("invalid pattern '{pattern}': {message}")]
    InvalidPattern {
        /// The rejected pattern.
        pattern: String,
        /// Compiler diagnostic.
        message: String,
    },
}
