//! Cleaning hooks run after the per-field pass.

use crate::schema::domain::{Data, ValidationError, Value};

/// Per-field and cross-field cleaning applied to already-valid data.
///
/// Both methods default to passing data through unchanged, so implementors
/// override only what they need. `clean_field` runs for every field in the
/// clean output (in declaration order) and sees the coerced value. `clean`
/// runs once afterwards with the whole mapping and may rewrite it.
pub trait CleanHook: Send + Sync {
    /// Cleans a single field value.
    ///
    /// # Errors
    ///
    /// Returns a [`ValidationError`] to reject the value; it is reported under
    /// the field's name.
    fn clean_field(&self, _name: &str, value: Value) -> Result<Value, ValidationError> {
        Ok(value)
    }

    /// Cleans the full data mapping.
    ///
    /// # Errors
    ///
    /// Returns a [`ValidationError`] to reject the combination of values; it
    /// is reported under the reserved `__base__` key.
    fn clean(&self, data: Data) -> Result<Data, ValidationError> {
        Ok(data)
    }
}

/// Hook that leaves data untouched.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoClean;

impl CleanHook for NoClean {}
