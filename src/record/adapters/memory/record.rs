//! Record backed by an attribute map.

use crate::record::domain::RecordSchema;
use crate::record::ports::Record;
use crate::schema::domain::{Data, Value};

/// A record whose attributes live in an ordered map.
#[derive(Debug, Clone, PartialEq)]
pub struct DynamicRecord {
    schema: RecordSchema,
    values: Data,
}

impl DynamicRecord {
    /// Creates a record with no attributes set.
    #[must_use]
    pub fn new(schema: RecordSchema) -> Self {
        Self {
            schema,
            values: Data::new(),
        }
    }

    /// Sets an attribute.
    #[must_use]
    pub fn with(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.values.insert(name.into(), value.into());
        self
    }

    /// Returns every set attribute, including the primary key.
    #[must_use]
    pub const fn values(&self) -> &Data {
        &self.values
    }
}

impl Record for DynamicRecord {
    fn schema(&self) -> &RecordSchema {
        &self.schema
    }

    fn attribute(&self, name: &str) -> Option<Value> {
        self.values.get(name).cloned()
    }

    fn set_attribute(&mut self, name: &str, value: Value) {
        self.values.insert(name.to_owned(), value);
    }
}
