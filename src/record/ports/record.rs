//! Attribute access to a persisted record.

use crate::record::domain::RecordSchema;
use crate::schema::domain::{Data, Value};

/// A persisted record whose attributes can be read and written by name.
pub trait Record {
    /// Returns the record's table description.
    fn schema(&self) -> &RecordSchema;

    /// Returns the current value of an attribute, or `None` when it was never
    /// set.
    fn attribute(&self, name: &str) -> Option<Value>;

    /// Writes an attribute.
    fn set_attribute(&mut self, name: &str, value: Value);

    /// Returns the primary key value when the record has been persisted.
    fn primary_key(&self) -> Option<Value> {
        let column = self.schema().primary_key()?;
        self.attribute(&column.name).filter(|value| !value.is_null())
    }

    /// Returns the set attributes of every non-key column.
    fn attributes(&self) -> Data {
        self.schema()
            .columns()
            .iter()
            .filter(|column| !column.primary_key)
            .filter_map(|column| {
                self.attribute(&column.name)
                    .map(|value| (column.name.clone(), value))
            })
            .collect()
    }

    /// Writes every entry of `data` onto the record.
    fn assign(&mut self, data: &Data) {
        for (name, value) in data {
            self.set_attribute(name, value.clone());
        }
    }
}
