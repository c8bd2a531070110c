//! Validation bound to persisted records.
//!
//! A [`services::ModelValidator`] derives fields from a record's column
//! descriptors, fills absent input from the record's current attributes,
//! checks uniqueness and reference integrity through the
//! [`crate::schema::ports::RowLookup`] port and, when everything passes,
//! writes the clean values back onto the same record.
//!
//! - Domain types in [`domain`]
//! - Port contracts in [`ports`]
//! - Adapter implementations in [`adapters`]
//! - Services in [`services`]
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//! use fieldguard::record::adapters::memory::{DynamicRecord, InMemoryStore};
//! use fieldguard::record::domain::{ColumnDescriptor, RecordSchema};
//! use fieldguard::record::ports::Record;
//! use fieldguard::record::services::ModelValidator;
//! use fieldguard::schema::domain::{Data, Value};
//! use fieldguard::schema::services::Schema;
//!
//! let schema = RecordSchema::new("people")
//!     .column(ColumnDescriptor::new("id", "int").primary_key())
//!     .column(ColumnDescriptor::new("name", "varchar").not_null().max_length(20));
//! let store = Arc::new(InMemoryStore::new());
//! let mut person = DynamicRecord::new(schema);
//!
//! let mut data = Data::new();
//! data.insert("name".to_owned(), Value::from("Ada"));
//! let outcome = ModelValidator::new(&mut person, store, &Schema::new())
//!     .validate(&data)
//!     .expect("store is available");
//!
//! assert!(outcome.is_valid());
//! assert_eq!(person.attribute("name"), Some(Value::from("Ada")));
//! ```

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod services;

#[cfg(test)]
mod tests;
