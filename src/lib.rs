//! Fieldguard: field-level validation and coercion.
//!
//! This crate turns untrusted input (a mapping of field names to raw values)
//! into either clean, type-coerced data or a per-field report of error
//! messages. A second mode binds validation to a persisted record, deriving
//! fields from the record's columns and writing clean values back onto it.
//!
//! # Architecture
//!
//! Each subsystem follows hexagonal architecture principles:
//!
//! - **Domain**: pure value, field and rule types
//! - **Ports**: trait interfaces for row lookups, clean hooks and records
//! - **Adapters**: in-memory implementations of the ports
//!
//! # Modules
//!
//! - [`schema`]: fields, rules, messages and the validation engine
//! - [`record`]: record-bound validation

pub mod record;
pub mod schema;
