//! Field-level validation and coercion.
//!
//! A [`services::Schema`] declares named [`domain::Field`]s, each with a
//! coercion kind, an optional default and an ordered chain of
//! [`domain::Rule`]s. A [`services::Validator`] built from the schema turns
//! untrusted input into clean, typed data or per-field error messages.
//!
//! # Architecture
//!
//! - **Domain**: values, fields, rules, messages and outcomes
//! - **Ports**: [`ports::RowLookup`] for store-backed rules and
//!   [`ports::CleanHook`] for post-validation cleaning
//! - **Services**: the schema builder and the engine
//!
//! # Example
//!
//! ```
//! use fieldguard::schema::domain::{Data, Field, Value};
//! use fieldguard::schema::services::{Schema, Validator};
//!
//! let schema = Schema::new()
//!     .field("email", Field::string().required())
//!     .message("email.required", "We need your email.");
//! let validator = Validator::new(&schema);
//!
//! let outcome = validator.validate(&Data::new()).expect("no store is involved");
//! assert_eq!(outcome.error("email"), Some("We need your email."));
//! ```

pub mod domain;
pub mod ports;
pub mod services;

#[cfg(test)]
mod tests;
