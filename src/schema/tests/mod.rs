//! Unit tests for the schema module.
//!
//! Tests are organised by concept: the value model, coercions, rules,
//! message resolution, options and the engine.

mod coerce_tests;
mod message_tests;
mod options_tests;
mod value_tests;
