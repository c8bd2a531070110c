//! Port contracts for persisted records.

mod record;

pub use record::Record;
