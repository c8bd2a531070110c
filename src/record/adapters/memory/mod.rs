//! In-memory adapters for tests and embedders without a database.

mod record;
mod store;

pub use record::DynamicRecord;
pub use store::InMemoryStore;
