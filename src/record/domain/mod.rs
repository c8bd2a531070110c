//! Domain model for persisted-record descriptions.

mod column;
mod schema;

pub use column::{ColumnDescriptor, ColumnType, Reference, ReferenceKind};
pub use schema::{IndexDescriptor, RecordSchema};
