//! Shared world state for record adapter BDD scenarios.

use fieldguard::record::adapters::memory::{DynamicRecord, InMemoryStore};
use fieldguard::record::domain::{ColumnDescriptor, IndexDescriptor, RecordSchema};
use fieldguard::schema::domain::ValidationOutcome;
use rstest::fixture;

/// Scenario world for record adapter behaviour tests.
#[derive(Default)]
pub struct RecordWorld {
    pub store: InMemoryStore,
    pub record: Option<DynamicRecord>,
    pub snapshot: Option<DynamicRecord>,
    pub outcome: Option<ValidationOutcome>,
}

/// Table description shared by every scenario.
#[must_use]
pub fn people() -> RecordSchema {
    RecordSchema::new("people")
        .column(ColumnDescriptor::new("id", "int").primary_key())
        .column(
            ColumnDescriptor::new("email", "varchar")
                .not_null()
                .max_length(60)
                .unique(),
        )
        .column(ColumnDescriptor::new("first", "varchar").not_null())
        .column(ColumnDescriptor::new("last", "varchar").not_null())
        .index(IndexDescriptor::unique(["first", "last"]))
}

/// Fixture that creates a new scenario world.
#[fixture]
pub fn world() -> RecordWorld {
    RecordWorld::default()
}
