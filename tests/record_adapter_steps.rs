//! Behaviour tests for record-bound validation.

#[path = "record_adapter_steps/mod.rs"]
mod record_adapter_steps_defs;

use record_adapter_steps_defs::world::{RecordWorld, world};
use rstest_bdd_macros::scenario;

#[scenario(
    path = "tests/features/record_adapter.feature",
    name = "A new person with valid input is written to the record"
)]
fn valid_person_is_written(world: RecordWorld) {
    let _ = world;
}

#[scenario(
    path = "tests/features/record_adapter.feature",
    name = "A duplicate email is rejected"
)]
fn duplicate_email_is_rejected(world: RecordWorld) {
    let _ = world;
}

#[scenario(
    path = "tests/features/record_adapter.feature",
    name = "The stored person does not conflict with itself"
)]
fn stored_person_revalidates(world: RecordWorld) {
    let _ = world;
}

#[scenario(
    path = "tests/features/record_adapter.feature",
    name = "Name pairs must be unique together"
)]
fn name_pairs_are_unique(world: RecordWorld) {
    let _ = world;
}
