//! Given steps for record adapter BDD scenarios.

use super::world::{RecordWorld, people};
use eyre::WrapErr;
use fieldguard::record::adapters::memory::DynamicRecord;
use fieldguard::schema::domain::{Data, Value};
use rstest_bdd_macros::given;

#[given(r#"a people table holding "{email}" for "{first}" "{last}""#)]
fn people_table(
    world: &mut RecordWorld,
    email: String,
    first: String,
    last: String,
) -> Result<(), eyre::Report> {
    let row: Data = [
        ("id", Value::Int(1)),
        ("email", Value::from(email)),
        ("first", Value::from(first)),
        ("last", Value::from(last)),
    ]
    .into_iter()
    .map(|(name, value)| (name.to_owned(), value))
    .collect();
    world
        .store
        .insert("people", row)
        .wrap_err("seed people table")?;
    Ok(())
}

#[given("a new person record")]
fn new_person(world: &mut RecordWorld) {
    let record = DynamicRecord::new(people());
    world.snapshot = Some(record.clone());
    world.record = Some(record);
}

#[given("the stored person record")]
fn stored_person(world: &mut RecordWorld) -> Result<(), eyre::Report> {
    let stored = world
        .store
        .rows("people")
        .wrap_err("read people table")?
        .into_iter()
        .next()
        .ok_or_else(|| eyre::eyre!("people table is empty"))?;
    let record = stored
        .into_iter()
        .fold(DynamicRecord::new(people()), |record, (name, value)| {
            record.with(name, value)
        });
    world.snapshot = Some(record.clone());
    world.record = Some(record);
    Ok(())
}
