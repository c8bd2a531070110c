//! When steps for record adapter BDD scenarios.

use super::world::RecordWorld;
use eyre::WrapErr;
use fieldguard::record::services::ModelValidator;
use fieldguard::schema::domain::{Data, Value};
use fieldguard::schema::services::Schema;
use rstest_bdd_macros::when;
use std::sync::Arc;

#[when(r#"the person is validated with email "{email}" and name "{first}" "{last}""#)]
fn validate_person(
    world: &mut RecordWorld,
    email: String,
    first: String,
    last: String,
) -> Result<(), eyre::Report> {
    let input: Data = [("email", email), ("first", first), ("last", last)]
        .into_iter()
        .map(|(name, value)| (name.to_owned(), Value::from(value)))
        .collect();
    let store = Arc::new(world.store.clone());
    let record = world
        .record
        .as_mut()
        .ok_or_else(|| eyre::eyre!("missing person record in scenario world"))?;
    let outcome = ModelValidator::new(record, store, &Schema::new())
        .validate(&input)
        .wrap_err("validate person")?;
    world.outcome = Some(outcome);
    Ok(())
}
