//! Then steps for record adapter BDD scenarios.

use super::world::RecordWorld;
use fieldguard::record::ports::Record;
use fieldguard::schema::domain::{ValidationOutcome, Value};
use rstest_bdd_macros::then;

fn outcome(world: &RecordWorld) -> Result<&ValidationOutcome, eyre::Report> {
    world
        .outcome
        .as_ref()
        .ok_or_else(|| eyre::eyre!("missing validation outcome"))
}

#[then("the validation succeeds")]
fn validation_succeeds(world: &RecordWorld) -> Result<(), eyre::Report> {
    let outcome = outcome(world)?;
    if !outcome.is_valid() {
        return Err(eyre::eyre!(
            "expected a valid outcome, got errors {:?}",
            outcome.errors()
        ));
    }
    Ok(())
}

#[then(r#"the field "{field}" fails with "{message}""#)]
fn field_fails_with(
    world: &RecordWorld,
    field: String,
    message: String,
) -> Result<(), eyre::Report> {
    let actual = outcome(world)?.error(&field);
    if actual != Some(message.as_str()) {
        return Err(eyre::eyre!(
            "expected '{message}' for {field}, found {actual:?}"
        ));
    }
    Ok(())
}

#[then(r#"the record email is "{email}""#)]
fn record_email_is(world: &RecordWorld, email: String) -> Result<(), eyre::Report> {
    let record = world
        .record
        .as_ref()
        .ok_or_else(|| eyre::eyre!("missing person record"))?;
    let actual = record.attribute("email");
    if actual != Some(Value::from(email.as_str())) {
        return Err(eyre::eyre!("expected email {email}, found {actual:?}"));
    }
    Ok(())
}

#[then("the record is unchanged")]
fn record_is_unchanged(world: &RecordWorld) -> Result<(), eyre::Report> {
    if world.record != world.snapshot {
        return Err(eyre::eyre!(
            "record changed: {:?} became {:?}",
            world.snapshot,
            world.record
        ));
    }
    Ok(())
}
