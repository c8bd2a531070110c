//! Unit tests for validator options and field scopes.

use crate::schema::domain::{FieldScope, OptionsError, ValidatorOptions};
use rstest::rstest;

const DECLARED: [&str; 4] = ["name", "email", "age", "notes"];

#[rstest]
fn options_load_from_json() {
    let options = ValidatorOptions::from_json(
        r#"{"messages": {"age.range_low": "Too young."}, "only": ["name", "age"]}"#,
    )
    .expect("valid options");

    assert_eq!(
        options.messages.get("age.range_low").map(String::as_str),
        Some("Too young.")
    );
    assert_eq!(options.only, Some(vec!["name".to_owned(), "age".to_owned()]));
    assert_eq!(options.exclude, None);
}

#[rstest]
fn malformed_options_are_rejected() {
    let err = ValidatorOptions::from_json(r#"{"only": "name"}"#).expect_err("should fail");
    assert!(matches!(err, OptionsError::Malformed(_)));
}

#[rstest]
#[case::all(FieldScope::all(), vec!["name", "email", "age", "notes"])]
#[case::only(FieldScope::only(["age", "name", "unknown"]), vec!["name", "age"])]
#[case::exclude(FieldScope::exclude(["notes"]), vec!["name", "email", "age"])]
#[case::only_and_exclude_both_apply(
    FieldScope {
        only: Some(vec!["email".to_owned(), "name".to_owned()]),
        exclude: Some(vec!["email".to_owned()]),
    },
    vec!["name"]
)]
#[case::empty_only_is_ignored(FieldScope::only(Vec::<String>::new()), vec!["name", "email", "age", "notes"])]
fn scopes_select_declared_fields_in_order(#[case] scope: FieldScope, #[case] expected: Vec<&str>) {
    assert_eq!(scope.apply(DECLARED), expected);
}

#[rstest]
fn call_scopes_fall_back_to_schema_scopes() {
    let schema_scope = FieldScope::exclude(["notes"]);

    let inherited = FieldScope::all().or(&schema_scope);
    let overridden = FieldScope::only(["notes"]).or(&schema_scope);

    assert_eq!(inherited.apply(DECLARED), ["name", "email", "age"]);
    assert_eq!(overridden.apply(DECLARED), ["notes"]);
}

#[rstest]
fn call_exclude_replaces_schema_only() {
    let schema_scope = FieldScope::only(["name", "email"]);

    let scoped = FieldScope::exclude(["email"]).or(&schema_scope);

    assert_eq!(scoped, FieldScope::exclude(["email"]));
    assert_eq!(scoped.apply(DECLARED), ["name", "age", "notes"]);
}

#[rstest]
#[case::empty(FieldScope::all(), true)]
#[case::empty_lists(FieldScope::only(Vec::<String>::new()), true)]
#[case::exclude(FieldScope::exclude(["age"]), false)]
fn unrestricted_scopes_are_detected(#[case] scope: FieldScope, #[case] expected: bool) {
    assert_eq!(scope.is_unrestricted(), expected);
}
