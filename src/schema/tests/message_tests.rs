//! Unit tests for message resolution.

use crate::schema::domain::{
    DEFAULT_MESSAGES, FALLBACK_MESSAGE, MessageCatalog, ValidationError, Value, default_message,
};
use rstest::{fixture, rstest};

#[fixture]
fn catalog() -> MessageCatalog {
    let mut catalog = MessageCatalog::new();
    catalog.set("email.required", "Tell us your email.");
    catalog.set("required", "Fill this in.");
    catalog
}

#[rstest]
fn field_overrides_win_over_key_overrides(catalog: MessageCatalog) {
    assert_eq!(catalog.template("email", "required"), "Tell us your email.");
    assert_eq!(catalog.template("name", "required"), "Fill this in.");
}

#[rstest]
fn builtin_defaults_apply_without_overrides(catalog: MessageCatalog) {
    assert_eq!(catalog.template("email", "email"), "Must be a valid email address.");
}

#[rstest]
fn unknown_keys_use_the_fallback(catalog: MessageCatalog) {
    assert_eq!(catalog.template("email", "shape"), FALLBACK_MESSAGE);
    assert_eq!(
        catalog.resolve("email", &ValidationError::new("shape")),
        "Validation failed (shape)."
    );
}

#[rstest]
#[case::length_between(
    ValidationError::new("length_between").with_param("low", 2).with_param("high", 4),
    "Must be between 2 and 4 characters."
)]
#[case::range_high(
    ValidationError::new("range_high").with_param("high", 10),
    "Must be at most 10."
)]
#[case::one_of(
    ValidationError::new("one_of").with_param("choices", "a, b"),
    "Must be one of the choices: a, b."
)]
#[case::related(
    ValidationError::new("related")
        .with_param("field", "id")
        .with_param("values", Value::list([1, 33])),
    "Unable to find object with id = [1, 33]."
)]
#[case::float_param(
    ValidationError::new("range_low").with_param("low", 1.0),
    "Must be at least 1.0."
)]
fn templates_render_params(#[case] error: ValidationError, #[case] expected: &str) {
    assert_eq!(MessageCatalog::new().resolve("field", &error), expected);
}

#[rstest]
fn broken_templates_are_returned_verbatim() {
    let mut catalog = MessageCatalog::new();
    catalog.set("required", "Broken {{ template");

    assert_eq!(
        catalog.resolve("name", &ValidationError::new("required")),
        "Broken {{ template"
    );
}

#[rstest]
fn every_builtin_key_has_a_message() {
    for (key, template) in DEFAULT_MESSAGES {
        assert_eq!(default_message(key), Some(template));
    }
    assert_eq!(default_message("nope"), None);
}

#[rstest]
fn key_param_does_not_replace_the_error_key() {
    let mut catalog = MessageCatalog::new();
    catalog.set("shape", "{{ key }} failed");

    let error = ValidationError::new("shape").with_param("key", "spoofed");

    assert_eq!(catalog.resolve("field", &error), "shape failed");
}

#[rstest]
fn repeated_rendering_is_stable() {
    let catalog = MessageCatalog::new();
    let error = ValidationError::new("range_low").with_param("low", 5);

    let first = catalog.resolve("field", &error);
    let second = catalog.resolve("other", &error);

    assert_eq!(first, "Must be at least 5.");
    assert_eq!(first, second);
}
