//! Error message catalog and template rendering.
//!
//! A message is looked up for a field name and an error key in this order:
//!
//! 1. `"<field>.<key>"` in the catalog overrides
//! 2. `"<key>"` in the catalog overrides
//! 3. the built-in default for the key
//! 4. [`FALLBACK_MESSAGE`]
//!
//! Templates use `minijinja` syntax and see the error params by name.

use super::{ValidationError, Value};
use indexmap::IndexMap;
use minijinja::Environment;
use once_cell::sync::Lazy;
use serde_json::Map;
use tracing::warn;

/// Message used when no template exists for a key.
pub const FALLBACK_MESSAGE: &str = "Validation failed ({{ key }}).";

/// Built-in message templates by error key.
pub const DEFAULT_MESSAGES: [(&str, &str); 26] = [
    ("required", "This field is required."),
    ("empty", "This field must not be blank."),
    ("one_of", "Must be one of the choices: {{ choices }}."),
    ("none_of", "Must not be one of the choices: {{ choices }}."),
    ("equal", "Must be equal to {{ other }}."),
    ("regexp", "Must match the pattern {{ pattern }}."),
    ("matches", "Must match the field {{ other }}."),
    ("email", "Must be a valid email address."),
    ("function", "Failed validation for {{ function }}."),
    ("length_high", "Must be at most {{ high }} characters."),
    ("length_low", "Must be at least {{ low }} characters."),
    ("length_between", "Must be between {{ low }} and {{ high }} characters."),
    ("length_equal", "Must be exactly {{ equal }} characters."),
    ("range_high", "Must be at most {{ high }}."),
    ("range_low", "Must be at least {{ low }}."),
    ("range_between", "Must be between {{ low }} and {{ high }}."),
    ("coerce_decimal", "Must be a valid decimal."),
    ("coerce_date", "Must be a valid date."),
    ("coerce_time", "Must be a valid time."),
    ("coerce_datetime", "Must be a valid datetime."),
    ("coerce_float", "Must be a valid float."),
    ("coerce_int", "Must be a valid integer."),
    ("related", "Unable to find object with {{ field }} = {{ values }}."),
    ("list", "Must be a list of values."),
    ("unique", "Must be a unique value."),
    ("index", "Fields must be unique together."),
];

/// Returns the built-in template for `key`.
#[must_use]
pub fn default_message(key: &str) -> Option<&'static str> {
    DEFAULT_MESSAGES
        .iter()
        .find(|(candidate, _)| *candidate == key)
        .map(|(_, template)| *template)
}

/// Layered message overrides on top of the built-in defaults.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MessageCatalog {
    overrides: IndexMap<String, String>,
}

impl MessageCatalog {
    /// Creates a catalog with only the built-in defaults.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a catalog from a set of overrides.
    #[must_use]
    pub fn with_overrides(overrides: &IndexMap<String, String>) -> Self {
        Self {
            overrides: overrides.clone(),
        }
    }

    /// Adds or replaces an override.
    ///
    /// `key` is either an error key (`"required"`) or a field-qualified key
    /// (`"email.required"`).
    pub fn set(&mut self, key: impl Into<String>, template: impl Into<String>) {
        self.overrides.insert(key.into(), template.into());
    }

    /// Returns the overrides in insertion order.
    #[must_use]
    pub const fn overrides(&self) -> &IndexMap<String, String> {
        &self.overrides
    }

    /// Returns the template that applies to `key` on `field`.
    #[must_use]
    pub fn template(&self, field: &str, key: &str) -> &str {
        self.overrides
            .get(&format!("{field}.{key}"))
            .or_else(|| self.overrides.get(key))
            .map(String::as_str)
            .or_else(|| default_message(key))
            .unwrap_or(FALLBACK_MESSAGE)
    }

    /// Resolves `error` on `field` into a rendered message.
    #[must_use]
    pub fn resolve(&self, field: &str, error: &ValidationError) -> String {
        let template = self.template(field, error.key());
        render(template, error)
    }
}

static TEMPLATES: Lazy<Environment<'static>> = Lazy::new(Environment::new);

fn render(template: &str, error: &ValidationError) -> String {
    let context = build_template_context(error);
    TEMPLATES.render_str(template, context).unwrap_or_else(|err| {
        warn!(key = error.key(), error = %err, "message template failed to render");
        template.to_owned()
    })
}

fn build_template_context(error: &ValidationError) -> Map<String, serde_json::Value> {
    let mut context: Map<String, serde_json::Value> = error
        .params()
        .iter()
        .map(|(name, value)| (name.clone(), render_param(value)))
        .collect();
    context.insert(
        "key".to_owned(),
        serde_json::Value::String(error.key().to_owned()),
    );
    context
}

fn render_param(value: &Value) -> serde_json::Value {
    match value {
        Value::Null => serde_json::Value::Null,
        other => serde_json::Value::String(other.to_string()),
    }
}
