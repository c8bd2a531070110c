//! Declarative schema definitions.

use crate::schema::domain::{Field, ValidatorOptions};
use indexmap::IndexMap;

/// An ordered set of named fields plus validator options.
///
/// Schemas are static declarations. Validators copy them on construction, so
/// one schema can back many validators.
///
/// # Examples
///
/// ```
/// use fieldguard::schema::domain::Field;
/// use fieldguard::schema::services::Schema;
///
/// let base = Schema::new().field("name", Field::string().required());
/// let schema = Schema::new()
///     .extend(&base)
///     .field("age", Field::integer().min_value(0))
///     .message("required", "Please fill this in.");
///
/// let names: Vec<&str> = schema.field_names().collect();
/// assert_eq!(names, ["name", "age"]);
/// ```
#[derive(Debug, Clone, Default)]
pub struct Schema {
    fields: IndexMap<String, Field>,
    options: ValidatorOptions,
}

impl Schema {
    /// Creates an empty schema.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Declares a field, replacing any earlier field of the same name in
    /// place.
    #[must_use]
    pub fn field(mut self, name: impl Into<String>, field: Field) -> Self {
        self.fields.insert(name.into(), field);
        self
    }

    /// Replaces the options block.
    #[must_use]
    pub fn options(mut self, options: ValidatorOptions) -> Self {
        self.options = options;
        self
    }

    /// Adds message overrides.
    #[must_use]
    pub fn messages<I, K, V>(mut self, messages: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        self.options.messages.extend(
            messages
                .into_iter()
                .map(|(key, template)| (key.into(), template.into())),
        );
        self
    }

    /// Adds a single message override.
    #[must_use]
    pub fn message(mut self, key: impl Into<String>, template: impl Into<String>) -> Self {
        self.options.messages.insert(key.into(), template.into());
        self
    }

    /// Limits validation to the named fields by default.
    #[must_use]
    pub fn only<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.options.only = Some(names.into_iter().map(Into::into).collect());
        self
    }

    /// Skips the named fields by default.
    #[must_use]
    pub fn exclude<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.options.exclude = Some(names.into_iter().map(Into::into).collect());
        self
    }

    /// Merges `other` on top of this schema.
    ///
    /// Fields of `other` replace same-named fields in place and new ones are
    /// appended. Message overrides merge with `other` winning, and its
    /// `only`/`exclude` lists replace these when set.
    #[must_use]
    pub fn extend(mut self, other: &Self) -> Self {
        for (name, field) in &other.fields {
            self.fields.insert(name.clone(), field.clone());
        }
        for (key, template) in &other.options.messages {
            self.options.messages.insert(key.clone(), template.clone());
        }
        if other.options.only.is_some() {
            self.options.only.clone_from(&other.options.only);
        }
        if other.options.exclude.is_some() {
            self.options.exclude.clone_from(&other.options.exclude);
        }
        self
    }

    /// Returns the declared fields in order.
    #[must_use]
    pub const fn fields(&self) -> &IndexMap<String, Field> {
        &self.fields
    }

    /// Returns the declared field names in order.
    pub fn field_names(&self) -> impl Iterator<Item = &str> {
        self.fields.keys().map(String::as_str)
    }

    /// Returns the options block.
    #[must_use]
    pub const fn validator_options(&self) -> &ValidatorOptions {
        &self.options
    }
}
