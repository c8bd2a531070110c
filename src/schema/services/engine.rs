//! The validation engine.

use super::Schema;
use crate::schema::domain::{
    BASE_ERROR_KEY, CheckError, Data, EngineResult, Field, FieldContext, FieldDefault, FieldScope,
    MessageCatalog, ValidationError, ValidationOutcome, Value,
};
use crate::schema::ports::{CleanHook, NoClean};
use indexmap::IndexMap;
use std::borrow::Cow;
use tracing::{debug, trace};

/// Validates input data against a registry of fields.
///
/// The registry, message catalog and bound instance data belong to the
/// validator and may be changed between calls. Each call to
/// [`Validator::validate`] is independent and leaves the validator untouched.
///
/// # Examples
///
/// ```
/// use fieldguard::schema::domain::{Data, Field, Value};
/// use fieldguard::schema::services::{Schema, Validator};
///
/// let schema = Schema::new()
///     .field("name", Field::string().required())
///     .field("age", Field::integer().min_value(18));
/// let validator = Validator::new(&schema);
///
/// let mut data = Data::new();
/// data.insert("name".to_owned(), Value::from("Ada"));
/// data.insert("age".to_owned(), Value::from("36"));
///
/// let outcome = validator.validate(&data).expect("no store is involved");
/// assert!(outcome.is_valid());
/// assert_eq!(outcome.data().get("age"), Some(&Value::Int(36)));
/// ```
#[derive(Debug, Clone)]
pub struct Validator<H = NoClean> {
    fields: IndexMap<String, Field>,
    catalog: MessageCatalog,
    scope: FieldScope,
    instance: Option<Data>,
    hook: H,
}

impl Validator<NoClean> {
    /// Creates a validator for `schema` without clean hooks.
    #[must_use]
    pub fn new(schema: &Schema) -> Self {
        Self::with_hook(schema, NoClean)
    }
}

impl<H: CleanHook> Validator<H> {
    /// Creates a validator for `schema` that runs `hook` after the per-field
    /// pass.
    #[must_use]
    pub fn with_hook(schema: &Schema, hook: H) -> Self {
        let options = schema.validator_options();
        Self {
            fields: schema.fields().clone(),
            catalog: MessageCatalog::with_overrides(&options.messages),
            scope: options.scope(),
            instance: None,
            hook,
        }
    }

    /// Adds a field, replacing any field of the same name in place.
    pub fn add_field(&mut self, name: impl Into<String>, field: Field) {
        self.fields.insert(name.into(), field);
    }

    /// Removes a field, returning it when present.
    pub fn remove_field(&mut self, name: &str) -> Option<Field> {
        self.fields.shift_remove(name)
    }

    /// Returns the named field.
    #[must_use]
    pub fn field(&self, name: &str) -> Option<&Field> {
        self.fields.get(name)
    }

    /// Returns the registered field names in order.
    pub fn field_names(&self) -> impl Iterator<Item = &str> {
        self.fields.keys().map(String::as_str)
    }

    /// Binds instance data used for fields absent from the input.
    pub fn bind(&mut self, instance: Data) {
        self.instance = Some(instance);
    }

    /// Removes bound instance data.
    pub fn unbind(&mut self) -> Option<Data> {
        self.instance.take()
    }

    /// Returns the bound instance data.
    #[must_use]
    pub const fn instance(&self) -> Option<&Data> {
        self.instance.as_ref()
    }

    /// Adds an instance-level message override.
    pub fn set_message(&mut self, key: impl Into<String>, template: impl Into<String>) {
        self.catalog.set(key, template);
    }

    /// Returns the message catalog.
    #[must_use]
    pub const fn catalog(&self) -> &MessageCatalog {
        &self.catalog
    }

    /// Returns the clean hook.
    #[must_use]
    pub const fn hook(&self) -> &H {
        &self.hook
    }

    /// Validates `data` against the fields selected by the schema options.
    ///
    /// # Errors
    ///
    /// Returns a [`crate::schema::domain::LookupError`] when a store-backed
    /// rule cannot be evaluated. Invalid input is reported in the outcome,
    /// never as an error.
    pub fn validate(&self, data: &Data) -> EngineResult<ValidationOutcome> {
        self.validate_scoped(data, &FieldScope::all())
    }

    /// Validates `data` against the fields selected by `scope`, falling back
    /// to the schema options for lists the scope leaves unset.
    ///
    /// # Errors
    ///
    /// Returns a [`crate::schema::domain::LookupError`] when a store-backed
    /// rule cannot be evaluated.
    pub fn validate_scoped(
        &self,
        data: &Data,
        scope: &FieldScope,
    ) -> EngineResult<ValidationOutcome> {
        let effective = scope.clone().or(&self.scope);
        let names = effective.apply(self.field_names());
        trace!(fields = ?names, "resolved field set");

        let view = self.input_view(data);
        let mut clean = Data::new();
        let mut errors = IndexMap::new();
        for name in names {
            let Some(field) = self.fields.get(name) else {
                continue;
            };
            match self.validate_field(name, field, &view)? {
                Ok(Some(value)) => {
                    clean.insert(name.to_owned(), value);
                }
                Ok(None) => trace!(field = name, "no value supplied"),
                Err(err) => self.record(&mut errors, name, &err),
            }
        }

        if errors.is_empty() {
            clean = self.clean_fields(clean, &mut errors);
        }
        if errors.is_empty() {
            clean = self.clean_all(clean, &mut errors);
        }
        Ok(ValidationOutcome::new(clean, errors))
    }

    fn input_view<'d>(&self, data: &'d Data) -> Cow<'d, Data> {
        self.instance.as_ref().map_or(Cow::Borrowed(data), |instance| {
            let mut merged = instance.clone();
            merged.extend(data.iter().map(|(key, value)| (key.clone(), value.clone())));
            Cow::Owned(merged)
        })
    }

    fn validate_field(
        &self,
        name: &str,
        field: &Field,
        view: &Data,
    ) -> EngineResult<Result<Option<Value>, ValidationError>> {
        let Some(raw) = view.get(name) else {
            return Ok(Self::validate_default(field));
        };
        let value = if raw.is_null() {
            Value::Null
        } else {
            match field.coerce(raw.clone()) {
                Ok(value) => value,
                Err(err) => return Ok(Err(err.into())),
            }
        };
        let ctx = FieldContext {
            name,
            value: &value,
            data: view,
        };
        for rule in field.effective_rules() {
            match rule.check(&ctx) {
                Ok(()) => {}
                Err(CheckError::Invalid(err)) => return Ok(Err(err)),
                Err(CheckError::Lookup(err)) => return Err(err),
            }
        }
        Ok(Ok(Some(value)))
    }

    fn validate_default(field: &Field) -> Result<Option<Value>, ValidationError> {
        let value = field.default_value().map(FieldDefault::produce);
        if field.is_required() && value.as_ref().is_none_or(Value::is_missing) {
            return Err(ValidationError::new("required"));
        }
        Ok(value)
    }

    fn clean_fields(&self, clean: Data, errors: &mut IndexMap<String, String>) -> Data {
        let mut cleaned = Data::with_capacity(clean.len());
        for (name, value) in clean {
            match self.hook.clean_field(&name, value) {
                Ok(replacement) => {
                    cleaned.insert(name, replacement);
                }
                Err(err) => self.record(errors, &name, &err),
            }
        }
        cleaned
    }

    fn clean_all(&self, clean: Data, errors: &mut IndexMap<String, String>) -> Data {
        match self.hook.clean(clean.clone()) {
            Ok(cleaned) => cleaned,
            Err(err) => {
                self.record(errors, BASE_ERROR_KEY, &err);
                clean
            }
        }
    }

    fn record(&self, errors: &mut IndexMap<String, String>, name: &str, err: &ValidationError) {
        debug!(field = name, key = err.key(), "field failed validation");
        errors.insert(name.to_owned(), self.catalog.resolve(name, err));
    }
}
