//! Validation bound to a persisted record.

use super::introspect::derive_fields;
use crate::record::domain::IndexDescriptor;
use crate::record::ports::Record;
use crate::schema::domain::{
    Data, EngineResult, FieldScope, ValidationError, ValidationOutcome,
};
use crate::schema::ports::{CleanHook, LookupQuery, NoClean, RowLookup};
use crate::schema::services::{Schema, Validator};
use indexmap::IndexMap;
use std::sync::Arc;
use tracing::{debug, trace};

/// Validates input against the columns of a record and writes clean values
/// back onto it.
///
/// Fields are derived from the record's schema. Fields declared in the
/// supplied [`Schema`] replace derived fields of the same name entirely and
/// extra ones are appended. The record is only modified when a validation run
/// succeeds, and then all clean values are written together.
pub struct ModelValidator<'r, R: Record, H = NoClean> {
    record: &'r mut R,
    store: Arc<dyn RowLookup>,
    validator: Validator<H>,
}

impl<'r, R: Record> ModelValidator<'r, R, NoClean> {
    /// Creates a record validator without clean hooks.
    pub fn new(record: &'r mut R, store: Arc<dyn RowLookup>, schema: &Schema) -> Self {
        Self::with_hook(record, store, schema, NoClean)
    }
}

impl<'r, R: Record, H: CleanHook> ModelValidator<'r, R, H> {
    /// Creates a record validator that runs `hook` after the per-field pass.
    pub fn with_hook(
        record: &'r mut R,
        store: Arc<dyn RowLookup>,
        schema: &Schema,
        hook: H,
    ) -> Self {
        let primary_key = record.primary_key();
        let derived = derive_fields(record.schema(), primary_key.as_ref(), &store);
        let merged = derived
            .into_iter()
            .fold(Schema::new(), |acc, (name, field)| acc.field(name, field))
            .extend(schema);
        Self {
            record,
            store,
            validator: Validator::with_hook(&merged, hook),
        }
    }

    /// Returns the bound record.
    #[must_use]
    pub fn record(&self) -> &R {
        self.record
    }

    /// Returns the underlying validator.
    #[must_use]
    pub const fn validator(&self) -> &Validator<H> {
        &self.validator
    }

    /// Returns the underlying validator for registry and message changes.
    pub const fn validator_mut(&mut self) -> &mut Validator<H> {
        &mut self.validator
    }

    /// Validates `data`, filling absent fields from the record.
    ///
    /// # Errors
    ///
    /// Returns a [`crate::schema::domain::LookupError`] when the row store
    /// cannot answer a uniqueness or reference query.
    pub fn validate(&mut self, data: &Data) -> EngineResult<ValidationOutcome> {
        self.validate_scoped(data, &FieldScope::all())
    }

    /// Validates `data` against the fields selected by `scope`.
    ///
    /// Unique indexes are checked only when every field passed. On success
    /// the clean data is written onto the record.
    ///
    /// # Errors
    ///
    /// Returns a [`crate::schema::domain::LookupError`] when the row store
    /// cannot answer a uniqueness or reference query.
    pub fn validate_scoped(
        &mut self,
        data: &Data,
        scope: &FieldScope,
    ) -> EngineResult<ValidationOutcome> {
        self.validator.bind(self.record.attributes());
        let result = self.validator.validate_scoped(data, scope);
        self.validator.unbind();
        let outcome = result?;
        if !outcome.is_valid() {
            return Ok(outcome);
        }

        let (mut clean, mut errors) = outcome.into_parts();
        self.check_unique_indexes(&mut clean, &mut errors)?;
        if errors.is_empty() {
            self.record.assign(&clean);
            trace!(table = self.record.schema().table(), "record updated");
        }
        Ok(ValidationOutcome::new(clean, errors))
    }

    fn check_unique_indexes(
        &self,
        clean: &mut Data,
        errors: &mut IndexMap<String, String>,
    ) -> EngineResult<()> {
        let schema = self.record.schema();
        for index in schema.unique_indexes() {
            let query = self.index_query(index, clean);
            trace!(table = schema.table(), columns = ?index.columns, "checking unique index");
            if self.store.count(&query)? == 0 {
                continue;
            }
            let err = ValidationError::new("index").with_param("fields", index.columns.join(", "));
            for column in &index.columns {
                debug!(field = column.as_str(), key = err.key(), "unique index violated");
                clean.shift_remove(column);
                errors.insert(
                    column.clone(),
                    self.validator.catalog().resolve(column, &err),
                );
            }
        }
        Ok(())
    }

    fn index_query(&self, index: &IndexDescriptor, clean: &Data) -> LookupQuery {
        let schema = self.record.schema();
        let mut query = index
            .columns
            .iter()
            .fold(LookupQuery::new(schema.table()), |acc, column| {
                let value = clean
                    .get(column)
                    .cloned()
                    .or_else(|| self.record.attribute(column))
                    .unwrap_or_default();
                acc.filter(column.as_str(), value)
            });
        if let (Some(key_column), Some(key)) = (schema.primary_key(), self.record.primary_key()) {
            query = query.excluding(key_column.name.as_str(), key);
        }
        query
    }
}
