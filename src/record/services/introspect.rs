//! Translation of column descriptors into validator fields.

use crate::record::domain::{ColumnDescriptor, RecordSchema, ReferenceKind};
use crate::schema::domain::{Field, Rule, UniqueCheck, Value};
use crate::schema::ports::RowLookup;
use indexmap::IndexMap;
use std::sync::Arc;

/// Derives one field per non-key column of `schema`, in column order.
///
/// `primary_key` is the current key of the record being validated; unique
/// checks ignore the row holding it.
#[must_use]
pub fn derive_fields(
    schema: &RecordSchema,
    primary_key: Option<&Value>,
    store: &Arc<dyn RowLookup>,
) -> IndexMap<String, Field> {
    let key_column = schema.primary_key().map(|column| column.name.as_str());
    let excluded = key_column.zip(primary_key);
    schema
        .columns()
        .iter()
        .filter(|column| !column.primary_key)
        .map(|column| {
            let field = derive_field(schema.table(), column, excluded, store);
            (column.name.clone(), field)
        })
        .collect()
}

/// Derives the field for a single column.
///
/// Rules are added in a fixed order: required, choices, maximum length,
/// uniqueness.
#[must_use]
pub fn derive_field(
    table: &str,
    column: &ColumnDescriptor,
    excluded: Option<(&str, &Value)>,
    store: &Arc<dyn RowLookup>,
) -> Field {
    let mut field = match &column.reference {
        Some(reference) if reference.kind == ReferenceKind::ToMany => Field::many_reference(
            Arc::clone(store),
            reference.table.as_str(),
            reference.column.as_str(),
        ),
        Some(reference) => Field::reference(
            Arc::clone(store),
            reference.table.as_str(),
            reference.column.as_str(),
        ),
        None => Field::new(column.column_type.field_kind()),
    };
    if !column.nullable {
        field = field.required();
    }
    if !column.choices.is_empty() {
        field = field.choices(column.choices.iter().cloned());
    }
    if let Some(max_length) = column.max_length {
        field = field.rule(Rule::max_length(max_length));
    }
    if column.unique {
        let mut check = UniqueCheck::new(Arc::clone(store), table, column.name.as_str());
        if let Some((key_column, key)) = excluded {
            check = check.excluding(key_column, key.clone());
        }
        field = field.rule(Rule::Unique(check));
    }
    if let Some(default) = &column.default {
        field = field.default(default.clone());
    }
    field
}
