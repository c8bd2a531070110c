//! Field declarations: coercion kind, default and rule chain.

use super::coerce;
use super::{CoercionError, Data, RelatedCheck, Rule, Value};
use crate::schema::ports::RowLookup;
use std::fmt;
use std::sync::Arc;

/// The coercion applied to a field's raw value.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldKind {
    /// Value passes through unchanged.
    Raw,
    /// Value is rendered as text.
    String,
    /// Value is converted to an integer.
    Integer,
    /// Value is converted to a float.
    Float,
    /// Value is converted to an exact decimal.
    Decimal,
    /// Value is converted to a date.
    Date,
    /// Value is converted to a time.
    Time,
    /// Value is converted to a datetime.
    DateTime,
    /// Value is converted to a boolean.
    Boolean,
    /// Value is reduced to one or many keys of a referenced table, whose
    /// existence is checked after the declared rules.
    Reference(RelatedCheck),
}

impl FieldKind {
    /// Converts a non-null raw value.
    ///
    /// # Errors
    ///
    /// Returns a [`CoercionError`] when the value cannot be converted.
    pub fn coerce(&self, value: Value) -> Result<Value, CoercionError> {
        match self {
            Self::Raw => Ok(value),
            Self::String => Ok(coerce::to_text(value)),
            Self::Integer => coerce::to_integer(value),
            Self::Float => coerce::to_float(value),
            Self::Decimal => coerce::to_decimal(value),
            Self::Date => coerce::to_date(value),
            Self::Time => coerce::to_time(value),
            Self::DateTime => coerce::to_datetime(value),
            Self::Boolean => Ok(coerce::to_boolean(&value)),
            Self::Reference(related) if related.is_many() => {
                Ok(coerce::to_reference_keys(related.column(), value))
            }
            Self::Reference(related) => Ok(coerce::to_reference_key(related.column(), value)),
        }
    }
}

/// A field's fallback value.
#[derive(Clone)]
pub enum FieldDefault {
    /// A fixed value.
    Value(Value),
    /// A factory invoked each time the default is needed.
    Factory(Arc<dyn Fn() -> Value + Send + Sync>),
}

impl FieldDefault {
    /// Produces the default value.
    #[must_use]
    pub fn produce(&self) -> Value {
        match self {
            Self::Value(value) => value.clone(),
            Self::Factory(factory) => factory(),
        }
    }
}

impl fmt::Debug for FieldDefault {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Value(value) => f.debug_tuple("Value").field(value).finish(),
            Self::Factory(_) => f.write_str("Factory(..)"),
        }
    }
}

/// The per-call view handed to rules.
#[derive(Debug, Clone, Copy)]
pub struct FieldContext<'a> {
    /// Name of the field being checked.
    pub name: &'a str,
    /// Coerced value of the field.
    pub value: &'a Value,
    /// Raw input data of the whole call.
    pub data: &'a Data,
}

/// Declaration of one named attribute.
///
/// The name is the key under which the field is registered in a schema.
#[derive(Debug, Clone)]
pub struct Field {
    kind: FieldKind,
    default: Option<FieldDefault>,
    rules: Vec<Rule>,
    length_slot: Option<usize>,
    range_slot: Option<usize>,
}

impl Field {
    /// Creates a field of the given kind with no default and no rules.
    #[must_use]
    pub const fn new(kind: FieldKind) -> Self {
        Self {
            kind,
            default: None,
            rules: Vec::new(),
            length_slot: None,
            range_slot: None,
        }
    }

    /// Field that keeps values as given.
    #[must_use]
    pub const fn raw() -> Self {
        Self::new(FieldKind::Raw)
    }

    /// Text field.
    #[must_use]
    pub const fn string() -> Self {
        Self::new(FieldKind::String)
    }

    /// Integer field.
    #[must_use]
    pub const fn integer() -> Self {
        Self::new(FieldKind::Integer)
    }

    /// Float field.
    #[must_use]
    pub const fn float() -> Self {
        Self::new(FieldKind::Float)
    }

    /// Decimal field.
    #[must_use]
    pub const fn decimal() -> Self {
        Self::new(FieldKind::Decimal)
    }

    /// Date field.
    #[must_use]
    pub const fn date() -> Self {
        Self::new(FieldKind::Date)
    }

    /// Time field.
    #[must_use]
    pub const fn time() -> Self {
        Self::new(FieldKind::Time)
    }

    /// Datetime field.
    #[must_use]
    pub const fn datetime() -> Self {
        Self::new(FieldKind::DateTime)
    }

    /// Boolean field.
    #[must_use]
    pub const fn boolean() -> Self {
        Self::new(FieldKind::Boolean)
    }

    /// Field holding one key of `table`, looked up by `column`.
    pub fn reference(
        store: Arc<dyn RowLookup>,
        table: impl Into<String>,
        column: impl Into<String>,
    ) -> Self {
        Self::new(FieldKind::Reference(RelatedCheck::single(store, table, column)))
    }

    /// Field holding a list of keys of `table`, looked up by `column`.
    pub fn many_reference(
        store: Arc<dyn RowLookup>,
        table: impl Into<String>,
        column: impl Into<String>,
    ) -> Self {
        Self::new(FieldKind::Reference(RelatedCheck::many(store, table, column)))
    }

    /// Marks the field as required.
    ///
    /// The required rule always runs first, whatever the call order.
    #[must_use]
    pub fn required(mut self) -> Self {
        if !self.is_required() {
            self.rules.insert(0, Rule::Required);
            self.length_slot = self.length_slot.map(|slot| slot + 1);
            self.range_slot = self.range_slot.map(|slot| slot + 1);
        }
        self
    }

    /// Sets the minimum length.
    #[must_use]
    pub fn min_length(self, low: usize) -> Self {
        self.with_length(|bounds| bounds.0 = Some(low))
    }

    /// Sets the maximum length.
    #[must_use]
    pub fn max_length(self, high: usize) -> Self {
        self.with_length(|bounds| bounds.1 = Some(high))
    }

    /// Sets the smallest accepted value.
    #[must_use]
    pub fn min_value(self, low: impl Into<Value>) -> Self {
        let bound = low.into();
        self.with_range(|bounds| bounds.0 = Some(bound))
    }

    /// Sets the largest accepted value.
    #[must_use]
    pub fn max_value(self, high: impl Into<Value>) -> Self {
        let bound = high.into();
        self.with_range(|bounds| bounds.1 = Some(bound))
    }

    /// Restricts the value to the given choices.
    #[must_use]
    pub fn choices<I, T>(self, choices: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<Value>,
    {
        self.rule(Rule::one_of(choices))
    }

    /// Forbids the given values.
    #[must_use]
    pub fn exclude_values<I, T>(self, values: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<Value>,
    {
        self.rule(Rule::none_of(values))
    }

    /// Sets a fixed default.
    #[must_use]
    pub fn default(mut self, value: impl Into<Value>) -> Self {
        self.default = Some(FieldDefault::Value(value.into()));
        self
    }

    /// Sets a default produced by `factory` on each use.
    #[must_use]
    pub fn default_with<F>(mut self, factory: F) -> Self
    where
        F: Fn() -> Value + Send + Sync + 'static,
    {
        self.default = Some(FieldDefault::Factory(Arc::new(factory)));
        self
    }

    /// Appends a rule.
    #[must_use]
    pub fn rule(mut self, rule: Rule) -> Self {
        if rule == Rule::Required {
            return self.required();
        }
        self.rules.push(rule);
        self
    }

    /// Appends several rules in order.
    #[must_use]
    pub fn rules(self, rules: impl IntoIterator<Item = Rule>) -> Self {
        rules.into_iter().fold(self, Self::rule)
    }

    /// Returns the coercion kind.
    #[must_use]
    pub const fn kind(&self) -> &FieldKind {
        &self.kind
    }

    /// Returns the default, if any.
    #[must_use]
    pub const fn default_value(&self) -> Option<&FieldDefault> {
        self.default.as_ref()
    }

    /// Returns the declared rules in execution order.
    #[must_use]
    pub fn declared_rules(&self) -> &[Rule] {
        &self.rules
    }

    /// Returns every rule the field runs, including the reference check
    /// implied by its kind.
    pub fn effective_rules(&self) -> impl Iterator<Item = Rule> + '_ {
        let implicit = match &self.kind {
            FieldKind::Reference(related) => Some(Rule::Related(related.clone())),
            _ => None,
        };
        self.rules.iter().cloned().chain(implicit)
    }

    /// Returns `true` when the field carries the required rule.
    #[must_use]
    pub fn is_required(&self) -> bool {
        self.rules.first() == Some(&Rule::Required)
    }

    /// Converts a non-null raw value according to the field's kind.
    ///
    /// # Errors
    ///
    /// Returns a [`CoercionError`] when the value cannot be converted.
    pub fn coerce(&self, value: Value) -> Result<Value, CoercionError> {
        self.kind.coerce(value)
    }

    fn with_length(mut self, update: impl FnOnce(&mut (Option<usize>, Option<usize>))) -> Self {
        let current = self.length_slot.and_then(|slot| self.rules.get(slot));
        let mut bounds = match current {
            Some(Rule::Length { low, high, .. }) => (*low, *high),
            _ => (None, None),
        };
        update(&mut bounds);
        let rule = Rule::Length {
            low: bounds.0,
            high: bounds.1,
            equal: None,
        };
        self.length_slot = Some(self.place(self.length_slot, rule));
        self
    }

    fn with_range(mut self, update: impl FnOnce(&mut (Option<Value>, Option<Value>))) -> Self {
        let current = self.range_slot.and_then(|slot| self.rules.get(slot));
        let mut bounds = match current {
            Some(Rule::Range { low, high }) => (low.clone(), high.clone()),
            _ => (None, None),
        };
        update(&mut bounds);
        let rule = Rule::Range {
            low: bounds.0,
            high: bounds.1,
        };
        self.range_slot = Some(self.place(self.range_slot, rule));
        self
    }

    fn place(&mut self, slot: Option<usize>, rule: Rule) -> usize {
        if let Some(index) = slot
            && let Some(existing) = self.rules.get_mut(index)
        {
            *existing = rule;
            return index;
        }
        self.rules.push(rule);
        self.rules.len() - 1
    }
}
