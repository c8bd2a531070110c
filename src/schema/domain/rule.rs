//! Validation rules.
//!
//! Rules are tagged variants carrying their configuration so they stay
//! inspectable and comparable. Each exposes a single [`Rule::check`] that
//! either accepts the value in a [`FieldContext`] or reports a
//! [`CheckError`]. Rules never modify data.

use super::{CheckError, FieldContext, SchemaDefinitionError, ValidationError, Value};
use crate::schema::ports::{LookupQuery, RowLookup};
use once_cell::sync::Lazy;
use regex::{Regex, RegexBuilder};
use std::cmp::Ordering;
use std::fmt;
use std::sync::Arc;
use tracing::trace;

/// Result of a single rule check.
pub type CheckResult = Result<(), CheckError>;

#[expect(clippy::expect_used, reason = "pattern is a compile-time literal")]
static EMAIL_USER: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r#"(?i)^(?:[-!#$%&'*+/=?^`{}|~\w]+(?:\.[-!#$%&'*+/=?^`{}|~\w]+)*|"(?:[\x01-\x08\x0b\x0c\x0e-\x1f!#-\[\]-\x7f]|\\[\x01-\x09\x0b\x0c\x0e-\x7f])*")$"#,
    )
    .expect("email user pattern compiles")
});

#[expect(clippy::expect_used, reason = "pattern is a compile-time literal")]
static EMAIL_DOMAIN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?i)^(?:(?:[A-Z0-9](?:[A-Z0-9-]{0,61}[A-Z0-9])?\.)+(?:[A-Z]{2,6}|[A-Z0-9-]{2,})|\[(?:25[0-5]|2[0-4]\d|[0-1]?\d?\d)(?:\.(?:25[0-5]|2[0-4]\d|[0-1]?\d?\d)){3}\])$",
    )
    .expect("email domain pattern compiles")
});

const EMAIL_DOMAIN_WHITELIST: [&str; 1] = ["localhost"];

/// A single validation rule.
#[derive(Debug, Clone, PartialEq)]
pub enum Rule {
    /// Fails with `required` when the value is missing.
    Required,
    /// Fails with `empty` when text is blank after trimming.
    NotEmpty,
    /// Bounds the measured length of the value.
    Length {
        /// Minimum length.
        low: Option<usize>,
        /// Maximum length.
        high: Option<usize>,
        /// Exact length.
        equal: Option<usize>,
    },
    /// Fails with `one_of` unless the value is among the choices.
    OneOf(Choices),
    /// Fails with `none_of` when the value is among the choices.
    NoneOf(Choices),
    /// Inclusive bounds on comparable values.
    Range {
        /// Lower bound.
        low: Option<Value>,
        /// Upper bound.
        high: Option<Value>,
    },
    /// Fails with `equal` unless the value equals the given value.
    Equal(Value),
    /// Fails with `matches` unless the value equals the named input field.
    Matches(String),
    /// Fails with `regexp` unless the value's text matches at its start.
    Regexp(Pattern),
    /// Fails with `email` unless the value looks like an email address.
    Email,
    /// Fails with `function` when the predicate rejects the value.
    Function(Predicate),
    /// User rule with full context access.
    Custom(CustomRule),
    /// Fails with `unique` when another row holds the value.
    Unique(UniqueCheck),
    /// Fails with `related` when a referenced row does not exist.
    Related(RelatedCheck),
}

impl Rule {
    /// Builds a length rule with only a lower bound.
    #[must_use]
    pub const fn min_length(low: usize) -> Self {
        Self::Length {
            low: Some(low),
            high: None,
            equal: None,
        }
    }

    /// Builds a length rule with only an upper bound.
    #[must_use]
    pub const fn max_length(high: usize) -> Self {
        Self::Length {
            low: None,
            high: Some(high),
            equal: None,
        }
    }

    /// Builds a length rule requiring an exact length.
    #[must_use]
    pub const fn exact_length(equal: usize) -> Self {
        Self::Length {
            low: None,
            high: None,
            equal: Some(equal),
        }
    }

    /// Builds a range rule with only a lower bound.
    pub fn at_least(low: impl Into<Value>) -> Self {
        Self::Range {
            low: Some(low.into()),
            high: None,
        }
    }

    /// Builds a range rule with only an upper bound.
    pub fn at_most(high: impl Into<Value>) -> Self {
        Self::Range {
            low: None,
            high: Some(high.into()),
        }
    }

    /// Builds a range rule with both bounds.
    pub fn between(low: impl Into<Value>, high: impl Into<Value>) -> Self {
        Self::Range {
            low: Some(low.into()),
            high: Some(high.into()),
        }
    }

    /// Builds a membership rule over a fixed list.
    pub fn one_of<I, T>(choices: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<Value>,
    {
        Self::OneOf(Choices::fixed(choices))
    }

    /// Builds an exclusion rule over a fixed list.
    pub fn none_of<I, T>(choices: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<Value>,
    {
        Self::NoneOf(Choices::fixed(choices))
    }

    /// Builds an equality rule.
    pub fn equal(value: impl Into<Value>) -> Self {
        Self::Equal(value.into())
    }

    /// Builds a rule requiring the value to match another input field.
    pub fn matches(other: impl Into<String>) -> Self {
        Self::Matches(other.into())
    }

    /// Builds a pattern rule with default flags.
    ///
    /// # Errors
    ///
    /// Returns [`SchemaDefinitionError::InvalidPattern`] when the pattern
    /// does not compile.
    pub fn regexp(pattern: &str) -> Result<Self, SchemaDefinitionError> {
        Pattern::new(pattern, RegexFlags::default()).map(Self::Regexp)
    }

    /// Builds a predicate rule reported under `name`.
    pub fn function<F>(name: impl Into<String>, predicate: F) -> Self
    where
        F: Fn(&Value) -> bool + Send + Sync + 'static,
    {
        Self::Function(Predicate::new(name, predicate))
    }

    /// Builds a custom rule.
    pub fn custom<F>(name: impl Into<String>, check: F) -> Self
    where
        F: Fn(&FieldContext<'_>) -> CheckResult + Send + Sync + 'static,
    {
        Self::Custom(CustomRule::new(name, check))
    }

    /// Checks the value in `ctx`.
    ///
    /// # Errors
    ///
    /// Returns [`CheckError::Invalid`] when the value fails the rule and
    /// [`CheckError::Lookup`] when a store-backed rule cannot be evaluated.
    pub fn check(&self, ctx: &FieldContext<'_>) -> CheckResult {
        let value = ctx.value;
        match self {
            Self::Required => ensure(!value.is_missing(), || ValidationError::new("required")),
            Self::NotEmpty => check_not_empty(value),
            Self::Length { low, high, equal } => check_length(value, *low, *high, *equal),
            Self::OneOf(choices) => check_one_of(value, choices),
            Self::NoneOf(choices) => check_none_of(value, choices),
            Self::Range { low, high } => check_range(value, low.as_ref(), high.as_ref()),
            Self::Equal(other) => check_equal(value, other),
            Self::Matches(other) => check_matches(ctx, other),
            Self::Regexp(pattern) => check_pattern(value, pattern),
            Self::Email => check_email(value),
            Self::Function(predicate) => check_predicate(value, predicate),
            Self::Custom(custom) => (custom.check)(ctx),
            Self::Unique(unique) => unique.check(value),
            Self::Related(related) => related.check(value),
        }
    }
}

fn ensure(condition: bool, error: impl FnOnce() -> ValidationError) -> CheckResult {
    if condition {
        Ok(())
    } else {
        Err(error().into())
    }
}

fn check_not_empty(value: &Value) -> CheckResult {
    let blank = value.as_str().is_some_and(|text| text.trim().is_empty());
    ensure(!blank, || ValidationError::new("empty"))
}

fn check_length(
    value: &Value,
    low: Option<usize>,
    high: Option<usize>,
    equal: Option<usize>,
) -> CheckResult {
    if value.is_missing() {
        return Ok(());
    }
    let len = value.measured_len();
    if let Some(expected) = equal
        && len != expected
    {
        return Err(ValidationError::new("length_equal")
            .with_param("equal", expected)
            .into());
    }
    let bounded = |key: &str| {
        let mut error = ValidationError::new(key);
        if let Some(bound) = low {
            error = error.with_param("low", bound);
        }
        if let Some(bound) = high {
            error = error.with_param("high", bound);
        }
        error
    };
    if let Some(bound) = low
        && len < bound
    {
        let key = if high.is_some() { "length_between" } else { "length_low" };
        return Err(bounded(key).into());
    }
    if let Some(bound) = high
        && len > bound
    {
        let key = if low.is_some() { "length_between" } else { "length_high" };
        return Err(bounded(key).into());
    }
    Ok(())
}

fn check_one_of(value: &Value, choices: &Choices) -> CheckResult {
    if value.is_null() {
        return Ok(());
    }
    let options = choices.resolve();
    ensure(options.iter().any(|option| option.same_as(value)), || {
        ValidationError::new("one_of").with_param("choices", join_values(&options))
    })
}

fn check_none_of(value: &Value, choices: &Choices) -> CheckResult {
    if value.is_null() {
        return Ok(());
    }
    let options = choices.resolve();
    ensure(!options.iter().any(|option| option.same_as(value)), || {
        ValidationError::new("none_of").with_param("choices", join_values(&options))
    })
}

fn check_range(value: &Value, low: Option<&Value>, high: Option<&Value>) -> CheckResult {
    if value.is_null() {
        return Ok(());
    }
    let bounded = |key: &str| {
        let mut error = ValidationError::new(key);
        if let Some(bound) = low {
            error = error.with_param("low", bound.clone());
        }
        if let Some(bound) = high {
            error = error.with_param("high", bound.clone());
        }
        error
    };
    if let Some(bound) = low
        && !matches!(
            value.compare(bound),
            Some(Ordering::Greater | Ordering::Equal)
        )
    {
        let key = if high.is_some() { "range_between" } else { "range_low" };
        return Err(bounded(key).into());
    }
    if let Some(bound) = high
        && !matches!(value.compare(bound), Some(Ordering::Less | Ordering::Equal))
    {
        let key = if low.is_some() { "range_between" } else { "range_high" };
        return Err(bounded(key).into());
    }
    Ok(())
}

fn check_equal(value: &Value, other: &Value) -> CheckResult {
    if value.is_null() {
        return Ok(());
    }
    ensure(value.same_as(other), || {
        ValidationError::new("equal").with_param("other", other.clone())
    })
}

fn check_matches(ctx: &FieldContext<'_>, other: &str) -> CheckResult {
    if ctx.value.is_null() {
        return Ok(());
    }
    let matched = ctx
        .data
        .get(other)
        .is_some_and(|candidate| ctx.value.same_as(candidate));
    ensure(matched, || {
        ValidationError::new("matches").with_param("other", other)
    })
}

fn check_pattern(value: &Value, pattern: &Pattern) -> CheckResult {
    if value.is_null() {
        return Ok(());
    }
    ensure(pattern.is_match(&value.to_string()), || {
        ValidationError::new("regexp").with_param("pattern", pattern.source())
    })
}

fn check_email(value: &Value) -> CheckResult {
    if value.is_null() {
        return Ok(());
    }
    ensure(is_email(&value.to_string()), || ValidationError::new("email"))
}

fn is_email(text: &str) -> bool {
    let Some((user, domain)) = text.rsplit_once('@') else {
        return false;
    };
    if !EMAIL_USER.is_match(user) {
        return false;
    }
    EMAIL_DOMAIN_WHITELIST.contains(&domain) || EMAIL_DOMAIN.is_match(domain)
}

fn check_predicate(value: &Value, predicate: &Predicate) -> CheckResult {
    if value.is_null() {
        return Ok(());
    }
    ensure((predicate.test)(value), || {
        ValidationError::new("function").with_param("function", predicate.name.as_str())
    })
}

fn join_values(values: &[Value]) -> String {
    values
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Source of allowed or forbidden values.
#[derive(Clone)]
pub enum Choices {
    /// A fixed list.
    Fixed(Vec<Value>),
    /// A provider evaluated on every check.
    Dynamic(Arc<dyn Fn() -> Vec<Value> + Send + Sync>),
}

impl Choices {
    /// Builds a fixed choice list.
    pub fn fixed<I, T>(values: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<Value>,
    {
        Self::Fixed(values.into_iter().map(Into::into).collect())
    }

    /// Builds a provider-backed choice list.
    pub fn dynamic<F>(provider: F) -> Self
    where
        F: Fn() -> Vec<Value> + Send + Sync + 'static,
    {
        Self::Dynamic(Arc::new(provider))
    }

    /// Returns the current list of choices.
    #[must_use]
    pub fn resolve(&self) -> Vec<Value> {
        match self {
            Self::Fixed(values) => values.clone(),
            Self::Dynamic(provider) => provider(),
        }
    }
}

impl fmt::Debug for Choices {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Fixed(values) => f.debug_tuple("Fixed").field(values).finish(),
            Self::Dynamic(_) => f.write_str("Dynamic(..)"),
        }
    }
}

impl PartialEq for Choices {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Fixed(a), Self::Fixed(b)) => a == b,
            (Self::Dynamic(a), Self::Dynamic(b)) => Arc::ptr_eq(a, b),
            _ => false,
        }
    }
}

/// Regular expression flags accepted by [`Pattern`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RegexFlags {
    /// Match letters regardless of case.
    pub case_insensitive: bool,
    /// Let `^` and `$` match at line boundaries.
    pub multi_line: bool,
    /// Let `.` match newlines.
    pub dot_matches_new_line: bool,
    /// Ignore whitespace and allow `#` comments in the pattern.
    pub verbose: bool,
}

/// A compiled pattern matched against the start of the value's text.
#[derive(Debug, Clone)]
pub struct Pattern {
    source: String,
    flags: RegexFlags,
    regex: Regex,
}

impl Pattern {
    /// Compiles `source` with `flags`.
    ///
    /// # Errors
    ///
    /// Returns [`SchemaDefinitionError::InvalidPattern`] when the pattern
    /// does not compile.
    pub fn new(source: &str, flags: RegexFlags) -> Result<Self, SchemaDefinitionError> {
        let regex = RegexBuilder::new(source)
            .case_insensitive(flags.case_insensitive)
            .multi_line(flags.multi_line)
            .dot_matches_new_line(flags.dot_matches_new_line)
            .ignore_whitespace(flags.verbose)
            .build()
            .map_err(|err| SchemaDefinitionError::InvalidPattern {
                pattern: source.to_owned(),
                message: err.to_string(),
            })?;
        Ok(Self {
            source: source.to_owned(),
            flags,
            regex,
        })
    }

    /// Returns the pattern as written.
    #[must_use]
    pub fn source(&self) -> &str {
        &self.source
    }

    /// Returns the compile flags.
    #[must_use]
    pub const fn flags(&self) -> RegexFlags {
        self.flags
    }

    /// Returns `true` when the pattern matches at the start of `text`.
    #[must_use]
    pub fn is_match(&self, text: &str) -> bool {
        self.regex.find(text).is_some_and(|found| found.start() == 0)
    }
}

impl PartialEq for Pattern {
    fn eq(&self, other: &Self) -> bool {
        self.source == other.source && self.flags == other.flags
    }
}

/// A named value predicate.
#[derive(Clone)]
pub struct Predicate {
    name: String,
    test: Arc<dyn Fn(&Value) -> bool + Send + Sync>,
}

impl Predicate {
    /// Wraps `test` under `name`.
    pub fn new<F>(name: impl Into<String>, test: F) -> Self
    where
        F: Fn(&Value) -> bool + Send + Sync + 'static,
    {
        Self {
            name: name.into(),
            test: Arc::new(test),
        }
    }

    /// Returns the name used in failure messages.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }
}

impl fmt::Debug for Predicate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Predicate").field("name", &self.name).finish_non_exhaustive()
    }
}

impl PartialEq for Predicate {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name && Arc::ptr_eq(&self.test, &other.test)
    }
}

type CustomCheck = dyn Fn(&FieldContext<'_>) -> CheckResult + Send + Sync;

/// A user-supplied rule with access to the whole field context.
#[derive(Clone)]
pub struct CustomRule {
    name: String,
    check: Arc<CustomCheck>,
}

impl CustomRule {
    /// Wraps `check` under `name`.
    pub fn new<F>(name: impl Into<String>, check: F) -> Self
    where
        F: Fn(&FieldContext<'_>) -> CheckResult + Send + Sync + 'static,
    {
        Self {
            name: name.into(),
            check: Arc::new(check),
        }
    }

    /// Returns the rule's name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }
}

impl fmt::Debug for CustomRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CustomRule").field("name", &self.name).finish_non_exhaustive()
    }
}

impl PartialEq for CustomRule {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name && Arc::ptr_eq(&self.check, &other.check)
    }
}

/// Store-backed uniqueness check for one column.
#[derive(Clone)]
pub struct UniqueCheck {
    store: Arc<dyn RowLookup>,
    table: String,
    column: String,
    exclude: Option<(String, Value)>,
}

impl UniqueCheck {
    /// Creates a check that `column` of `table` holds no other row with the
    /// value.
    pub fn new(
        store: Arc<dyn RowLookup>,
        table: impl Into<String>,
        column: impl Into<String>,
    ) -> Self {
        Self {
            store,
            table: table.into(),
            column: column.into(),
            exclude: None,
        }
    }

    /// Ignores the row whose `column` equals `value`.
    #[must_use]
    pub fn excluding(mut self, column: impl Into<String>, value: Value) -> Self {
        self.exclude = Some((column.into(), value));
        self
    }

    /// Returns the checked table.
    #[must_use]
    pub fn table(&self) -> &str {
        &self.table
    }

    /// Returns the checked column.
    #[must_use]
    pub fn column(&self) -> &str {
        &self.column
    }

    /// Returns the excluded row key, if any.
    #[must_use]
    pub const fn exclude(&self) -> Option<&(String, Value)> {
        self.exclude.as_ref()
    }

    fn check(&self, value: &Value) -> CheckResult {
        if value.is_null() {
            return Ok(());
        }
        let mut query = LookupQuery::new(&self.table).filter(&self.column, value.clone());
        query.exclude.clone_from(&self.exclude);
        trace!(table = %self.table, column = %self.column, "checking uniqueness");
        let taken = self.store.exists(&query)?;
        ensure(!taken, || ValidationError::new("unique"))
    }
}

impl fmt::Debug for UniqueCheck {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UniqueCheck")
            .field("table", &self.table)
            .field("column", &self.column)
            .field("exclude", &self.exclude)
            .finish_non_exhaustive()
    }
}

impl PartialEq for UniqueCheck {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.store, &other.store)
            && self.table == other.table
            && self.column == other.column
            && self.exclude == other.exclude
    }
}

/// Store-backed existence check for referenced rows.
#[derive(Clone)]
pub struct RelatedCheck {
    store: Arc<dyn RowLookup>,
    table: String,
    column: String,
    many: bool,
}

impl RelatedCheck {
    /// Creates a check for a single reference into `table` by `column`.
    pub fn single(
        store: Arc<dyn RowLookup>,
        table: impl Into<String>,
        column: impl Into<String>,
    ) -> Self {
        Self {
            store,
            table: table.into(),
            column: column.into(),
            many: false,
        }
    }

    /// Creates a check for a list of references into `table` by `column`.
    pub fn many(
        store: Arc<dyn RowLookup>,
        table: impl Into<String>,
        column: impl Into<String>,
    ) -> Self {
        Self {
            many: true,
            ..Self::single(store, table, column)
        }
    }

    /// Returns the referenced table.
    #[must_use]
    pub fn table(&self) -> &str {
        &self.table
    }

    /// Returns the lookup column in the referenced table.
    #[must_use]
    pub fn column(&self) -> &str {
        &self.column
    }

    /// Returns `true` when the check accepts a list of references.
    #[must_use]
    pub const fn is_many(&self) -> bool {
        self.many
    }

    fn exists(&self, key: &Value) -> Result<bool, CheckError> {
        let query = LookupQuery::new(&self.table).filter(&self.column, key.clone());
        trace!(table = %self.table, column = %self.column, "checking reference");
        Ok(self.store.exists(&query)?)
    }

    fn check(&self, value: &Value) -> CheckResult {
        let found = match value {
            Value::Null => true,
            Value::List(keys) => {
                let mut all = true;
                for key in keys.iter().filter(|key| !key.is_missing()) {
                    if !self.exists(key)? {
                        all = false;
                        break;
                    }
                }
                all
            }
            key if key.is_missing() => true,
            key => self.exists(key)?,
        };
        ensure(found, || {
            ValidationError::new("related")
                .with_param("field", self.column.as_str())
                .with_param("values", value.clone())
        })
    }
}

impl fmt::Debug for RelatedCheck {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RelatedCheck")
            .field("table", &self.table)
            .field("column", &self.column)
            .field("many", &self.many)
            .finish_non_exhaustive()
    }
}

impl PartialEq for RelatedCheck {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.store, &other.store)
            && self.table == other.table
            && self.column == other.column
            && self.many == other.many
    }
}
