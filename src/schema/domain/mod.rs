//! Domain model for field validation.
//!
//! Values, fields, rules, messages and outcomes are plain data with no
//! knowledge of where input comes from. Store access is reached only through
//! the [`crate::schema::ports::RowLookup`] port held by store-backed rules.

pub mod coerce;
mod error;
mod field;
mod messages;
mod options;
mod outcome;
mod rule;
mod value;

pub use error::{
    CheckError, CoercionError, EngineResult, LookupError, OptionsError, SchemaDefinitionError,
    ValidationError,
};
pub use field::{Field, FieldContext, FieldDefault, FieldKind};
pub use messages::{DEFAULT_MESSAGES, FALLBACK_MESSAGE, MessageCatalog, default_message};
pub use options::{FieldScope, ValidatorOptions};
pub use outcome::{BASE_ERROR_KEY, ValidationOutcome};
pub use rule::{
    CheckResult, Choices, CustomRule, Pattern, Predicate, RegexFlags, RelatedCheck, Rule,
    UniqueCheck,
};
pub use value::{Data, Value};
