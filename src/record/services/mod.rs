//! Field derivation and record-bound validation.

pub mod introspect;
mod model_validator;

pub use introspect::{derive_field, derive_fields};
pub use model_validator::ModelValidator;
