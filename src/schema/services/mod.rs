//! Schema declaration and the validation engine.

mod definition;
mod engine;

pub use definition::Schema;
pub use engine::Validator;
