//! Port contracts consumed by the validation engine.

mod hooks;
mod lookup;

pub use hooks::{CleanHook, NoClean};
pub use lookup::{LookupQuery, RowLookup};
