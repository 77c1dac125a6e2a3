//! Schema-side building blocks for rule compilation.
//!
//! A contract's raw `properties` map is turned into [`Property`] values that
//! answer type and option queries. [`TypeCategory`] classifies primitive
//! types; [`keywords`] names every JSON Schema keyword the rules read.

pub mod keywords;
mod property;
pub mod types;

pub use property::{Modifier, Property};
pub use types::TypeCategory;
