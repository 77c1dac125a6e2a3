//! Classification of JSON Schema primitive types.
//!
//! Rules never look at a raw `type` string directly. They ask whether a
//! property belongs to a [`TypeCategory`], which folds the numeric types
//! (`integer`, `number`, `float`) into one family.

pub const STRING: &str = "string";
pub const BOOLEAN: &str = "boolean";
pub const ARRAY: &str = "array";
pub const INTEGER: &str = "integer";
pub const NUMBER: &str = "number";
pub const FLOAT: &str = "float";

/// The numeric family.
pub const NUMERIC_TYPES: [&str; 3] = [INTEGER, NUMBER, FLOAT];

/// Every type a rule knows how to handle.
pub const KNOWN_TYPES: [&str; 6] = [STRING, BOOLEAN, ARRAY, INTEGER, NUMBER, FLOAT];

/// A semantic category a property's type can be tested against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TypeCategory {
    String,
    Boolean,
    Array,
    /// `integer`, `number` or `float`.
    Numeric,
    /// Any of [`KNOWN_TYPES`].
    Any,
}

impl TypeCategory {
    /// Returns true if the resolved type string falls into this category.
    pub fn matches(self, resolved: &str) -> bool {
        match self {
            TypeCategory::String => resolved == STRING,
            TypeCategory::Boolean => resolved == BOOLEAN,
            TypeCategory::Array => resolved == ARRAY,
            TypeCategory::Numeric => is_numeric(resolved),
            TypeCategory::Any => KNOWN_TYPES.contains(&resolved),
        }
    }
}

pub fn is_numeric(resolved: &str) -> bool {
    NUMERIC_TYPES.contains(&resolved)
}

/// Types that carry a size: numbers by value, strings by length, arrays by
/// item count.
pub fn is_sized(resolved: &str) -> bool {
    is_numeric(resolved) || resolved == STRING || resolved == ARRAY
}
