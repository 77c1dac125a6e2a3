//! Rules driven by the property's type alone, plus the two that add one
//! keyword on top of it (`multipleOf`, `uniqueItems`).

use serde_json::Value;

use crate::error::CompileError;
use crate::rules::applied::{param_value, AppliedRule};
use crate::schema::{keywords, Property, TypeCategory};

pub(crate) const NUMERIC: &str = "numeric";
pub(crate) const BOOLEAN: &str = "boolean";
pub(crate) const ARRAY: &str = "array";
pub(crate) const DISTINCT: &str = "distinct";
pub(crate) const MULTIPLE_OF: &str = "multiple_of";

pub(crate) fn check_numeric(property: &Property) -> Result<bool, CompileError> {
    property.is_of_type(TypeCategory::Numeric)
}

// Values that merely cast to booleans (1, "0", ...) are not accepted.
pub(crate) fn check_boolean(property: &Property) -> Result<bool, CompileError> {
    property.is_of_type(TypeCategory::Boolean)
}

pub(crate) fn check_array(property: &Property) -> Result<bool, CompileError> {
    property.is_of_type(TypeCategory::Array)
}

pub(crate) fn check_distinct(property: &Property) -> Result<bool, CompileError> {
    if !property.is_of_type(TypeCategory::Array)? {
        return Ok(false);
    }
    Ok(property.get_option(keywords::UNIQUE_ITEMS) == Some(&Value::Bool(true)))
}

pub(crate) fn check_multiple_of(property: &Property) -> Result<bool, CompileError> {
    if !property.is_of_type(TypeCategory::Numeric)? {
        return Ok(false);
    }
    Ok(property.has_option(keywords::MULTIPLE_OF))
}

pub(crate) fn apply_multiple_of(property: &Property) -> AppliedRule {
    let value = property
        .get_option(keywords::MULTIPLE_OF)
        .map(param_value)
        .unwrap_or_default();
    AppliedRule::with_param(MULTIPLE_OF, value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_numeric_family() {
        for ty in ["integer", "number", "float"] {
            let property = Property::new("n", &json!({ "type": ty }));
            assert!(check_numeric(&property).unwrap());
        }
        let property = Property::new("s", &json!({"type": "string"}));
        assert!(!check_numeric(&property).unwrap());
    }

    #[test]
    fn test_distinct_requires_literal_true() {
        let unique = Property::new("tags", &json!({"type": "array", "uniqueItems": true}));
        let not_unique = Property::new("tags", &json!({"type": "array", "uniqueItems": false}));
        let stringly = Property::new("tags", &json!({"type": "array", "uniqueItems": "true"}));

        assert!(check_distinct(&unique).unwrap());
        assert!(!check_distinct(&not_unique).unwrap());
        assert!(!check_distinct(&stringly).unwrap());
    }

    #[test]
    fn test_multiple_of() {
        let property = Property::new("n", &json!({"type": "number", "multipleOf": 0.5}));
        assert!(check_multiple_of(&property).unwrap());
        assert_eq!(apply_multiple_of(&property).to_string(), "multiple_of:0.5");

        let string = Property::new("s", &json!({"type": "string", "multipleOf": 5}));
        assert!(!check_multiple_of(&string).unwrap());
    }
}
