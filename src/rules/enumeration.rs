//! `in` and `not_in`, derived from `enum`.

use serde_json::Value;

use crate::rules::applied::{param_value, AppliedRule};
use crate::schema::{keywords, Modifier, Property};

pub(crate) const IN: &str = "in";
pub(crate) const NOT_IN: &str = "not_in";

pub(crate) fn check_in(property: &Property) -> bool {
    property.modifier() != Some(Modifier::Not) && property.has_option(keywords::ENUM)
}

pub(crate) fn check_not_in(property: &Property) -> bool {
    property.modifier() == Some(Modifier::Not) && property.has_option(keywords::ENUM)
}

pub(crate) fn apply_in(property: &Property) -> AppliedRule {
    AppliedRule::with_params(IN, enum_values(property))
}

pub(crate) fn apply_not_in(property: &Property) -> AppliedRule {
    AppliedRule::with_params(NOT_IN, enum_values(property))
}

/// The `enum` values in schema order. A scalar `enum` counts as one value.
fn enum_values(property: &Property) -> Vec<String> {
    match property.get_option(keywords::ENUM) {
        Some(Value::Array(values)) => values.iter().map(param_value).collect(),
        Some(value) => vec![param_value(value)],
        None => Vec::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_in_keeps_schema_order() {
        let property = Property::new("mixed", &json!({"enum": [1, 2, 3, "four", "five"]}));
        assert!(check_in(&property));
        assert!(!check_not_in(&property));
        assert_eq!(apply_in(&property).to_string(), "in:1,2,3,four,five");
    }

    #[test]
    fn test_not_modifier_switches_to_not_in() {
        let property = Property::new("code", &json!({"not": {"enum": ["un", "deux", "trois"]}}));
        assert!(!check_in(&property));
        assert!(check_not_in(&property));
        assert_eq!(apply_not_in(&property).to_string(), "not_in:un,deux,trois");
    }

    #[test]
    fn test_all_of_does_not_block_in() {
        let property = Property::new("code", &json!({"allOf": [], "enum": ["a"]}));
        assert!(check_in(&property));
    }

    #[test]
    fn test_without_enum() {
        let property = Property::new("code", &json!({"type": "string"}));
        assert!(!check_in(&property));
        assert!(!check_not_in(&property));
    }
}
