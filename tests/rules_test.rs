//! Tests for the rule fragments generated from each schema construct.

#![recursion_limit = "256"]

use data_contracts::{Contract, RuleMap};
use serde_json::json;

fn rules_contract() -> Contract {
    Contract::from_value(
        "Rules",
        &json!({
            "type": "object",
            "properties": {
                "id": {"type": "integer"},
                "date": {"type": "string", "format": "date"},
                "dateTime": {"type": "string", "format": "date-time"},
                "email": {"type": "string", "format": "email"},
                "enum": {"type": "string", "enum": ["one", "two", "three"]},
                "mixedEnum": {"enum": [1, 2, 3, "four", "five"]},
                "notIn": {"not": {"enum": [1, 2, 3]}},
                "notArray": {"type": "array", "not": {"enum": ["un", "deux", "trois"]}},
                "max": {"type": "integer", "maximum": 100},
                "maxString": {"type": "string", "maxLength": 100},
                "maxArray": {"type": "array", "maxItems": 3},
                "min": {"type": "number", "minimum": 100},
                "minString": {"type": "string", "minLength": 100},
                "minArray": {"type": "array", "minItems": 2},
                "fortyTwo": {"type": "integer", "minimum": 42, "maximum": 42},
                "tenChar": {"type": "string", "minLength": 10, "maxLength": 10},
                "sevenElements": {"type": "array", "minItems": 7, "maxItems": 7},
                "between": {"type": "integer", "minimum": 5, "maximum": 10},
                "betweenString": {"type": "string", "minLength": 3, "maxLength": 8},
                "betweenArray": {"type": "array", "minItems": 1, "maxItems": 5},
                "regex": {"type": "string", "pattern": "^[A-C][0-9]{3}$"},
                "regexAlpha": {"type": "string", "pattern": "^[\\pL\\pM]+$"},
                "regexAlphaDash": {"type": "string", "pattern": "^[\\pL\\pM\\pN_-]+$"},
                "regexAlphaNum": {"type": "string", "pattern": "^[\\pL\\pM\\pN]+$"},
                "startsWith": {"type": "string", "pattern": "^word.*$"},
                "startsWithMultiple": {"type": "string", "pattern": "^one|two.*$"},
                "notRegex": {"not": {"type": "string", "pattern": "^[0-9]*$"}},
                "ipv4": {"type": "string", "format": "ipv4"},
                "ipv6": {"type": "string", "format": "ipv6"},
                "multipleOf": {"type": "integer", "multipleOf": 5},
                "dateFormat": {"type": "string", "format": "full-date full-time"},
                "fullDate": {"type": "string", "format": "full-date"},
                "fullTime": {"type": "string", "format": "full-time"},
                "url": {"type": "string", "format": "uri"},
                "boolean": {"type": "boolean"},
                "array": {"type": "array"},
                "distinct": {"type": "array", "uniqueItems": true},
                "image": {
                    "type": "string",
                    "contentEncoding": "base64",
                    "contentMediaType": "image/png"
                },
                "allOf": {
                    "allOf": [
                        {"type": "string", "minLength": 3},
                        {"enum": ["one", "two", "three"]},
                        {"type": "string", "maxLength": 100}
                    ]
                }
            },
            "required": ["email"]
        }),
    )
    .unwrap()
}

fn rules() -> RuleMap {
    rules_contract().validation_rules().unwrap()
}

#[test]
fn test_date_rule() {
    let rules = rules();
    assert_eq!(rules["date"], vec!["date"]);
    assert_eq!(rules["dateTime"], vec!["date"]);
}

#[test]
fn test_email_rule() {
    assert_eq!(rules()["email"], vec!["email", "required"]);
}

#[test]
fn test_in_rule() {
    let rules = rules();
    assert_eq!(rules["enum"], vec!["in:one,two,three"]);
    assert_eq!(rules["mixedEnum"], vec!["in:1,2,3,four,five"]);
}

#[test]
fn test_not_in_rule() {
    let rules = rules();
    assert_eq!(rules["notIn"], vec!["not_in:1,2,3"]);
    // `not` replaces the outer options, so the array type is gone
    assert_eq!(rules["notArray"], vec!["not_in:un,deux,trois"]);
}

#[test]
fn test_max_rule() {
    let rules = rules();
    assert_eq!(rules["max"], vec!["max:100", "numeric"]);
    assert_eq!(rules["maxString"], vec!["max:100"]);
    assert_eq!(rules["maxArray"], vec!["array", "max:3"]);
}

#[test]
fn test_min_rule() {
    let rules = rules();
    assert_eq!(rules["min"], vec!["min:100", "numeric"]);
    assert_eq!(rules["minString"], vec!["min:100"]);
    assert_eq!(rules["minArray"], vec!["array", "min:2"]);
}

#[test]
fn test_size_rule() {
    let rules = rules();
    assert_eq!(rules["fortyTwo"], vec!["numeric", "size:42"]);
    assert_eq!(rules["tenChar"], vec!["size:10"]);
    assert_eq!(rules["sevenElements"], vec!["array", "size:7"]);
}

#[test]
fn test_between_rule() {
    let rules = rules();
    assert!(rules["between"].contains(&"between:5,10".to_string()));
    assert!(rules["betweenString"].contains(&"between:3,8".to_string()));
    assert!(rules["betweenArray"].contains(&"between:1,5".to_string()));

    assert_eq!(rules["between"], vec!["between:5,10", "max:10", "min:5", "numeric"]);
}

#[test]
fn test_regex_rule() {
    let rules = rules();
    assert_eq!(rules["regex"], vec!["regex:^[A-C][0-9]{3}$"]);
    assert_eq!(rules["regexAlpha"], vec!["alpha"]);
    assert_eq!(rules["regexAlphaDash"], vec!["alpha_dash"]);
    assert_eq!(rules["regexAlphaNum"], vec!["alpha_num"]);
    assert_eq!(rules["startsWith"], vec!["starts_with:word"]);
    assert_eq!(rules["startsWithMultiple"], vec!["starts_with:one,two"]);
}

#[test]
fn test_not_regex_rule() {
    assert_eq!(rules()["notRegex"], vec!["not_regex:^[0-9]*$"]);
}

#[test]
fn test_ip_rule() {
    let rules = rules();
    assert_eq!(rules["ipv4"], vec!["ip"]);
    assert_eq!(rules["ipv6"], vec!["ip"]);
}

#[test]
fn test_multiple_of_rule() {
    assert_eq!(rules()["multipleOf"], vec!["multiple_of:5", "numeric"]);
}

#[test]
fn test_date_format_rule() {
    let rules = rules();
    assert_eq!(rules["dateFormat"], vec!["date_format:Y-m-d h:i:s"]);
    assert_eq!(rules["fullDate"], vec!["date_format:Y-m-d"]);
    assert_eq!(rules["fullTime"], vec!["date_format:h:i:s"]);
}

#[test]
fn test_url_rule() {
    assert_eq!(rules()["url"], vec!["url"]);
}

#[test]
fn test_boolean_rule() {
    assert_eq!(rules()["boolean"], vec!["boolean"]);
}

#[test]
fn test_array_rule() {
    assert_eq!(rules()["array"], vec!["array"]);
}

#[test]
fn test_distinct_rule() {
    assert_eq!(rules()["distinct"], vec!["array", "distinct"]);
}

#[test]
fn test_image_rule() {
    assert_eq!(rules()["image"], vec!["image"]);
}

#[test]
fn test_all_of_members_are_appended_in_order() {
    assert_eq!(rules()["allOf"], vec!["min:3", "in:one,two,three", "max:100"]);
}

#[test]
fn test_identifier_has_no_rules() {
    assert!(!rules().contains_key("id"));
}

#[test]
fn test_every_property_is_listed_in_schema_order() {
    let contract = rules_contract();
    let rules = contract.validation_rules().unwrap();

    let keys: Vec<&String> = rules.keys().collect();
    let described = contract.describe();
    assert_eq!(keys, described.iter().collect::<Vec<_>>());
}

#[test]
fn test_only_listed_properties_are_required() {
    let rules = rules();
    let required: Vec<&String> = rules
        .iter()
        .filter(|(_, r)| r.last().is_some_and(|last| last == "required"))
        .map(|(name, _)| name)
        .collect();
    assert_eq!(required, vec!["email"]);
}
