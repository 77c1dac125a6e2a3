//! `regex` and `not_regex`, derived from `pattern`.
//!
//! A few patterns map onto dedicated rules instead of a raw regex:
//!
//! | pattern            | rule         |
//! |--------------------|--------------|
//! | `^[\pL\pM]+$`      | `alpha`      |
//! | `^[\pL\pM\pN_-]+$` | `alpha_dash` |
//! | `^[\pL\pM\pN]+$`   | `alpha_num`  |
//!
//! A pattern is treated as a prefix match when, with every `^` and `.*$`
//! removed, it starts with an ASCII letter. Alternation in the prefix
//! becomes the parameter separator, so `^one|two.*$` yields
//! `starts_with:one,two`.

use std::sync::OnceLock;

use regex::Regex;

use crate::error::CompileError;
use crate::rules::applied::{param_value, AppliedRule};
use crate::schema::{keywords, Modifier, Property, TypeCategory};

pub(crate) const REGEX: &str = "regex";
pub(crate) const NOT_REGEX: &str = "not_regex";
pub(crate) const ALPHA: &str = "alpha";
pub(crate) const ALPHA_DASH: &str = "alpha_dash";
pub(crate) const ALPHA_NUM: &str = "alpha_num";
pub(crate) const STARTS_WITH: &str = "starts_with";

const SPECIAL_PATTERNS: [(&str, &str); 3] = [
    (ALPHA, r"^[\pL\pM]+$"),
    (ALPHA_DASH, r"^[\pL\pM\pN_-]+$"),
    (ALPHA_NUM, r"^[\pL\pM\pN]+$"),
];

const PREFIX_ANCHOR: &str = "^";
const PREFIX_TAIL: &str = ".*$";

fn leading_word() -> &'static Regex {
    static LEADING_WORD: OnceLock<Regex> = OnceLock::new();
    LEADING_WORD.get_or_init(|| Regex::new(r"^[A-Za-z]+").expect("leading word pattern is valid"))
}

fn string_pattern(property: &Property) -> Result<bool, CompileError> {
    Ok(property.is_of_type(TypeCategory::String)? && property.has_option(keywords::PATTERN))
}

pub(crate) fn check_regex(property: &Property) -> Result<bool, CompileError> {
    Ok(string_pattern(property)? && property.modifier() != Some(Modifier::Not))
}

pub(crate) fn check_not_regex(property: &Property) -> Result<bool, CompileError> {
    Ok(string_pattern(property)? && property.modifier() == Some(Modifier::Not))
}

fn pattern(property: &Property) -> String {
    property
        .get_option(keywords::PATTERN)
        .map(param_value)
        .unwrap_or_default()
}

pub(crate) fn apply_regex(property: &Property) -> AppliedRule {
    let pattern = pattern(property);

    if let Some((name, _)) = SPECIAL_PATTERNS.iter().find(|(_, p)| *p == pattern) {
        return AppliedRule::new(*name);
    }

    let prefix = pattern.replace(PREFIX_ANCHOR, "").replace(PREFIX_TAIL, "");
    if leading_word().is_match(&prefix) {
        return AppliedRule::with_params(STARTS_WITH, prefix.split('|'));
    }

    AppliedRule::with_param(REGEX, pattern)
}

pub(crate) fn apply_not_regex(property: &Property) -> AppliedRule {
    AppliedRule::with_param(NOT_REGEX, pattern(property))
}
