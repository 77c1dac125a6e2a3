//! `min`, `max`, `between` and `size`.
//!
//! All four read one pair of bound keywords chosen by the property's type:
//! `minLength`/`maxLength` for strings, `minItems`/`maxItems` for arrays and
//! `minimum`/`maximum` otherwise. Their predicates are mutually exclusive:
//! equal bounds yield `size` only, distinct bounds yield any of `min`,
//! `max` and `between` that have the keywords they need.
//!
//! Bounds compare as JSON values, so `5` and `5.0` are different bounds.

use serde_json::Value;

use crate::error::CompileError;
use crate::rules::applied::{param_value, AppliedRule};
use crate::schema::types::{self, is_sized};
use crate::schema::{keywords, Property};

pub(crate) const MIN: &str = "min";
pub(crate) const MAX: &str = "max";
pub(crate) const BETWEEN: &str = "between";
pub(crate) const SIZE: &str = "size";

/// Keywords holding the lower and upper bound for a resolved type.
fn bound_keywords(resolved: &str) -> (&'static str, &'static str) {
    match resolved {
        types::STRING => (keywords::MIN_LENGTH, keywords::MAX_LENGTH),
        types::ARRAY => (keywords::MIN_ITEMS, keywords::MAX_ITEMS),
        _ => (keywords::MINIMUM, keywords::MAXIMUM),
    }
}

struct Bounds<'a> {
    min: Option<&'a Value>,
    max: Option<&'a Value>,
}

impl Bounds<'_> {
    fn distinct(&self) -> bool {
        self.min != self.max
    }
}

/// Reads the bounds of a sized property, or `None` for any other type.
fn sized_bounds(property: &Property) -> Result<Option<Bounds<'_>>, CompileError> {
    let resolved = property.get_type()?;
    if !is_sized(resolved) {
        return Ok(None);
    }
    let (min, max) = bound_keywords(resolved);
    Ok(Some(Bounds {
        min: property.get_option(min),
        max: property.get_option(max),
    }))
}

// Only called from `apply_*`, after a `check_*` has resolved the type.
fn bounds(property: &Property) -> Bounds<'_> {
    let (min, max) = bound_keywords(property.get_type().unwrap_or_default());
    Bounds {
        min: property.get_option(min),
        max: property.get_option(max),
    }
}

pub(crate) fn check_min(property: &Property) -> Result<bool, CompileError> {
    Ok(sized_bounds(property)?.is_some_and(|b| b.min.is_some() && b.distinct()))
}

pub(crate) fn check_max(property: &Property) -> Result<bool, CompileError> {
    Ok(sized_bounds(property)?.is_some_and(|b| b.max.is_some() && b.distinct()))
}

pub(crate) fn check_between(property: &Property) -> Result<bool, CompileError> {
    Ok(sized_bounds(property)?
        .is_some_and(|b| b.min.is_some() && b.max.is_some() && b.distinct()))
}

pub(crate) fn check_size(property: &Property) -> Result<bool, CompileError> {
    Ok(sized_bounds(property)?
        .is_some_and(|b| b.min.is_some() && b.max.is_some() && !b.distinct()))
}

fn render(bound: Option<&Value>) -> String {
    bound.map(param_value).unwrap_or_default()
}

pub(crate) fn apply_min(property: &Property) -> AppliedRule {
    AppliedRule::with_param(MIN, render(bounds(property).min))
}

pub(crate) fn apply_max(property: &Property) -> AppliedRule {
    AppliedRule::with_param(MAX, render(bounds(property).max))
}

pub(crate) fn apply_between(property: &Property) -> AppliedRule {
    let b = bounds(property);
    AppliedRule::with_params(BETWEEN, [render(b.min), render(b.max)])
}

pub(crate) fn apply_size(property: &Property) -> AppliedRule {
    AppliedRule::with_param(SIZE, render(bounds(property).min))
}
