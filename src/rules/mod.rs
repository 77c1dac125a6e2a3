//! Validation rules derived from schema properties.
//!
//! [`Rule`] is the closed set of rule kinds. Each kind decides whether it
//! applies to a [`Property`] ([`Rule::check`]) and, if so, produces an
//! [`AppliedRule`] ([`Rule::evaluate`]). [`RulesRegistry`] lists every kind in
//! a stable, sorted order.
//!
//! # Example
//!
//! ```rust
//! use data_contracts::{Property, Rule};
//! use serde_json::json;
//!
//! let property = Property::new("age", &json!({"type": "integer", "minimum": 0}));
//!
//! assert!(Rule::Min.check(&property).unwrap());
//! let min = Rule::Min.evaluate(&property).unwrap().unwrap();
//! assert_eq!(min.to_string(), "min:0");
//! assert_eq!(Rule::Email.evaluate(&property).unwrap(), None);
//! ```

mod applied;
mod bounds;
mod enumeration;
mod format;
mod kind;
mod pattern;
mod registry;

pub use applied::{param_value, AppliedRule, PARAM_SEPARATOR, REQUIRED, SEPARATOR};
pub use registry::RulesRegistry;

use crate::error::CompileError;
use crate::schema::Property;

/// Every rule kind the compiler knows.
///
/// Rules are stateless: the same property always yields the same answer.
/// Checks that need the property's type propagate
/// [`CompileError::TypeUndefined`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Rule {
    Array,
    Between,
    Boolean,
    Date,
    DateFormat,
    Distinct,
    Email,
    Image,
    In,
    IpAddress,
    Max,
    Min,
    MultipleOf,
    NotIn,
    NotRegex,
    Numeric,
    Regex,
    Size,
    Url,
}

impl Rule {
    /// Stable identifier used to order the registry.
    pub fn identifier(self) -> &'static str {
        match self {
            Rule::Array => "ArrayRule",
            Rule::Between => "Between",
            Rule::Boolean => "Boolean",
            Rule::Date => "Date",
            Rule::DateFormat => "DateFormat",
            Rule::Distinct => "Distinct",
            Rule::Email => "Email",
            Rule::Image => "Image",
            Rule::In => "In",
            Rule::IpAddress => "IpAddress",
            Rule::Max => "Max",
            Rule::Min => "Min",
            Rule::MultipleOf => "MultipleOf",
            Rule::NotIn => "NotIn",
            Rule::NotRegex => "NotRegex",
            Rule::Numeric => "Numeric",
            Rule::Regex => "Regex",
            Rule::Size => "Size",
            Rule::Url => "Url",
        }
    }

    /// Decides whether this rule applies to `property`.
    ///
    /// # Errors
    ///
    /// Returns [`CompileError::TypeUndefined`] when the decision depends on
    /// a type the property does not declare.
    pub fn check(self, property: &Property) -> Result<bool, CompileError> {
        match self {
            Rule::Array => kind::check_array(property),
            Rule::Between => bounds::check_between(property),
            Rule::Boolean => kind::check_boolean(property),
            Rule::Date => format::check_date(property),
            Rule::DateFormat => format::check_date_format(property),
            Rule::Distinct => kind::check_distinct(property),
            Rule::Email => format::check_email(property),
            Rule::Image => format::check_image(property),
            Rule::In => Ok(enumeration::check_in(property)),
            Rule::IpAddress => format::check_ip_address(property),
            Rule::Max => bounds::check_max(property),
            Rule::Min => bounds::check_min(property),
            Rule::MultipleOf => kind::check_multiple_of(property),
            Rule::NotIn => Ok(enumeration::check_not_in(property)),
            Rule::NotRegex => pattern::check_not_regex(property),
            Rule::Numeric => kind::check_numeric(property),
            Rule::Regex => pattern::check_regex(property),
            Rule::Size => bounds::check_size(property),
            Rule::Url => format::check_url(property),
        }
    }

    /// Produces the rule fragment for `property`.
    ///
    /// Only meaningful once [`Rule::check`] returned `true`; callers outside
    /// the crate go through [`Rule::evaluate`].
    pub(crate) fn apply(self, property: &Property) -> AppliedRule {
        match self {
            Rule::Array => AppliedRule::new(kind::ARRAY),
            Rule::Between => bounds::apply_between(property),
            Rule::Boolean => AppliedRule::new(kind::BOOLEAN),
            Rule::Date => AppliedRule::new(format::DATE),
            Rule::DateFormat => format::apply_date_format(property),
            Rule::Distinct => AppliedRule::new(kind::DISTINCT),
            Rule::Email => AppliedRule::new(format::EMAIL),
            Rule::Image => AppliedRule::new(format::IMAGE),
            Rule::In => enumeration::apply_in(property),
            Rule::IpAddress => AppliedRule::new(format::IP),
            Rule::Max => bounds::apply_max(property),
            Rule::Min => bounds::apply_min(property),
            Rule::MultipleOf => kind::apply_multiple_of(property),
            Rule::NotIn => enumeration::apply_not_in(property),
            Rule::NotRegex => pattern::apply_not_regex(property),
            Rule::Numeric => AppliedRule::new(kind::NUMERIC),
            Rule::Regex => pattern::apply_regex(property),
            Rule::Size => bounds::apply_size(property),
            Rule::Url => AppliedRule::new(format::URL),
        }
    }

    /// Returns the rule fragment for `property`, or `None` when the rule
    /// does not apply.
    ///
    /// ```rust
    /// use data_contracts::{Property, Rule};
    /// use serde_json::json;
    ///
    /// let text = Property::new("title", &json!({"type": "string"}));
    /// assert_eq!(Rule::DateFormat.evaluate(&text).unwrap(), None);
    /// assert_eq!(Rule::Min.evaluate(&text).unwrap(), None);
    /// ```
    pub fn evaluate(self, property: &Property) -> Result<Option<AppliedRule>, CompileError> {
        Ok(self.check(property)?.then(|| self.apply(property)))
    }
}
