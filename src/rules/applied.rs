//! Typed rule output and its wire format.

use std::fmt::{self, Display};

use serde_json::Value;

/// Separates a rule name from its parameters in the wire format.
pub const SEPARATOR: char = ':';

/// Separates parameters from each other in the wire format.
pub const PARAM_SEPARATOR: char = ',';

/// The rule appended to properties listed in `required`.
pub const REQUIRED: &str = "required";

/// One rule fragment produced for a property: a name plus parameters.
///
/// Rules stay in this form until they leave the crate; [`Display`] renders
/// the wire format `name` or `name:p1,p2,...`.
///
/// # Example
///
/// ```rust
/// use data_contracts::AppliedRule;
///
/// let rule = AppliedRule::with_params("between", ["5", "10"]);
/// assert_eq!(rule.name(), "between");
/// assert_eq!(rule.to_string(), "between:5,10");
///
/// assert_eq!(AppliedRule::new("numeric").to_string(), "numeric");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct AppliedRule {
    name: &'static str,
    params: Vec<String>,
}

impl AppliedRule {
    /// A rule without parameters.
    pub fn new(name: &'static str) -> Self {
        Self {
            name,
            params: Vec::new(),
        }
    }

    pub fn with_params<I, S>(name: &'static str, params: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            name,
            params: params.into_iter().map(Into::into).collect(),
        }
    }

    /// A rule with a single parameter.
    pub fn with_param(name: &'static str, param: impl Into<String>) -> Self {
        Self {
            name,
            params: vec![param.into()],
        }
    }

    /// The `required` marker.
    pub fn required() -> Self {
        Self::new(REQUIRED)
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn params(&self) -> &[String] {
        &self.params
    }
}

impl Display for AppliedRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name)?;
        for (i, param) in self.params.iter().enumerate() {
            let sep = if i == 0 { SEPARATOR } else { PARAM_SEPARATOR };
            write!(f, "{}{}", sep, param)?;
        }
        Ok(())
    }
}

/// Renders a schema value as a rule parameter.
///
/// Strings are used verbatim. Whole floats drop their fraction (`100.0`
/// becomes `100`), booleans become `1` or the empty string and `null`
/// becomes the empty string. Nested arrays and objects are rendered as
/// compact JSON.
pub fn param_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => match n.as_f64() {
            Some(f) if n.is_f64() && f.fract() == 0.0 && f.abs() < 1e15 => {
                format!("{}", f as i64)
            }
            _ => n.to_string(),
        },
        Value::Bool(true) => "1".to_string(),
        Value::Bool(false) | Value::Null => String::new(),
        Value::Array(_) | Value::Object(_) => value.to_string(),
    }
}
