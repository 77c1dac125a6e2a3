//! A single schema property, normalized for rule evaluation.

use serde_json::{Map, Value};

use crate::error::CompileError;
use crate::path::SchemaPath;
use crate::schema::keywords;
use crate::schema::types::TypeCategory;

/// A schema combinator the compiler handles specially.
///
/// `anyOf` and `oneOf` are not recognized.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Modifier {
    /// `not`: the wrapped sub-schema replaces the property's options.
    Not,
    /// `allOf`: members are compiled separately and appended.
    AllOf,
}

/// One property definition from a schema's `properties` object.
///
/// Construction resolves modifiers once:
///
/// - `not` is detected first. Its sub-object becomes the effective option
///   set and the property is tagged [`Modifier::Not`].
/// - `allOf` is detected on the resulting options. The property is tagged
///   [`Modifier::AllOf`] and the member list is left in place; the compiler
///   iterates the members through [`Property::all_of_members`].
///
/// A keyword whose value is JSON `null` counts as absent.
///
/// # Example
///
/// ```rust
/// use data_contracts::{Modifier, Property};
/// use serde_json::json;
///
/// let property = Property::new("code", &json!({"not": {"enum": [1, 2, 3]}}));
///
/// assert_eq!(property.modifier(), Some(Modifier::Not));
/// assert!(property.has_option("enum"));
/// assert_eq!(property.get_type().unwrap(), "");
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Property {
    name: String,
    path: SchemaPath,
    options: Map<String, Value>,
    modifier: Option<Modifier>,
}

impl Property {
    /// Builds a top-level property located at `properties.<name>`.
    pub fn new(name: impl Into<String>, options: &Value) -> Self {
        let name = name.into();
        let path = SchemaPath::property(name.clone());
        Self::at(name, path, options)
    }

    /// Builds a property whose definition lives at `path`.
    ///
    /// Anything other than a JSON object yields an empty option set.
    pub fn at(name: impl Into<String>, path: SchemaPath, options: &Value) -> Self {
        let mut options = options.as_object().cloned().unwrap_or_default();
        let mut modifier = None;

        if let Some(inner) = options.get(keywords::NOT).filter(|v| !v.is_null()) {
            options = inner.as_object().cloned().unwrap_or_default();
            modifier = Some(Modifier::Not);
        }

        if options.get(keywords::ALL_OF).is_some_and(|v| !v.is_null()) {
            modifier = Some(Modifier::AllOf);
        }

        Self {
            name: name.into(),
            path,
            options,
            modifier,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Where this property's definition lives in the schema document.
    pub fn path(&self) -> &SchemaPath {
        &self.path
    }

    pub fn modifier(&self) -> Option<Modifier> {
        self.modifier
    }

    /// Returns the declared type.
    ///
    /// A property without `type` resolves to the empty string when it can be
    /// typeless (it carries a modifier or an `enum`). A `type` that is not a
    /// string (e.g. `["string", "null"]`) also resolves to the empty string,
    /// so it falls into no category.
    ///
    /// # Errors
    ///
    /// Returns [`CompileError::TypeUndefined`] when the type is missing and
    /// the property cannot be typeless.
    pub fn get_type(&self) -> Result<&str, CompileError> {
        if let Some(ty) = self.get_option(keywords::TYPE) {
            return Ok(ty.as_str().unwrap_or(""));
        }

        if self.can_be_typeless() {
            return Ok("");
        }

        Err(CompileError::TypeUndefined {
            property: self.name.clone(),
            path: self.path.clone(),
        })
    }

    /// Returns true if the resolved type falls into `category`.
    ///
    /// # Errors
    ///
    /// Propagates [`CompileError::TypeUndefined`] from [`Property::get_type`].
    pub fn is_of_type(&self, category: TypeCategory) -> Result<bool, CompileError> {
        Ok(category.matches(self.get_type()?))
    }

    pub fn has_option(&self, key: &str) -> bool {
        self.get_option(key).is_some()
    }

    /// Looks up a keyword in the normalized option set. Never fails.
    pub fn get_option(&self, key: &str) -> Option<&Value> {
        self.options.get(key).filter(|v| !v.is_null())
    }

    /// Convenience lookup for keywords holding a string.
    pub fn get_str(&self, key: &str) -> Option<&str> {
        self.get_option(key).and_then(Value::as_str)
    }

    /// Builds the `allOf` members as independent properties sharing this
    /// property's name, in schema order.
    ///
    /// Returns an empty list unless the property carries [`Modifier::AllOf`].
    pub fn all_of_members(&self) -> Vec<Property> {
        if self.modifier != Some(Modifier::AllOf) {
            return Vec::new();
        }

        self.get_option(keywords::ALL_OF)
            .and_then(Value::as_array)
            .map(|members| {
                members
                    .iter()
                    .enumerate()
                    .map(|(i, member)| {
                        Property::at(self.name.clone(), self.path.push_all_of(i), member)
                    })
                    .collect()
            })
            .unwrap_or_default()
    }

    fn can_be_typeless(&self) -> bool {
        self.modifier.is_some() || self.has_option(keywords::ENUM)
    }
}
