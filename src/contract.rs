//! Data contracts: a named JSON Schema plus the queries built on it.

use indexmap::IndexSet;
use serde_json::{Map, Value};

use crate::compiler::{CompiledRules, Exclusion, RuleCompiler, RuleMap, DEFAULT_ID_FIELD};
use crate::error::{CompileError, ContractError};
use crate::schema::keywords;

/// A data contract parsed from a JSON Schema document.
///
/// A contract keeps its `properties` in schema file order, the set of
/// `required` property names and the name of its identifier field (`id`
/// unless overridden). The identifier is listed by [`Contract::all`] but
/// skipped by [`Contract::describe`] and by rule compilation.
///
/// # Example
///
/// ```rust
/// use data_contracts::Contract;
/// use serde_json::json;
///
/// let contract = Contract::from_value("Person", &json!({
///     "properties": {
///         "id": {"type": "integer"},
///         "name": {"type": "string", "maxLength": 100},
///         "age": {"type": "integer", "minimum": 0}
///     },
///     "required": ["name"]
/// })).unwrap();
///
/// assert_eq!(contract.all(), vec!["id", "name", "age"]);
/// assert_eq!(contract.describe(), vec!["name", "age"]);
///
/// let rules = contract.validation_rules().unwrap();
/// assert_eq!(rules["name"], vec!["max:100", "required"]);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Contract {
    name: String,
    properties: Map<String, Value>,
    required: IndexSet<String>,
    id_field: String,
}

impl Contract {
    /// Builds a contract from a parsed schema document.
    ///
    /// Missing `properties` or `required` sections count as empty.
    /// Non-string entries of `required` are ignored.
    ///
    /// # Errors
    ///
    /// - [`ContractError::NoSchema`] if the document is not an object.
    /// - [`ContractError::InvalidSection`] if `properties` is not an object
    ///   or `required` is not an array.
    pub fn from_value(name: impl Into<String>, schema: &Value) -> Result<Self, ContractError> {
        let name = name.into();
        let document = schema
            .as_object()
            .ok_or_else(|| ContractError::NoSchema(name.clone()))?;

        let properties = match document.get(keywords::PROPERTIES) {
            None | Some(Value::Null) => Map::new(),
            Some(Value::Object(properties)) => properties.clone(),
            Some(_) => {
                return Err(ContractError::InvalidSection {
                    name,
                    section: keywords::PROPERTIES,
                })
            }
        };

        let required = match document.get(keywords::REQUIRED) {
            None | Some(Value::Null) => IndexSet::new(),
            Some(Value::Array(required)) => required
                .iter()
                .filter_map(Value::as_str)
                .map(str::to_string)
                .collect(),
            Some(_) => {
                return Err(ContractError::InvalidSection {
                    name,
                    section: keywords::REQUIRED,
                })
            }
        };

        Ok(Self {
            name,
            properties,
            required,
            id_field: DEFAULT_ID_FIELD.to_string(),
        })
    }

    /// Parses schema text and builds a contract from it.
    ///
    /// # Errors
    ///
    /// Returns [`ContractError::Parse`] for invalid JSON, otherwise the
    /// errors of [`Contract::from_value`].
    pub fn from_json(name: impl Into<String>, schema: &str) -> Result<Self, ContractError> {
        let name = name.into();
        let value: Value = serde_json::from_str(schema).map_err(|source| ContractError::Parse {
            name: name.clone(),
            source,
        })?;
        Self::from_value(name, &value)
    }

    /// Uses `id_field` as the identifier instead of `id`.
    pub fn with_id_field(mut self, id_field: impl Into<String>) -> Self {
        self.id_field = id_field.into();
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn id_field(&self) -> &str {
        &self.id_field
    }

    pub fn properties(&self) -> &Map<String, Value> {
        &self.properties
    }

    pub fn required(&self) -> &IndexSet<String> {
        &self.required
    }

    /// Every property name in schema order, identifier included.
    pub fn all(&self) -> Vec<String> {
        self.properties.keys().cloned().collect()
    }

    /// Every property name in schema order, identifier excluded.
    pub fn describe(&self) -> Vec<String> {
        without_id(self.all(), &self.id_field)
    }

    fn compiler(&self) -> RuleCompiler {
        RuleCompiler::new().with_id_field(self.id_field.clone())
    }

    /// Typed rules for every property, without `required`.
    pub fn compile_rules(&self) -> Result<CompiledRules, CompileError> {
        self.compiler().compile_rules(&self.properties)
    }

    /// Rules for every property, without `required`.
    pub fn validation_rules_optional(&self) -> Result<RuleMap, CompileError> {
        self.compiler().compile(&self.properties)
    }

    /// Rules for every property, with `required` appended where listed.
    pub fn validation_rules(&self) -> Result<RuleMap, CompileError> {
        self.compiler()
            .compile_with_required(&self.properties, &self.required)
    }

    /// [`Contract::validation_rules`] minus every excluded rule name.
    ///
    /// # Example
    ///
    /// ```rust
    /// use data_contracts::Contract;
    /// use serde_json::json;
    ///
    /// let contract = Contract::from_value("Scores", &json!({
    ///     "properties": {"score": {"type": "integer", "minimum": 0, "maximum": 10}},
    ///     "required": ["score"]
    /// })).unwrap();
    ///
    /// let rules = contract.rules_except(["between", "required"]).unwrap();
    /// assert_eq!(rules["score"], vec!["max:10", "min:0", "numeric"]);
    /// ```
    pub fn rules_except(&self, excluded: impl Into<Exclusion>) -> Result<RuleMap, CompileError> {
        self.compiler()
            .compile_except(&self.properties, &self.required, excluded)
    }

    /// Keeps only the entries of `record` that this contract declares,
    /// in the record's order.
    pub fn project(&self, record: &Map<String, Value>) -> Map<String, Value> {
        record
            .iter()
            .filter(|(key, _)| self.properties.contains_key(*key))
            .map(|(key, value)| (key.clone(), value.clone()))
            .collect()
    }

    /// Builds an object holding every contract field, in contract order,
    /// with values taken from `resource` (`null` where it has none).
    pub fn map_fields(&self, resource: &Map<String, Value>) -> Map<String, Value> {
        self.properties
            .keys()
            .map(|field| {
                let value = resource.get(field).cloned().unwrap_or(Value::Null);
                (field.clone(), value)
            })
            .collect()
    }
}

pub(crate) fn without_id(fields: Vec<String>, id_field: &str) -> Vec<String> {
    fields.into_iter().filter(|f| f != id_field).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_missing_sections_are_empty() {
        let contract = Contract::from_value("Empty", &json!({"type": "object"})).unwrap();
        assert!(contract.all().is_empty());
        assert!(contract.required().is_empty());
        assert!(contract.validation_rules().unwrap().is_empty());
    }

    #[test]
    fn test_non_object_document() {
        let err = Contract::from_value("Broken", &json!([1, 2])).unwrap_err();
        assert!(matches!(err, ContractError::NoSchema(ref name) if name == "Broken"));
        assert_eq!(err.to_string(), "Broken: no schema defined");
    }

    #[test]
    fn test_wrong_section_types() {
        let err = Contract::from_value("Bad", &json!({"properties": []})).unwrap_err();
        assert!(matches!(
            err,
            ContractError::InvalidSection { section: "properties", .. }
        ));

        let err = Contract::from_value("Bad", &json!({"required": "name"})).unwrap_err();
        assert!(matches!(
            err,
            ContractError::InvalidSection { section: "required", .. }
        ));
    }

    #[test]
    fn test_invalid_json() {
        let err = Contract::from_json("Person", "{not json").unwrap_err();
        assert!(matches!(err, ContractError::Parse { .. }));
        assert!(err.to_string().starts_with("problem parsing JSON Schema for Person"));
    }

    #[test]
    fn test_required_ignores_non_strings() {
        let contract =
            Contract::from_value("P", &json!({"required": ["a", 1, null, "b"]})).unwrap();
        let required: Vec<_> = contract.required().iter().cloned().collect();
        assert_eq!(required, vec!["a", "b"]);
    }

    #[test]
    fn test_custom_id_field() {
        let contract = Contract::from_value(
            "Team",
            &json!({"properties": {"team_id": {"type": "integer"}, "name": {"type": "string"}}}),
        )
        .unwrap()
        .with_id_field("team_id");

        assert_eq!(contract.id_field(), "team_id");
        assert_eq!(contract.describe(), vec!["name"]);
        let rules = contract.validation_rules_optional().unwrap();
        assert!(!rules.contains_key("team_id"));
        assert_eq!(rules["name"], Vec::<String>::new());
    }
}
