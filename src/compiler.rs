//! The contract rule compiler.
//!
//! [`RuleCompiler`] turns a schema's `properties` map into an ordered rule
//! list per property:
//!
//! 1. every property except the identifier field becomes a [`Property`];
//! 2. each rule from [`RulesRegistry::all`] is evaluated against it, in
//!    registry order;
//! 3. for an `allOf` property, every member is evaluated the same way and
//!    its rules are appended in member order;
//! 4. [`RuleCompiler::compile_with_required`] appends `required` last;
//! 5. [`RuleCompiler::compile_except`] finally drops excluded rule names.
//!
//! Compilation is pure: the same input always yields the same output, and
//! the first property that fails aborts the whole call.
//!
//! # Example
//!
//! ```rust
//! use data_contracts::RuleCompiler;
//! use indexmap::IndexSet;
//! use serde_json::json;
//!
//! let schema = json!({
//!     "id": {"type": "integer"},
//!     "age": {"type": "integer", "minimum": 0},
//!     "status": {"type": "string", "enum": ["one", "two", "three"]}
//! });
//! let properties = schema.as_object().unwrap();
//! let required: IndexSet<String> = ["age".to_string()].into_iter().collect();
//!
//! let rules = RuleCompiler::new().compile_with_required(properties, &required).unwrap();
//!
//! assert!(!rules.contains_key("id"));
//! assert_eq!(rules["age"], vec!["min:0", "numeric", "required"]);
//! assert_eq!(rules["status"], vec!["in:one,two,three"]);
//! ```

use std::collections::HashSet;

use indexmap::{IndexMap, IndexSet};
use serde_json::{Map, Value};
use tracing::{debug, trace};

use crate::error::CompileError;
use crate::rules::{AppliedRule, Rule, RulesRegistry};
use crate::schema::Property;

/// Identifier field skipped by default.
pub const DEFAULT_ID_FIELD: &str = "id";

/// Rule strings per property, in schema order.
pub type RuleMap = IndexMap<String, Vec<String>>;

/// Typed compiler output: rules per property, in schema order.
///
/// Stays typed until [`CompiledRules::to_rule_map`] serializes it.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct CompiledRules {
    rules: IndexMap<String, Vec<AppliedRule>>,
}

impl CompiledRules {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, property: impl Into<String>, rules: Vec<AppliedRule>) {
        self.rules.insert(property.into(), rules);
    }

    pub fn get(&self, property: &str) -> Option<&[AppliedRule]> {
        self.rules.get(property).map(Vec::as_slice)
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Property names in schema order.
    pub fn properties(&self) -> impl Iterator<Item = &str> {
        self.rules.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &[AppliedRule])> {
        self.rules.iter().map(|(k, v)| (k.as_str(), v.as_slice()))
    }

    /// Appends `required` to every property listed in `required`.
    pub fn with_required(mut self, required: &IndexSet<String>) -> Self {
        for (property, rules) in self.rules.iter_mut() {
            if required.contains(property) {
                rules.push(AppliedRule::required());
            }
        }
        self
    }

    /// Removes every rule whose name is excluded. Unknown names are ignored.
    pub fn except(mut self, exclusion: &Exclusion) -> Self {
        for rules in self.rules.values_mut() {
            rules.retain(|rule| !exclusion.excludes(rule.name()));
        }
        self
    }

    /// Serializes every rule to its `name:params` form.
    pub fn to_rule_map(&self) -> RuleMap {
        self.rules
            .iter()
            .map(|(property, rules)| {
                let rendered = rules.iter().map(ToString::to_string).collect();
                (property.clone(), rendered)
            })
            .collect()
    }
}

/// Rule names to drop from compiled output: one name or a set of names.
///
/// # Example
///
/// ```rust
/// use data_contracts::Exclusion;
///
/// assert!(Exclusion::from("min").excludes("min"));
/// assert!(Exclusion::from(["min", "max"]).excludes("max"));
/// assert!(!Exclusion::from("min").excludes("minimum"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Exclusion {
    One(String),
    Many(HashSet<String>),
}

impl Exclusion {
    /// Returns true if a rule with this name must be dropped.
    pub fn excludes(&self, name: &str) -> bool {
        match self {
            Exclusion::One(excluded) => excluded == name,
            Exclusion::Many(excluded) => excluded.contains(name),
        }
    }
}

impl From<&str> for Exclusion {
    fn from(name: &str) -> Self {
        Exclusion::One(name.to_string())
    }
}

impl From<String> for Exclusion {
    fn from(name: String) -> Self {
        Exclusion::One(name)
    }
}

impl From<HashSet<String>> for Exclusion {
    fn from(names: HashSet<String>) -> Self {
        Exclusion::Many(names)
    }
}

impl<S: AsRef<str>> From<Vec<S>> for Exclusion {
    fn from(names: Vec<S>) -> Self {
        Exclusion::Many(names.iter().map(|n| n.as_ref().to_string()).collect())
    }
}

impl From<&[&str]> for Exclusion {
    fn from(names: &[&str]) -> Self {
        Exclusion::Many(names.iter().map(|n| n.to_string()).collect())
    }
}

impl<const N: usize> From<[&str; N]> for Exclusion {
    fn from(names: [&str; N]) -> Self {
        Exclusion::Many(names.iter().map(|n| n.to_string()).collect())
    }
}

/// Compiles schema properties into validation rules.
///
/// The compiler holds no state besides the identifier field name, so one
/// instance can be shared between threads and reused indefinitely.
#[derive(Debug, Clone)]
pub struct RuleCompiler {
    id_field: String,
    rules: &'static [Rule],
}

impl RuleCompiler {
    /// A compiler that skips the `id` property.
    pub fn new() -> Self {
        Self {
            id_field: DEFAULT_ID_FIELD.to_string(),
            rules: RulesRegistry::all(),
        }
    }

    /// Skips `id_field` instead of `id`.
    pub fn with_id_field(mut self, id_field: impl Into<String>) -> Self {
        self.id_field = id_field.into();
        self
    }

    pub fn id_field(&self) -> &str {
        &self.id_field
    }

    /// Rules for every property, without `required`.
    ///
    /// # Errors
    ///
    /// Returns the first [`CompileError`] raised by any property; no partial
    /// result is produced.
    pub fn compile(&self, properties: &Map<String, Value>) -> Result<RuleMap, CompileError> {
        Ok(self.compile_rules(properties)?.to_rule_map())
    }

    /// Rules for every property, with `required` appended where listed.
    pub fn compile_with_required(
        &self,
        properties: &Map<String, Value>,
        required: &IndexSet<String>,
    ) -> Result<RuleMap, CompileError> {
        Ok(self
            .compile_rules(properties)?
            .with_required(required)
            .to_rule_map())
    }

    /// Same as [`RuleCompiler::compile_with_required`], minus every rule
    /// whose name is excluded.
    pub fn compile_except(
        &self,
        properties: &Map<String, Value>,
        required: &IndexSet<String>,
        excluded: impl Into<Exclusion>,
    ) -> Result<RuleMap, CompileError> {
        Ok(self
            .compile_rules(properties)?
            .with_required(required)
            .except(&excluded.into())
            .to_rule_map())
    }

    /// Typed rules for every property except the identifier field.
    pub fn compile_rules(
        &self,
        properties: &Map<String, Value>,
    ) -> Result<CompiledRules, CompileError> {
        let mut compiled = CompiledRules::new();

        for (name, options) in properties {
            if *name == self.id_field {
                continue;
            }

            let property = Property::new(name.clone(), options);
            let mut rules = self.apply_rules(&property)?;
            for member in property.all_of_members() {
                rules.extend(self.apply_rules(&member)?);
            }

            trace!(property = %name, rules = rules.len(), "compiled property");
            compiled.insert(name.clone(), rules);
        }

        debug!(properties = compiled.len(), "compiled validation rules");
        Ok(compiled)
    }

    fn apply_rules(&self, property: &Property) -> Result<Vec<AppliedRule>, CompileError> {
        let mut applied = Vec::new();
        for rule in self.rules {
            if let Some(rule) = rule.evaluate(property)? {
                applied.push(rule);
            }
        }
        Ok(applied)
    }
}

impl Default for RuleCompiler {
    fn default() -> Self {
        Self::new()
    }
}
