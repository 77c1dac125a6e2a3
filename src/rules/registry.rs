//! The fixed, sorted list of rule kinds.

use std::sync::OnceLock;

use crate::rules::Rule;

/// Rule kinds in registration order. Order here does not affect output.
const REGISTERED: [Rule; 19] = [
    Rule::Numeric,
    Rule::Date,
    Rule::In,
    Rule::Min,
    Rule::Max,
    Rule::Email,
    Rule::Between,
    Rule::Regex,
    Rule::IpAddress,
    Rule::MultipleOf,
    Rule::DateFormat,
    Rule::Url,
    Rule::Boolean,
    Rule::Array,
    Rule::Distinct,
    Rule::Image,
    Rule::NotIn,
    Rule::NotRegex,
    Rule::Size,
];

/// The closed set of rules consulted during compilation.
///
/// [`RulesRegistry::all`] returns every rule exactly once, sorted by
/// [`Rule::identifier`], so rule lists built from it are reproducible.
/// The list is built once and is read-only afterwards; it can be shared
/// freely between threads.
///
/// # Example
///
/// ```rust
/// use data_contracts::{Rule, RulesRegistry};
///
/// let rules = RulesRegistry::all();
/// assert_eq!(rules.first(), Some(&Rule::Array));
/// assert_eq!(rules.last(), Some(&Rule::Url));
/// ```
pub struct RulesRegistry;

impl RulesRegistry {
    pub fn all() -> &'static [Rule] {
        static SORTED: OnceLock<Vec<Rule>> = OnceLock::new();
        SORTED.get_or_init(|| sorted(&REGISTERED))
    }
}

fn sorted(rules: &[Rule]) -> Vec<Rule> {
    let mut rules = rules.to_vec();
    rules.sort_by(|a, b| a.identifier().cmp(b.identifier()));
    rules.dedup();
    rules
}
