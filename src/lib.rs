//! # Data Contracts
//!
//! Derives Laravel-style validation rules from JSON Schema documents.
//!
//! ## Overview
//!
//! A data contract is a named JSON Schema describing one kind of record.
//! Each property of the schema is inspected by a fixed set of rules; every
//! rule that applies contributes a string such as `min:3` or `in:a,b`. The
//! result is a map from property name to its rule list, ready to hand to a
//! request validator.
//!
//! ## Core Types
//!
//! - [`Contract`]: A parsed schema with field listing and rule queries
//! - [`ContractRegistry`]: Named contracts with memoized results in a [`Cache`]
//! - [`RuleCompiler`]: Turns schema properties into rule lists
//! - [`Rule`]: The closed set of rule kinds, ordered by [`RulesRegistry`]
//! - [`CompileError`]: Raised when a rule needs a property type that is missing
//!
//! ## Example
//!
//! ```rust
//! use data_contracts::Contract;
//! use serde_json::json;
//!
//! let contract = Contract::from_value("Account", &json!({
//!     "properties": {
//!         "id": {"type": "integer"},
//!         "email": {"type": "string", "format": "email"},
//!         "role": {"type": "string", "enum": ["admin", "member"]}
//!     },
//!     "required": ["email"]
//! })).unwrap();
//!
//! let rules = contract.validation_rules().unwrap();
//! assert_eq!(rules["email"], vec!["email", "required"]);
//! assert_eq!(rules["role"], vec!["in:admin,member"]);
//! assert!(!rules.contains_key("id"));
//! ```

pub mod cache;
pub mod compiler;
pub mod config;
pub mod contract;
pub mod error;
pub mod loading;
pub mod path;
pub mod registry;
pub mod rules;
pub mod schema;

pub use cache::{Cache, CacheKey, CacheKind, CachedValue, MemoryCache, NoCache};
pub use compiler::{CompiledRules, Exclusion, RuleCompiler, RuleMap, DEFAULT_ID_FIELD};
pub use config::{ConfigError, ContractsConfig};
pub use contract::Contract;
pub use error::{CompileError, CompileErrors, ContractError};
pub use loading::{FileSystem, LoadError, LocalFileSystem};
pub use path::{PathSegment, SchemaPath};
pub use registry::ContractRegistry;
pub use rules::{param_value, AppliedRule, Rule, RulesRegistry};
pub use schema::{Modifier, Property, TypeCategory};

/// Type alias for whole-registry check results
pub type CheckResult = stillwater::Validation<(), CompileErrors>;
