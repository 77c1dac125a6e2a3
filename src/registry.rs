//! Contract registry with an injected cache.
//!
//! This module provides the [`ContractRegistry`] type that stores named
//! contracts and answers field and rule queries for them, memoizing results
//! in a [`Cache`] supplied by the caller.

use parking_lot::RwLock;
use rayon::prelude::*;
use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use indexmap::IndexMap;
use serde_json::Map;
use stillwater::prelude::*;
use stillwater::Validation;
use tracing::debug;

use crate::cache::{Cache, CacheKey, CacheKind, CachedValue, MemoryCache, NoCache};
use crate::compiler::{CompiledRules, Exclusion, RuleCompiler, RuleMap};
use crate::config::ContractsConfig;
use crate::contract::{without_id, Contract};
use crate::error::{CompileErrors, ContractError};
use crate::CheckResult;

/// Type alias for the contract storage map.
type ContractMap = Arc<RwLock<HashMap<String, Arc<Contract>>>>;

static NEXT_SCOPE: AtomicU64 = AtomicU64::new(1);

fn next_scope() -> String {
    format!("registry-{}", NEXT_SCOPE.fetch_add(1, Ordering::Relaxed))
}

/// A thread-safe registry of named contracts.
///
/// Each contract is registered once and shared behind an `Arc`, so the
/// schema is parsed a single time no matter how often it is queried. Field
/// lists and compiled rules are stored in the registry's cache under the
/// keys `<scope>/all:<name>` and `<scope>/rules:<name>`; `describe` reuses
/// the `all` entry. The scope is unique to each registry created with
/// [`ContractRegistry::new`] or [`ContractRegistry::with_cache`], so one
/// cache can back several registries that use the same contract names.
///
/// # Thread Safety
///
/// Clones share the same contracts, cache and scope. Lookups take a read lock;
/// registration takes a write lock.
///
/// # Example
///
/// ```rust
/// use data_contracts::{Contract, ContractRegistry};
/// use serde_json::json;
///
/// let registry = ContractRegistry::new();
/// registry.register(Contract::from_value("Person", &json!({
///     "properties": {
///         "id": {"type": "integer"},
///         "age": {"type": "integer", "minimum": 0}
///     },
///     "required": ["age"]
/// })).unwrap()).unwrap();
///
/// assert_eq!(registry.describe("Person").unwrap(), vec!["age"]);
///
/// let rules = registry.validation_rules("Person").unwrap();
/// assert_eq!(rules["age"], vec!["min:0", "numeric", "required"]);
/// ```
pub struct ContractRegistry {
    contracts: ContractMap,
    cache: Arc<dyn Cache>,
    scope: Arc<str>,
}

impl ContractRegistry {
    /// Creates an empty registry backed by a [`MemoryCache`].
    pub fn new() -> Self {
        Self::with_cache(Arc::new(MemoryCache::new()))
    }

    /// Creates an empty registry backed by `cache`.
    pub fn with_cache(cache: Arc<dyn Cache>) -> Self {
        Self {
            contracts: Arc::new(RwLock::new(HashMap::new())),
            cache,
            scope: next_scope().into(),
        }
    }

    /// Creates an empty registry whose cache follows `config.cache`.
    pub fn from_config(config: &ContractsConfig) -> Self {
        if config.cache {
            Self::new()
        } else {
            Self::with_cache(Arc::new(NoCache))
        }
    }

    /// Registers a contract under its own name.
    ///
    /// Any cache entries already stored for the name are dropped first.
    ///
    /// # Errors
    ///
    /// Returns `ContractError::DuplicateName` if the name is already taken.
    pub fn register(&self, contract: Contract) -> Result<(), ContractError> {
        let mut contracts = self.contracts.write();
        let name = contract.name().to_string();

        if contracts.contains_key(&name) {
            return Err(ContractError::DuplicateName(name));
        }

        for kind in [CacheKind::All, CacheKind::Rules] {
            self.cache.delete(&self.cache_key(kind, &name));
        }

        debug!(contract = %name, properties = contract.properties().len(), "registered contract");
        contracts.insert(name, Arc::new(contract));
        Ok(())
    }

    /// Retrieves a contract by name.
    pub fn get(&self, name: &str) -> Option<Arc<Contract>> {
        self.contracts.read().get(name).cloned()
    }

    /// Registered contract names, sorted.
    pub fn names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.contracts.read().keys().cloned().collect();
        names.sort();
        names
    }

    /// The key under which this registry caches `kind` for a contract.
    pub fn cache_key(&self, kind: CacheKind, name: &str) -> CacheKey {
        CacheKey::scoped(&self.scope, kind, name)
    }

    pub fn len(&self) -> usize {
        self.contracts.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.contracts.read().is_empty()
    }

    fn contract(&self, name: &str) -> Result<Arc<Contract>, ContractError> {
        self.get(name)
            .ok_or_else(|| ContractError::NotFound(name.to_string()))
    }

    /// Every field of the contract, identifier included.
    ///
    /// # Errors
    ///
    /// Returns `ContractError::NotFound` for an unknown contract.
    pub fn all(&self, name: &str) -> Result<Vec<String>, ContractError> {
        let key = self.cache_key(CacheKind::All, name);
        if self.cache.has(&key) {
            if let Some(CachedValue::Fields(fields)) = self.cache.get(&key) {
                debug!(%key, "cache hit");
                return Ok(fields);
            }
        }

        let fields = self.contract(name)?.all();
        debug!(%key, "cache miss");
        self.cache.set(key, CachedValue::Fields(fields.clone()));
        Ok(fields)
    }

    /// Every field of the contract except its identifier.
    pub fn describe(&self, name: &str) -> Result<Vec<String>, ContractError> {
        let contract = self.contract(name)?;
        Ok(without_id(self.all(name)?, contract.id_field()))
    }

    fn compiled_rules(&self, name: &str) -> Result<CompiledRules, ContractError> {
        let key = self.cache_key(CacheKind::Rules, name);
        if self.cache.has(&key) {
            if let Some(CachedValue::Rules(rules)) = self.cache.get(&key) {
                debug!(%key, "cache hit");
                return Ok(rules);
            }
        }

        let rules = self.contract(name)?.compile_rules()?;
        debug!(%key, "cache miss");
        self.cache.set(key, CachedValue::Rules(rules.clone()));
        Ok(rules)
    }

    /// Rules for every property, without `required`.
    ///
    /// # Errors
    ///
    /// Returns `ContractError::NotFound` for an unknown contract and
    /// `ContractError::Compile` when a property cannot be compiled.
    pub fn validation_rules_optional(&self, name: &str) -> Result<RuleMap, ContractError> {
        Ok(self.compiled_rules(name)?.to_rule_map())
    }

    /// Rules for every property, with `required` appended where listed.
    pub fn validation_rules(&self, name: &str) -> Result<RuleMap, ContractError> {
        let contract = self.contract(name)?;
        Ok(self
            .compiled_rules(name)?
            .with_required(contract.required())
            .to_rule_map())
    }

    /// [`ContractRegistry::validation_rules`] minus every excluded rule name.
    pub fn rules_except(
        &self,
        name: &str,
        excluded: impl Into<Exclusion>,
    ) -> Result<RuleMap, ContractError> {
        let contract = self.contract(name)?;
        Ok(self
            .compiled_rules(name)?
            .with_required(contract.required())
            .except(&excluded.into())
            .to_rule_map())
    }

    /// Empties the cache, including entries of other registries sharing it.
    pub fn flush_cache(&self) {
        debug!("flushing contract cache");
        self.cache.clear();
    }

    /// Compiles every contract and reports every broken property at once.
    ///
    /// Contracts are visited in name order; within a contract, each
    /// property is checked on its own so that one failure does not hide
    /// another.
    pub fn check_all(&self) -> CheckResult {
        let mut failures: Option<CompileErrors> = None;

        for name in self.names() {
            let Some(contract) = self.get(&name) else {
                continue;
            };
            let Some(errors) = check_contract(&contract) else {
                continue;
            };
            failures = Some(match failures {
                Some(existing) => existing.combine(errors),
                None => errors,
            });
        }

        match failures {
            Some(errors) => Validation::Failure(errors),
            None => Validation::Success(()),
        }
    }

    /// Compiles the rules of every contract in parallel.
    ///
    /// The result is ordered by contract name.
    ///
    /// # Errors
    ///
    /// Returns the failure of the first contract, in name order, that does
    /// not compile.
    pub fn compile_all(&self) -> Result<IndexMap<String, RuleMap>, ContractError> {
        let names = self.names();
        let compiled: Vec<Result<(String, RuleMap), ContractError>> = names
            .into_par_iter()
            .map(|name| {
                let rules = self.validation_rules(&name)?;
                Ok((name, rules))
            })
            .collect();

        compiled.into_iter().collect()
    }
}

/// Compiles each property of `contract` separately, collecting failures.
fn check_contract(contract: &Contract) -> Option<CompileErrors> {
    let compiler = RuleCompiler::new().with_id_field(contract.id_field());
    let errors: Vec<_> = contract
        .properties()
        .iter()
        .filter_map(|(name, options)| {
            let mut single = Map::new();
            single.insert(name.clone(), options.clone());
            compiler.compile_rules(&single).err()
        })
        .collect();

    CompileErrors::from_vec(errors).map(|errors| errors.in_contract(contract.name()))
}

impl Default for ContractRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl Clone for ContractRegistry {
    fn clone(&self) -> Self {
        Self {
            contracts: Arc::clone(&self.contracts),
            cache: Arc::clone(&self.cache),
            scope: Arc::clone(&self.scope),
        }
    }
}
