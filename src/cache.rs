//! Key/value stores placed in front of contract compilation.
//!
//! Contract data never changes once a schema is loaded, but deriving it
//! means walking the schema again. [`ContractRegistry`] memoizes field lists
//! and compiled rules in a [`Cache`] it is given at construction.
//!
//! [`ContractRegistry`]: crate::ContractRegistry

use std::collections::HashMap;
use std::fmt::{self, Display};

use parking_lot::RwLock;

use crate::compiler::CompiledRules;

/// What a cache entry holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CacheKind {
    /// Every property name, identifier included. Also serves `describe`.
    All,
    /// Compiled rules without `required`.
    Rules,
}

impl CacheKind {
    pub fn as_str(self) -> &'static str {
        match self {
            CacheKind::All => "all",
            CacheKind::Rules => "rules",
        }
    }
}

/// Separates the entry kind from the contract name in a cache key.
pub const KEY_SEPARATOR: char = ':';

/// Separates a key's scope from the rest of the key.
pub const SCOPE_SEPARATOR: char = '/';

/// A cache key of the form `<kind>:<contract>`, optionally prefixed with a
/// scope as `<scope>/<kind>:<contract>`.
///
/// Contract names are unique only within one registry. Registries that
/// share a cache put their own scope into every key.
///
/// # Example
///
/// ```rust
/// use data_contracts::{CacheKey, CacheKind};
///
/// assert_eq!(CacheKey::new(CacheKind::Rules, "Person").as_str(), "rules:Person");
/// assert_eq!(
///     CacheKey::scoped("registry-1", CacheKind::Rules, "Person").as_str(),
///     "registry-1/rules:Person"
/// );
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CacheKey(String);

impl CacheKey {
    pub fn new(kind: CacheKind, contract: &str) -> Self {
        Self(format!("{}{}{}", kind.as_str(), KEY_SEPARATOR, contract))
    }

    pub fn scoped(scope: &str, kind: CacheKind, contract: &str) -> Self {
        Self(format!(
            "{}{}{}{}{}",
            scope,
            SCOPE_SEPARATOR,
            kind.as_str(),
            KEY_SEPARATOR,
            contract
        ))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for CacheKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A cached value.
#[derive(Debug, Clone, PartialEq)]
pub enum CachedValue {
    Fields(Vec<String>),
    Rules(CompiledRules),
}

/// A narrow key/value store.
///
/// Implementations must be safe to share between threads. A cache may drop
/// entries at any time; callers recompute on a miss.
pub trait Cache: Send + Sync {
    fn has(&self, key: &CacheKey) -> bool;

    fn get(&self, key: &CacheKey) -> Option<CachedValue>;

    fn set(&self, key: CacheKey, value: CachedValue);

    /// Removes one entry, returning true if it existed.
    fn delete(&self, key: &CacheKey) -> bool;

    fn clear(&self);
}

/// An in-process cache backed by a `HashMap`.
///
/// Reads take a shared lock, writes an exclusive one.
#[derive(Debug, Default)]
pub struct MemoryCache {
    entries: RwLock<HashMap<CacheKey, CachedValue>>,
}

impl MemoryCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.read().is_empty()
    }
}

impl Cache for MemoryCache {
    fn has(&self, key: &CacheKey) -> bool {
        self.entries.read().contains_key(key)
    }

    fn get(&self, key: &CacheKey) -> Option<CachedValue> {
        self.entries.read().get(key).cloned()
    }

    fn set(&self, key: CacheKey, value: CachedValue) {
        self.entries.write().insert(key, value);
    }

    fn delete(&self, key: &CacheKey) -> bool {
        self.entries.write().remove(key).is_some()
    }

    fn clear(&self) {
        self.entries.write().clear();
    }
}

/// A cache that stores nothing. Every lookup misses.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoCache;

impl Cache for NoCache {
    fn has(&self, _key: &CacheKey) -> bool {
        false
    }

    fn get(&self, _key: &CacheKey) -> Option<CachedValue> {
        None
    }

    fn set(&self, _key: CacheKey, _value: CachedValue) {}

    fn delete(&self, _key: &CacheKey) -> bool {
        false
    }

    fn clear(&self) {}
}
