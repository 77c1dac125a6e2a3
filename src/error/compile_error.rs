//! Rule compilation errors.
//!
//! This module provides [`CompileError`] for a single property that cannot
//! be compiled and [`CompileErrors`] for accumulating many of them.

use std::fmt::{self, Display};

use stillwater::prelude::*;

use crate::path::SchemaPath;

/// A property that cannot be turned into rules.
///
/// # Example
///
/// ```rust
/// use data_contracts::{CompileError, Property, SchemaPath};
/// use serde_json::json;
///
/// let property = Property::new("age", &json!({"minimum": 3}));
/// let error = property.get_type().unwrap_err();
///
/// assert_eq!(error.property(), "age");
/// assert_eq!(error.path(), &SchemaPath::property("age"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CompileError {
    /// The property has no `type` and neither a modifier nor an `enum`.
    #[error("type has not been set for {property} ({path})")]
    TypeUndefined { property: String, path: SchemaPath },
}

impl CompileError {
    /// Name of the property that failed.
    pub fn property(&self) -> &str {
        match self {
            CompileError::TypeUndefined { property, .. } => property,
        }
    }

    /// Location of the failing fragment in the schema document.
    pub fn path(&self) -> &SchemaPath {
        match self {
            CompileError::TypeUndefined { path, .. } => path,
        }
    }
}

/// A non-empty collection of compile errors.
///
/// Used when every broken property across many contracts must be reported
/// at once. `CompileErrors` implements `Semigroup`, so results from several
/// contracts combine into one:
///
/// ```rust
/// use data_contracts::{CompileError, CompileErrors, SchemaPath};
/// use stillwater::prelude::*;
///
/// let a = CompileErrors::single(CompileError::TypeUndefined {
///     property: "a".to_string(),
///     path: SchemaPath::property("a"),
/// });
/// let b = CompileErrors::single(CompileError::TypeUndefined {
///     property: "b".to_string(),
///     path: SchemaPath::property("b"),
/// });
///
/// assert_eq!(a.combine(b).len(), 2);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct CompileErrors {
    contract: Option<String>,
    errors: NonEmptyVec<CompileError>,
}

impl CompileErrors {
    pub fn single(error: CompileError) -> Self {
        Self {
            contract: None,
            errors: NonEmptyVec::singleton(error),
        }
    }

    /// Returns `None` when `errors` is empty.
    pub fn from_vec(errors: Vec<CompileError>) -> Option<Self> {
        NonEmptyVec::from_vec(errors).map(|errors| Self {
            contract: None,
            errors,
        })
    }

    /// Attributes the errors to a contract, for display.
    pub fn in_contract(mut self, contract: impl Into<String>) -> Self {
        self.contract = Some(contract.into());
        self
    }

    pub fn len(&self) -> usize {
        self.errors.len()
    }

    /// Always false; the collection is never empty.
    pub fn is_empty(&self) -> bool {
        false
    }

    pub fn iter(&self) -> impl Iterator<Item = &CompileError> {
        self.errors.iter()
    }

    pub fn first(&self) -> &CompileError {
        self.errors.head()
    }

    /// Returns every error raised for the named property.
    pub fn for_property(&self, property: &str) -> Vec<&CompileError> {
        self.errors
            .iter()
            .filter(|e| e.property() == property)
            .collect()
    }

    pub fn into_vec(self) -> Vec<CompileError> {
        self.errors.into_vec()
    }
}

impl Semigroup for CompileErrors {
    fn combine(self, other: Self) -> Self {
        let contract = if self.contract == other.contract {
            self.contract
        } else {
            None
        };
        CompileErrors {
            contract,
            errors: self.errors.combine(other.errors),
        }
    }
}

impl Display for CompileErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.contract {
            Some(contract) => writeln!(
                f,
                "{} failed to compile with {} error(s):",
                contract,
                self.len()
            )?,
            None => writeln!(f, "Compilation failed with {} error(s):", self.len())?,
        }
        for (i, error) in self.iter().enumerate() {
            writeln!(f, "  {}. {}", i + 1, error)?;
        }
        Ok(())
    }
}

impl std::error::Error for CompileErrors {}

impl IntoIterator for CompileErrors {
    type Item = CompileError;
    type IntoIter = std::vec::IntoIter<CompileError>;

    fn into_iter(self) -> Self::IntoIter {
        self.errors.into_vec().into_iter()
    }
}

const _: () = {
    const fn assert_send<T: Send>() {}
    const fn assert_sync<T: Sync>() {}
    assert_send::<CompileErrors>();
    assert_sync::<CompileErrors>();
};
