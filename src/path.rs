//! Locations inside a JSON Schema document.
//!
//! This module provides [`SchemaPath`], used to point at the schema fragment
//! a compile error came from (e.g. `properties.age.allOf[1]`).

use std::fmt::{self, Display};

use crate::schema::keywords;

/// A segment of a schema path.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum PathSegment {
    /// A keyword or property name (e.g. `properties`, `age`, `allOf`)
    Key(String),
    /// A position inside a keyword that holds a list (e.g. `[0]`)
    Index(usize),
}

/// A path to a fragment of a JSON Schema document.
///
/// # Example
///
/// ```rust
/// use data_contracts::SchemaPath;
///
/// let path = SchemaPath::property("age").push_all_of(1);
/// assert_eq!(path.to_string(), "properties.age.allOf[1]");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct SchemaPath {
    segments: Vec<PathSegment>,
}

impl SchemaPath {
    /// The document root.
    pub fn root() -> Self {
        Self::default()
    }

    /// The definition of a top-level property: `properties.<name>`.
    pub fn property(name: impl Into<String>) -> Self {
        Self::root()
            .push_key(keywords::PROPERTIES)
            .push_key(name)
    }

    /// Returns a new path with a key segment appended.
    pub fn push_key(&self, key: impl Into<String>) -> Self {
        let mut segments = self.segments.clone();
        segments.push(PathSegment::Key(key.into()));
        Self { segments }
    }

    /// Returns a new path with an index segment appended.
    pub fn push_index(&self, index: usize) -> Self {
        let mut segments = self.segments.clone();
        segments.push(PathSegment::Index(index));
        Self { segments }
    }

    /// Returns a new path pointing at the `index`-th `allOf` member.
    pub fn push_all_of(&self, index: usize) -> Self {
        self.push_key(keywords::ALL_OF).push_index(index)
    }

    pub fn is_root(&self) -> bool {
        self.segments.is_empty()
    }

    pub fn len(&self) -> usize {
        self.segments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    pub fn segments(&self) -> impl Iterator<Item = &PathSegment> {
        self.segments.iter()
    }

    pub fn last(&self) -> Option<&PathSegment> {
        self.segments.last()
    }
}

impl Display for SchemaPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.segments.is_empty() {
            return write!(f, "(root)");
        }
        for (i, segment) in self.segments.iter().enumerate() {
            match segment {
                PathSegment::Key(key) => {
                    if i > 0 {
                        write!(f, ".")?;
                    }
                    write!(f, "{}", key)?;
                }
                PathSegment::Index(idx) => write!(f, "[{}]", idx)?,
            }
        }
        Ok(())
    }
}
