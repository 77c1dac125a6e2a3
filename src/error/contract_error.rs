use crate::error::CompileError;

/// Errors raised while building, registering or querying contracts.
#[derive(Debug, thiserror::Error)]
pub enum ContractError {
    /// The schema document is not a JSON object.
    #[error("{0}: no schema defined")]
    NoSchema(String),

    /// The schema text is not valid JSON.
    #[error("problem parsing JSON Schema for {name}: {source}")]
    Parse {
        name: String,
        #[source]
        source: serde_json::Error,
    },

    /// `properties` is not an object, or `required` is not an array.
    #[error("{name}: '{section}' has the wrong JSON type")]
    InvalidSection { name: String, section: &'static str },

    /// A property could not be compiled into rules.
    #[error(transparent)]
    Compile(#[from] CompileError),

    /// A contract with the same name is already registered.
    #[error("contract '{0}' already registered")]
    DuplicateName(String),

    /// No contract with this name is registered.
    #[error("contract '{0}' not found")]
    NotFound(String),
}
