//! Error types for rule compilation and contract handling.
//!
//! [`CompileError`] is raised while deriving rules from a property;
//! [`CompileErrors`] accumulates them for whole-registry checks;
//! [`ContractError`] covers building and looking up contracts.

mod compile_error;
mod contract_error;

pub use compile_error::{CompileError, CompileErrors};
pub use contract_error::ContractError;
