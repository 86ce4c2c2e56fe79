//! Domain model for crashsym
//!
//! This module contains core domain types and errors that provide:
//! - Canonical hex formatting of crash-report addresses
//! - Self-documenting function signatures
//! - Structured error handling

pub mod errors;
pub mod types;

// Re-export common types for convenience
pub use types::{Address, CpuArch};

pub use errors::SymbolicateError;

/// Result alias used throughout the library
pub type Result<T, E = SymbolicateError> = std::result::Result<T, E>;
