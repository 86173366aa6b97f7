//! Unified error types for the SRAP screening engine.
//!
//! This module provides a common error type [`SrapError`] shared by the
//! workspace crates. The engine assumes validated, index-aligned input
//! vectors: malformed inputs are surfaced here as fail-fast errors before
//! the screening loop runs. An *infeasible* remedial action is not an
//! error; it is a legitimate negative result carried in the report.

use thiserror::Error;

/// Unified error type for SRAP screening operations.
#[derive(Error, Debug)]
pub enum SrapError {
    /// Input data validation errors (mismatched vector lengths, bad indices)
    #[error("Validation error: {0}")]
    Validation(String),

    /// Matrix shape errors (factor tables not aligned with the catalogs)
    #[error("Shape error: {0}")]
    Shape(String),

    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// Generic errors (for wrapping external errors)
    #[error("{0}")]
    Other(String),
}

/// Convenience type alias for Results using SrapError.
pub type SrapResult<T> = Result<T, SrapError>;

impl From<anyhow::Error> for SrapError {
    fn from(err: anyhow::Error) -> Self {
        SrapError::Other(err.to_string())
    }
}

impl From<String> for SrapError {
    fn from(s: String) -> Self {
        SrapError::Other(s)
    }
}

impl From<&str> for SrapError {
    fn from(s: &str) -> Self {
        SrapError::Other(s.to_string())
    }
}
