//! Error types for the audit engine.
//!
//! This module provides structured error handling with:
//! - `AuditError`: typed failures of the provider call plus the one
//!   internal failure a synthesized report can surface
//! - `Result<T>`: type alias for Results using AuditError

use thiserror::Error;

/// Failures raised by the provider adapter, plus the internal
/// invariant failure of report synthesis.
#[derive(Debug, Error)]
pub enum AuditError {
    /// Outbound request to the audit provider failed
    #[error("Transport error: {0}")]
    Transport(String),

    /// Provider answered with a non-success status
    #[error("Provider returned status {status}: {body}")]
    ProviderStatus { status: u16, body: String },

    /// Provider payload could not be decoded into the expected shape
    #[error("Decode error: {0}")]
    Decode(String),

    /// A produced report violated one of its own domain bounds.
    /// This indicates a defect, not a provider problem.
    #[error("Report invariant violated: {0}")]
    Invariant(String),
}

impl AuditError {
    /// Create a transport error
    pub fn transport(msg: impl Into<String>) -> Self {
        Self::Transport(msg.into())
    }

    /// Create a decode error
    pub fn decode(msg: impl Into<String>) -> Self {
        Self::Decode(msg.into())
    }

    /// Create an invariant error
    pub fn invariant(msg: impl Into<String>) -> Self {
        Self::Invariant(msg.into())
    }

    /// Whether this error originated in the provider adapter.
    /// Provider failures select the fallback path; invariant failures do not.
    pub fn is_provider_failure(&self) -> bool {
        !matches!(self, Self::Invariant(_))
    }
}

/// Result type alias using AuditError.
pub type Result<T> = std::result::Result<T, AuditError>;
