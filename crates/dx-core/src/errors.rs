//! Cross-cutting error types for Diagnos.
//!
//! Domain-specific errors (e.g. `StoreError`) are defined in their respective
//! crates. `CoreError` covers what can originate here: validation failures and
//! entity lookups that came up empty.

use thiserror::Error;

/// Errors that can be raised by any Diagnos crate.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Entity lookup returned no result.
    #[error("Entity not found: {entity_type} {id}")]
    NotFound { entity_type: String, id: String },

    /// Data failed validation (empty name, out-of-range gate, etc.).
    #[error("Validation error: {0}")]
    Validation(String),

    /// Catch-all for unexpected errors.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}
