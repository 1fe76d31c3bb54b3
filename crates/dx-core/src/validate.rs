//! Input validation for catalog mutations.
//!
//! The store calls these before touching SQL so that malformed input is
//! rejected with a [`CoreError::Validation`] instead of a constraint failure
//! surfacing as an opaque database error.

use crate::errors::CoreError;

/// Require a non-empty, non-blank display name.
///
/// `kind` names the entity in the error message (`"symptom"`, `"disease"`).
///
/// # Errors
///
/// Returns `CoreError::Validation` if `name` is empty or whitespace-only.
pub fn require_name(kind: &str, name: &str) -> Result<(), CoreError> {
    if name.trim().is_empty() {
        return Err(CoreError::Validation(format!(
            "{kind} name must not be empty"
        )));
    }
    Ok(())
}

/// Require a valid minimum-evidence gate (`min_symptoms >= 1`).
///
/// # Errors
///
/// Returns `CoreError::Validation` if `min_symptoms` is zero.
pub fn require_min_symptoms(min_symptoms: u32) -> Result<(), CoreError> {
    if min_symptoms < 1 {
        return Err(CoreError::Validation(
            "min_symptoms must be at least 1".to_string(),
        ));
    }
    Ok(())
}
