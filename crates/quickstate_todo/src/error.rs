//! Todo store error types.

use crate::draft::ValidationErrors;

/// Errors surfaced by store operations.
///
/// Operations on ids that do not exist are not errors; they return `None`.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::From)]
pub enum TodoError {
    /// One or more fields failed validation. The store was not changed.
    #[display("Validation failed: {}", _0)]
    Validation(ValidationErrors),
}

impl std::error::Error for TodoError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            TodoError::Validation(errors) => Some(errors),
        }
    }
}

impl TodoError {
    /// The validation errors, when this is a validation failure.
    pub fn validation(&self) -> Option<&ValidationErrors> {
        match self {
            TodoError::Validation(errors) => Some(errors),
        }
    }
}
