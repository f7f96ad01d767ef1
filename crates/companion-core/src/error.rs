//! Error types for the companion domain collections.

use thiserror::Error;

/// Errors raised by the in-memory collaborator collections.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CompanionError {
    /// Entity not found error with type information
    #[error("Entity not found: {entity_type} '{id}'")]
    NotFound {
        entity_type: &'static str,
        id: String,
    },

    /// Entity rejected by a collection invariant (duplicate id, etc.)
    #[error("Invalid entity: {0}")]
    Invalid(String),
}

impl CompanionError {
    /// Creates a NotFound error
    pub fn not_found(entity_type: &'static str, id: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type,
            id: id.into(),
        }
    }

    /// Creates an Invalid error
    pub fn invalid(message: impl Into<String>) -> Self {
        Self::Invalid(message.into())
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    pub fn is_invalid(&self) -> bool {
        matches!(self, Self::Invalid(_))
    }
}

/// A type alias for `Result<T, CompanionError>`.
pub type Result<T> = std::result::Result<T, CompanionError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_display() {
        let err = CompanionError::not_found("preset", "p1");
        assert!(err.is_not_found());
        assert!(!err.is_invalid());
        assert_eq!(err.to_string(), "Entity not found: preset 'p1'");
    }

    #[test]
    fn test_invalid_display() {
        let err = CompanionError::invalid("duplicate preset id 'p1'");
        assert!(err.is_invalid());
        assert_eq!(err.to_string(), "Invalid entity: duplicate preset id 'p1'");
    }
}
