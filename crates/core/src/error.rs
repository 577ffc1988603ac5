//! Domain error model.

use thiserror::Error;

/// Result type used across the workspace for domain-level failures.
pub type DomainResult<T> = Result<T, DomainError>;

/// Domain-level error.
///
/// Authorization outcomes are never expressed with this type: a denied check
/// is a `false`, not an error.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// A value failed validation (e.g. malformed input).
    #[error("validation failed: {0}")]
    Validation(String),

    /// An identifier was invalid (e.g. parse failure).
    #[error("invalid identifier: {0}")]
    InvalidId(String),
}

impl DomainError {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn invalid_id(msg: impl Into<String>) -> Self {
        Self::InvalidId(msg.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_carry_context() {
        assert_eq!(
            DomainError::validation("login path must be absolute").to_string(),
            "validation failed: login path must be absolute"
        );
        assert_eq!(
            DomainError::invalid_id("UserId: bad").to_string(),
            "invalid identifier: UserId: bad"
        );
    }
}
