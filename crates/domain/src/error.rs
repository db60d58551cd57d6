use thiserror::Error;

/// Domain-level errors
#[derive(Error, Debug, Clone, PartialEq)]
pub enum DomainError {
    /// Input rejected by a business rule (score out of range, ineligible role, ...)
    #[error("{0}")]
    Validation(String),

    /// A uniqueness rule was violated (same attendant twice in a week, ...)
    #[error("{0}")]
    Duplicate(String),

    #[error("{entity} with ID {id} does not exist")]
    NotFound { entity: &'static str, id: String },

    #[error("{0}")]
    PermissionDenied(String),

    #[error("Authentication credentials were not provided or are invalid")]
    Unauthenticated,

    /// Storage failure; the message is for logs, never for clients
    #[error("Repository error: {0}")]
    Repository(String),
}

impl DomainError {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn not_found(entity: &'static str, id: impl ToString) -> Self {
        Self::NotFound {
            entity,
            id: id.to_string(),
        }
    }

    pub fn repository(err: impl std::fmt::Display) -> Self {
        Self::Repository(err.to_string())
    }

    /// True for errors caused by the caller's input rather than the system
    pub fn is_client_error(&self) -> bool {
        !matches!(self, Self::Repository(_))
    }
}

pub type Result<T> = std::result::Result<T, DomainError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_message() {
        let err = DomainError::not_found("Attendant", 42);
        assert_eq!(err.to_string(), "Attendant with ID 42 does not exist");
    }

    #[test]
    fn test_client_error_classification() {
        assert!(DomainError::validation("bad").is_client_error());
        assert!(DomainError::Unauthenticated.is_client_error());
        assert!(!DomainError::repository("connection reset").is_client_error());
    }
}
