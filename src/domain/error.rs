use thiserror::Error;

/// Core domain errors
#[derive(Debug, Error, Clone, PartialEq)]
pub enum DomainError {
    #[error("Not found: {message}")]
    NotFound { message: String },

    #[error("Validation error: {message}")]
    Validation { message: String },

    #[error("Configuration error: {message}")]
    Configuration { message: String },

    #[error("Conflict: {message}")]
    Conflict { message: String },

    #[error("Internal error: {message}")]
    Internal { message: String },

    #[error("Storage error: {message}")]
    Storage { message: String },

    #[error("Publish error: {message}")]
    Publish { message: String },
}

impl DomainError {
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::NotFound {
            message: message.into(),
        }
    }

    pub fn conflict(message: impl Into<String>) -> Self {
        Self::Conflict {
            message: message.into(),
        }
    }

    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }

    pub fn storage(message: impl Into<String>) -> Self {
        Self::Storage {
            message: message.into(),
        }
    }

    pub fn publish(message: impl Into<String>) -> Self {
        Self::Publish {
            message: message.into(),
        }
    }

    /// Check if this error means the requested record does not exist
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_error() {
        let error = DomainError::not_found("User 'u1' not found");
        assert_eq!(error.to_string(), "Not found: User 'u1' not found");
        assert!(error.is_not_found());
    }

    #[test]
    fn test_conflict_error() {
        let error = DomainError::conflict("User with ID 'u1' already exists");
        assert_eq!(
            error.to_string(),
            "Conflict: User with ID 'u1' already exists"
        );
        assert!(!error.is_not_found());
    }

    #[test]
    fn test_publish_error() {
        let error = DomainError::publish("connection refused");
        assert_eq!(error.to_string(), "Publish error: connection refused");
    }
}
