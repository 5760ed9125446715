use thiserror::Error;

/// Core domain errors
#[derive(Debug, Error)]
pub enum DomainError {
    #[error("Not found: {message}")]
    NotFound { message: String },

    #[error("Validation error: {message}")]
    Validation { message: String },

    #[error("Conflict: {0}")]
    Conflict(ConflictKind),

    #[error("Configuration error: {message}")]
    Configuration { message: String },

    #[error("Internal error: {message}")]
    Internal { message: String },

    #[error("Storage error: {message}")]
    Storage { message: String },
}

/// Which uniqueness constraint a conflicting write collided with.
///
/// Carried structurally instead of in a message string so the account
/// service can translate a lost insert race back into the matching
/// user-facing duplicate error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConflictKind {
    Username,
    Email,
    AccountId,
}

impl std::fmt::Display for ConflictKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Username => write!(f, "username already exists"),
            Self::Email => write!(f, "email already registered"),
            Self::AccountId => write!(f, "account ID already exists"),
        }
    }
}

impl DomainError {
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::NotFound {
            message: message.into(),
        }
    }

    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    pub fn conflict(kind: ConflictKind) -> Self {
        Self::Conflict(kind)
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
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_error() {
        let error = DomainError::not_found("Account 'x' not found");
        assert_eq!(error.to_string(), "Not found: Account 'x' not found");
    }

    #[test]
    fn test_conflict_error() {
        let error = DomainError::conflict(ConflictKind::Username);
        assert_eq!(error.to_string(), "Conflict: username already exists");

        let error = DomainError::conflict(ConflictKind::Email);
        assert_eq!(error.to_string(), "Conflict: email already registered");
    }

    #[test]
    fn test_storage_error() {
        let error = DomainError::storage("connection refused");
        assert_eq!(error.to_string(), "Storage error: connection refused");
    }
}
