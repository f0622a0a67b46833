use thiserror::Error;

use crate::domain::error::DomainError;

/// Errors that are safe to expose to other modules
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum UsersInfoError {
    #[error("Validation error: {message}")]
    Validation { message: String },

    #[error("User not found: {id}")]
    NotFound { id: i64 },

    #[error("Store error: {message}")]
    Store { message: String },

    #[error("Request canceled: {message}")]
    Canceled { message: String },
}

impl UsersInfoError {
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    pub fn not_found(id: i64) -> Self {
        Self::NotFound { id }
    }

    pub fn store(message: impl Into<String>) -> Self {
        Self::Store {
            message: message.into(),
        }
    }

    pub fn canceled(message: impl Into<String>) -> Self {
        Self::Canceled {
            message: message.into(),
        }
    }
}

impl From<DomainError> for UsersInfoError {
    fn from(domain_error: DomainError) -> Self {
        match domain_error {
            DomainError::UserNotFound { id } => Self::not_found(id),
            DomainError::Store { message } => Self::store(message),
            DomainError::Canceled { message } => Self::canceled(message),
        }
    }
}
