//! Error Types
//!
//! Validation errors are caught before any request is sent; everything
//! else comes back from the HTTP layer.

use thiserror::Error;

/// Client-side input problems
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Title must not be empty")]
    EmptyTitle,
    #[error("Date must not be empty")]
    EmptyDate,
    #[error("Invalid date `{0}`, expected YYYY-MM-DD")]
    InvalidDate(String),
    #[error("Invalid month `{0}`, expected YYYY-MM")]
    InvalidMonth(String),
    #[error("Passwords do not match")]
    PasswordMismatch,
    #[error("{0} is required")]
    MissingField(&'static str),
}

/// Errors surfaced by the API client and the task store
#[derive(Debug, Error)]
pub enum AppError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Not signed in")]
    Unauthorized,

    #[error("Server returned {status}: {message}")]
    Status { status: u16, message: String },

    #[error("Invalid configuration: {0}")]
    Config(String),
}

/// Common result type for client operations
pub type AppResult<T> = Result<T, AppError>;

impl AppError {
    /// Classify a non-success HTTP response
    pub fn from_status(status: u16, body: String) -> Self {
        if status == 401 {
            AppError::Unauthorized
        } else {
            AppError::Status {
                status,
                message: body.trim().to_string(),
            }
        }
    }

    /// Text shown inline next to the control that triggered the call
    pub fn user_message(&self) -> String {
        match self {
            AppError::Status { status, message } if message.is_empty() => {
                format!("Request failed with status {}", status)
            }
            AppError::Status { message, .. } => message.clone(),
            other => other.to_string(),
        }
    }

    pub fn is_unauthorized(&self) -> bool {
        matches!(self, AppError::Unauthorized)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_401_maps_to_unauthorized() {
        assert!(AppError::from_status(401, "Not logged in".into()).is_unauthorized());
    }

    #[test]
    fn test_status_message_prefers_server_body() {
        let err = AppError::from_status(400, "Email already exists\n".into());
        assert_eq!(err.user_message(), "Email already exists");
    }

    #[test]
    fn test_status_without_body() {
        let err = AppError::from_status(500, "   ".into());
        assert_eq!(err.user_message(), "Request failed with status 500");
    }

    #[test]
    fn test_validation_message_passes_through() {
        let err: AppError = ValidationError::EmptyTitle.into();
        assert_eq!(err.user_message(), "Title must not be empty");
    }
}
