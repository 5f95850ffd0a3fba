//! Backend error types
//!
//! Every way a call to the backend collaborator can fail, already mapped
//! to the message the board shows the user.

use thiserror::Error;

/// Errors returned by [`Backend`](super::Backend) implementations
#[derive(Error, Debug)]
pub enum BackendError {
    /// Connection refused, DNS failure, and the like
    #[error("Cannot connect to backend. Please ensure it is deployed.")]
    Unreachable,

    /// HTTP 503 while the backend warms up
    #[error("Backend is starting up. Please wait a moment and refresh.")]
    StartingUp,

    /// HTTP 429
    #[error("Too many requests. Please wait a moment.")]
    RateLimited,

    /// No response within the request timeout
    #[error("Request timeout")]
    Timeout,

    /// The backend answered with an error status
    #[error("{message}")]
    Api { status: u16, message: String },

    /// The backend answered with a body we could not read
    #[error("Invalid response from backend: {0}")]
    Decode(String),

    /// Any other transport failure
    #[error("Request failed: {0}")]
    Request(String),
}

impl BackendError {
    /// Transport-level failures, as opposed to the backend saying no
    pub fn is_connectivity(&self) -> bool {
        matches!(
            self,
            BackendError::Unreachable | BackendError::Timeout | BackendError::Request(_)
        )
    }

    pub fn status(&self) -> Option<u16> {
        match self {
            BackendError::StartingUp => Some(503),
            BackendError::RateLimited => Some(429),
            BackendError::Api { status, .. } => Some(*status),
            _ => None,
        }
    }
}

impl From<reqwest::Error> for BackendError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            BackendError::Timeout
        } else if err.is_connect() {
            BackendError::Unreachable
        } else if err.is_decode() {
            BackendError::Decode(err.to_string())
        } else {
            BackendError::Request(err.to_string())
        }
    }
}

/// Result type alias for backend calls
pub type BackendResult<T> = Result<T, BackendError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = BackendError::Api {
            status: 400,
            message: "Category is full (max 3 items)".to_string(),
        };
        assert_eq!(err.to_string(), "Category is full (max 3 items)");
        assert_eq!(
            BackendError::StartingUp.to_string(),
            "Backend is starting up. Please wait a moment and refresh."
        );
    }

    #[test]
    fn test_classification() {
        assert!(BackendError::Unreachable.is_connectivity());
        assert!(BackendError::Timeout.is_connectivity());
        assert!(!BackendError::RateLimited.is_connectivity());
        assert_eq!(BackendError::RateLimited.status(), Some(429));
        assert_eq!(BackendError::Timeout.status(), None);
    }
}
