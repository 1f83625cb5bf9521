//! Client error types

use thiserror::Error;

/// Client error type
#[derive(Debug, Error)]
pub enum ClientError {
    /// HTTP request failed
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Structured error body returned by the backend
    #[error("{message}")]
    Api {
        code: String,
        message: String,
        details: Option<String>,
    },

    /// Invalid response format
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    /// Authentication required or rejected
    #[error("Authentication required: {0}")]
    Unauthorized(String),

    /// Permission denied
    #[error("Permission denied: {0}")]
    Forbidden(String),

    /// Resource not found
    #[error("Not found: {0}")]
    NotFound(String),

    /// Resource already exists
    #[error("Conflict: {0}")]
    Conflict(String),

    /// Validation error
    #[error("Validation error: {0}")]
    Validation(String),

    /// Missing or malformed configuration
    #[error("Configuration error: {0}")]
    Config(String),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl ClientError {
    /// Message suitable for showing to the user, if the error carries one.
    pub fn remote_message(&self) -> Option<&str> {
        let message = match self {
            ClientError::Api { message, .. } => message.as_str(),
            ClientError::Unauthorized(m)
            | ClientError::Forbidden(m)
            | ClientError::NotFound(m)
            | ClientError::Conflict(m)
            | ClientError::Validation(m)
            | ClientError::Internal(m) => m.as_str(),
            _ => return None,
        };
        let message = message.trim();
        (!message.is_empty()).then_some(message)
    }
}

/// Result type for client operations
pub type ClientResult<T> = Result<T, ClientError>;

/// Mutation kind, used to pick the fallback message
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MutationAction {
    Update,
    Delete,
}

impl MutationAction {
    pub fn fallback_message(&self) -> &'static str {
        match self {
            MutationAction::Update => "Failed to update the appointment.",
            MutationAction::Delete => "Failed to delete the appointment.",
        }
    }
}

/// Screen-level errors, already converted to a displayable message
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ViewError {
    /// Initial load failed; the screen shows this instead of any rows
    #[error("{0}")]
    Fetch(String),

    /// Update or delete failed; the cached rows are unchanged
    #[error("{message}")]
    Mutation {
        action: MutationAction,
        message: String,
    },
}

impl ViewError {
    pub const FETCH_FALLBACK: &'static str = "Failed to fetch appointments.";

    pub fn fetch(err: &ClientError) -> Self {
        ViewError::Fetch(
            err.remote_message()
                .unwrap_or(Self::FETCH_FALLBACK)
                .to_string(),
        )
    }

    pub fn mutation(action: MutationAction, err: &ClientError) -> Self {
        ViewError::Mutation {
            action,
            message: err
                .remote_message()
                .unwrap_or(action.fallback_message())
                .to_string(),
        }
    }

    /// Whether the screen must hide its rows
    pub fn is_blocking(&self) -> bool {
        matches!(self, ViewError::Fetch(_))
    }

    pub fn user_message(&self) -> &str {
        match self {
            ViewError::Fetch(message) => message,
            ViewError::Mutation { message, .. } => message,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_remote_message_prefers_backend_text() {
        let err = ClientError::Api {
            code: "23505".into(),
            message: "duplicate key value".into(),
            details: None,
        };
        assert_eq!(
            ViewError::mutation(MutationAction::Update, &err).user_message(),
            "duplicate key value"
        );
    }

    #[test]
    fn test_fallback_messages() {
        let err = ClientError::InvalidResponse("empty body".into());
        assert_eq!(
            ViewError::fetch(&err).user_message(),
            "Failed to fetch appointments."
        );
        assert_eq!(
            ViewError::mutation(MutationAction::Delete, &err).user_message(),
            "Failed to delete the appointment."
        );
        let blank = ClientError::Internal("  ".into());
        assert_eq!(
            ViewError::mutation(MutationAction::Update, &blank).user_message(),
            "Failed to update the appointment."
        );
    }

    #[test]
    fn test_blocking() {
        assert!(ViewError::Fetch("x".into()).is_blocking());
        assert!(
            !ViewError::Mutation {
                action: MutationAction::Delete,
                message: "x".into()
            }
            .is_blocking()
        );
    }
}
