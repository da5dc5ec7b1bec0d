//! Errors from API operations.

use thiserror::Error;

use crate::session::SessionError;

/// Errors from API operations.
#[derive(Error, Debug)]
pub enum ApiError {
    #[error("Network error: {0}")]
    Network(#[source] reqwest::Error),

    /// 401 from the login endpoint
    #[error("Invalid username or password")]
    InvalidCredentials,

    /// 401 from any other endpoint; the stored session has been cleared
    #[error("Session expired")]
    Unauthorized,

    #[error("Request rejected with status {status}")]
    Rejected { status: u16, detail: Option<String> },

    #[error("Server error with status {status}")]
    Server { status: u16, detail: Option<String> },

    #[error("Unexpected response body: {0}")]
    Decode(#[source] reqwest::Error),

    #[error("Session storage error: {0}")]
    Session(#[from] SessionError),
}

/// Result type for API operations.
pub type Result<T> = std::result::Result<T, ApiError>;

impl ApiError {
    pub(crate) fn from_status(status: u16, detail: Option<String>) -> Self {
        if (400..500).contains(&status) {
            ApiError::Rejected { status, detail }
        } else {
            ApiError::Server { status, detail }
        }
    }

    /// Whether the caller has to return to the login screen.
    pub fn is_unauthorized(&self) -> bool {
        matches!(self, ApiError::Unauthorized)
    }

    /// Message the backend attached to a rejection, if any.
    pub fn detail(&self) -> Option<&str> {
        match self {
            ApiError::Rejected { detail, .. } | ApiError::Server { detail, .. } => {
                detail.as_deref()
            }
            _ => None,
        }
    }

    /// Message shown to users.
    pub fn user_message(&self) -> String {
        self.message_or("Something went wrong. Please try again.")
    }

    /// Message shown to users, using `fallback` when the backend rejected the
    /// request without saying why.
    pub fn message_or(&self, fallback: &str) -> String {
        match self {
            ApiError::Network(_) => {
                "Unable to reach the server. Please check your connection and try again."
                    .to_string()
            }
            ApiError::InvalidCredentials => "Invalid username or password".to_string(),
            ApiError::Unauthorized => "Your session has expired. Please sign in again.".to_string(),
            ApiError::Rejected { detail, .. } | ApiError::Server { detail, .. } => {
                detail.clone().unwrap_or_else(|| fallback.to_string())
            }
            ApiError::Decode(_) => "Received an unexpected response from the server.".to_string(),
            ApiError::Session(_) => "Could not update the saved session.".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_status_splits_client_and_server() {
        assert!(matches!(
            ApiError::from_status(422, None),
            ApiError::Rejected { status: 422, .. }
        ));
        assert!(matches!(
            ApiError::from_status(503, None),
            ApiError::Server { status: 503, .. }
        ));
    }

    #[test]
    fn test_message_prefers_detail() {
        let err = ApiError::from_status(400, Some("Username already registered".to_string()));
        assert_eq!(
            err.message_or("Failed to create employee account"),
            "Username already registered"
        );
        assert_eq!(err.detail(), Some("Username already registered"));
    }

    #[test]
    fn test_message_falls_back_without_detail() {
        let err = ApiError::from_status(500, None);
        assert_eq!(err.message_or("Failed to submit feedback"), "Failed to submit feedback");
    }

    #[test]
    fn test_distinct_messages_per_class() {
        let invalid = ApiError::InvalidCredentials.user_message();
        let expired = ApiError::Unauthorized.user_message();
        let rejected = ApiError::from_status(400, Some("Bad input".to_string())).user_message();

        assert_eq!(invalid, "Invalid username or password");
        assert_ne!(invalid, expired);
        assert_ne!(expired, rejected);
        assert!(ApiError::Unauthorized.is_unauthorized());
        assert!(!ApiError::InvalidCredentials.is_unauthorized());
    }
}
