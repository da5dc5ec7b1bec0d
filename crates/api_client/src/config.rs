//! Client configuration.

use tracing::info;

/// Backend used when nothing else is configured.
pub const DEFAULT_BASE_URL: &str = "http://localhost:8000";

/// Environment variable holding the backend base URL.
pub const API_URL_ENV: &str = "FEEDBACK_API_URL";

/// Configuration for [`crate::ApiClient`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// Base URL (default: http://localhost:8000)
    pub base_url: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self::new(DEFAULT_BASE_URL)
    }
}

impl ClientConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
        }
    }

    /// Read the base URL from `FEEDBACK_API_URL`, falling back to the default.
    pub fn from_env() -> Self {
        match std::env::var(API_URL_ENV) {
            Ok(url) if !url.trim().is_empty() => Self::new(url.trim()),
            _ => {
                info!("{API_URL_ENV} not set, using default: {DEFAULT_BASE_URL}");
                Self::default()
            }
        }
    }

    /// Absolute URL for an API path such as `/users/my-team`.
    pub fn endpoint(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.base_url.trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_default() {
        let config = ClientConfig::default();
        assert_eq!(config.base_url, "http://localhost:8000");
    }

    #[test]
    fn test_endpoint_joins_without_double_slash() {
        let config = ClientConfig::new("http://api.internal:9000/");
        assert_eq!(
            config.endpoint("/users/my-team"),
            "http://api.internal:9000/users/my-team"
        );
    }

    #[test]
    fn test_endpoint_keeps_trailing_slash_of_path() {
        let config = ClientConfig::default();
        assert_eq!(config.endpoint("/feedback/"), "http://localhost:8000/feedback/");
    }
}
