//! Persisted client session: the bearer token and the signed-in user.

use std::sync::Mutex;

use core_types::User;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Storage key for the bearer token.
pub const TOKEN_KEY: &str = "authToken";

/// Storage key for the signed-in user.
pub const USER_KEY: &str = "user";

/// Errors from session storage backends.
#[derive(Error, Debug)]
pub enum SessionError {
    #[error("Session storage unavailable: {0}")]
    Unavailable(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Snapshot of what a store holds.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Session {
    pub token: Option<String>,
    pub user: Option<User>,
}

/// Somewhere to keep the session between requests (and between runs).
///
/// Token and user are always cleared together.
pub trait SessionStore: Send + Sync {
    /// Current contents. Unreadable entries load as absent.
    fn load(&self) -> Session;

    fn save_token(&self, token: &str) -> Result<(), SessionError>;

    fn save_user(&self, user: &User) -> Result<(), SessionError>;

    /// Drop both the token and the user.
    fn clear(&self) -> Result<(), SessionError>;
}

/// In-process store, used by tests and short-lived tools.
#[derive(Debug, Default)]
pub struct MemorySessionStore {
    inner: Mutex<Session>,
}

impl MemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn with<R>(&self, f: impl FnOnce(&mut Session) -> R) -> R {
        let mut guard = self.inner.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        f(&mut guard)
    }
}

impl SessionStore for MemorySessionStore {
    fn load(&self) -> Session {
        self.with(|s| s.clone())
    }

    fn save_token(&self, token: &str) -> Result<(), SessionError> {
        self.with(|s| s.token = Some(token.to_string()));
        Ok(())
    }

    fn save_user(&self, user: &User) -> Result<(), SessionError> {
        self.with(|s| s.user = Some(user.clone()));
        Ok(())
    }

    fn clear(&self) -> Result<(), SessionError> {
        self.with(|s| *s = Session::default());
        Ok(())
    }
}
