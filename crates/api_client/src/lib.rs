//! Client for the feedback tracker backend.
//!
//! This crate provides:
//! - ApiClient: typed wrappers for the auth, users, feedback and dashboard endpoints
//! - SessionStore: where the bearer token and signed-in user are kept
//! - ApiError: failure classes the UI renders distinct messages for
//!
//! reqwest is used on every target, so the same client backs the browser UI
//! and the CLI.

mod client;
mod config;
mod error;
mod session;

pub use client::ApiClient;
pub use config::{API_URL_ENV, ClientConfig, DEFAULT_BASE_URL};
pub use error::{ApiError, Result};
pub use session::{MemorySessionStore, Session, SessionError, SessionStore, TOKEN_KEY, USER_KEY};
