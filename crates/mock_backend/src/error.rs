//! Error responses in the backend's `{"detail": ...}` envelope.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use thiserror::Error;
use web_types::ApiErrorBody;

#[derive(Debug, Error)]
pub enum BackendError {
    #[error("{0}")]
    BadRequest(String),

    #[error("Could not validate credentials")]
    Unauthorized,

    #[error("Incorrect username or password")]
    BadCredentials,

    #[error("{0}")]
    Forbidden(String),

    #[error("{0}")]
    NotFound(String),
}

pub type Result<T> = std::result::Result<T, BackendError>;

impl IntoResponse for BackendError {
    fn into_response(self) -> Response {
        let status = match &self {
            BackendError::BadRequest(_) => StatusCode::BAD_REQUEST,
            BackendError::Unauthorized | BackendError::BadCredentials => StatusCode::UNAUTHORIZED,
            BackendError::Forbidden(_) => StatusCode::FORBIDDEN,
            BackendError::NotFound(_) => StatusCode::NOT_FOUND,
        };
        (status, Json(ApiErrorBody::new(self.to_string()))).into_response()
    }
}
