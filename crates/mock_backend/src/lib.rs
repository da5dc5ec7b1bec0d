//! Stand-in for the feedback tracker backend.
//!
//! Implements the HTTP contract the client depends on against in-memory
//! data seeded with the demo accounts. Integration tests spin it up on an
//! ephemeral port; the binary serves it for local development.

pub mod error;
pub mod routes;
pub mod state;

use axum::Router;
use axum::extract::{Request, State};
use axum::middleware::{self, Next};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use tokio::net::TcpListener;
use tracing::warn;

pub use error::BackendError;
pub use state::{AppState, DEMO_PASSWORD};

/// API router with request counting attached.
pub fn router(state: AppState) -> Router {
    routes::api_routes()
        .layer(middleware::from_fn_with_state(state.clone(), count_requests))
        .with_state(state)
}

async fn count_requests(State(state): State<AppState>, request: Request, next: Next) -> Response {
    state.record_request();
    let response = next.run(request).await;
    if state.serves_malformed_bodies() {
        return (StatusCode::OK, "<html>not json</html>").into_response();
    }
    response
}

/// Serve `state` on an ephemeral localhost port and return its base URL.
pub async fn spawn(state: AppState) -> std::io::Result<String> {
    let listener = TcpListener::bind("127.0.0.1:0").await?;
    let addr = listener.local_addr()?;

    tokio::spawn(async move {
        if let Err(e) = axum::serve(listener, router(state)).await {
            warn!(error = %e, "mock backend stopped");
        }
    });

    Ok(format!("http://{addr}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_spawn_serves_login() {
        let state = AppState::seeded();
        let base = spawn(state.clone()).await.unwrap();

        let resp = reqwest::Client::new()
            .post(format!("{base}/auth/login"))
            .json(&serde_json::json!({ "username": "john_manager", "password": DEMO_PASSWORD }))
            .send()
            .await
            .unwrap();

        assert!(resp.status().is_success());
        assert_eq!(state.request_count(), 1);
    }

    #[tokio::test]
    async fn test_missing_token_is_401_with_detail() {
        let base = spawn(AppState::seeded()).await.unwrap();

        let resp = reqwest::Client::new()
            .get(format!("{base}/users/my-team"))
            .send()
            .await
            .unwrap();

        assert_eq!(resp.status().as_u16(), 401);
        let body: serde_json::Value = resp.json().await.unwrap();
        assert_eq!(body["detail"], "Could not validate credentials");
    }
}
