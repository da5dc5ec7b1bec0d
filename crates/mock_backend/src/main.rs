//! Local development server for the feedback tracker UI.
//!
//! Serves the mock API and the built frontend from one origin.

use std::env;
use std::net::SocketAddr;

use anyhow::Context;
use mock_backend::{AppState, router};
use tower_http::cors::{Any, CorsLayer};
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;
use tracing::info;
use tracing_subscriber::{EnvFilter, fmt};

const PORT_ENV: &str = "MOCK_BACKEND_PORT";
const DIST_ENV: &str = "FRONTEND_DIST";

fn var_or(key: &str, default: &str) -> String {
    env::var(key).unwrap_or_else(|_| {
        info!("{key} not set, using default: {default}");
        default.to_string()
    })
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    fmt().with_env_filter(EnvFilter::from_default_env()).init();

    let port: u16 = var_or(PORT_ENV, "8000")
        .parse()
        .with_context(|| format!("Invalid {PORT_ENV}"))?;
    let dist = var_or(DIST_ENV, "crates/frontend/dist");

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let app = router(AppState::seeded())
        .fallback_service(ServeDir::new(&dist).append_index_html_on_directories(true))
        .layer(TraceLayer::new_for_http())
        .layer(cors);

    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    info!("Mock backend listening on http://{addr} (frontend from {dist})");
    info!("Demo accounts: john_manager, sarah_manager, alice_employee, bob_employee");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
