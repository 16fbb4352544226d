//! HTTP surface of the portfolio assistant.
//!
//! Routes:
//! - `POST /api/ai/chat` — answer a question (always `200`)
//! - `GET  /health`      — liveness probe

use std::{env, sync::Arc};

mod core;
mod error_handler;
mod routes;

pub use crate::core::app_state::AppState;
pub use crate::error_handler::{AppError, AppResult};
pub use crate::routes::chat::{
    chat_request::{ChatRequest, RequestError, parse_chat_request},
    chat_response::{ChatError, ChatResponse},
};

use axum::{
    Router,
    routing::{get, post},
};
use tokio::signal;
use tracing::{error, info};

use crate::{
    error_handler::not_found,
    routes::{chat::chat_route::ask_chat, health_route::health},
};

/// Bind address used when `API_ADDRESS` is not set.
pub const DEFAULT_API_ADDRESS: &str = "0.0.0.0:8080";

/// Builds the application router around shared state.
pub fn build_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/api/ai/chat", post(ask_chat))
        .route("/health", get(health))
        .fallback(not_found)
        .with_state(state)
}

/// Loads config from the environment, binds `API_ADDRESS`, and serves until Ctrl+C.
pub async fn start() -> AppResult<()> {
    let host_url = env::var("API_ADDRESS").unwrap_or_else(|_| DEFAULT_API_ADDRESS.to_string());

    let state = Arc::new(AppState::from_env()?);
    let app = build_router(state);

    let listener = tokio::net::TcpListener::bind(&host_url)
        .await
        .map_err(|source| AppError::Bind {
            address: host_url.clone(),
            source,
        })?;

    info!(address = %host_url, "portfolio assistant listening");

    // Start server with graceful shutdown on Ctrl+C
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(AppError::Server)?;

    info!("server stopped");
    Ok(())
}

/// Returns a future that resolves when Ctrl+C is pressed
async fn shutdown_signal() {
    if let Err(err) = signal::ctrl_c().await {
        // Without a signal handler, keep serving rather than exit immediately.
        error!(error = %err, "failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    info!("shutdown signal received");
}
