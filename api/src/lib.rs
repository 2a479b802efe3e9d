//! HTTP surface of the story service.
//!
//! Routes (every response uses the `{success, data?, error?}` envelope):
//! - `GET  /health`
//! - `POST /story/validate`
//! - `POST /story/extract`
//! - `POST /story/fallback`
//! - `POST /story/generate`

use std::{env, sync::Arc};

pub mod core;
pub mod error_handler;
pub mod middleware_layer;
mod routes;

use axum::{
    Router, middleware,
    routing::{get, post},
};
use tokio::signal;
use tracing::{error, info};

use crate::{
    core::app_state::AppState,
    error_handler::{AppError, AppResult},
    middleware_layer::json_extractor::json_error_mapper,
    routes::{
        health_route::health_route,
        story::{
            extract_route::extract_code_route, fallback_route::fallback_story_route,
            generate_route::generate_story_route, validate_route::validate_story_route,
        },
    },
};

pub const DEFAULT_API_ADDRESS: &str = "127.0.0.1:8080";

/// Build the application router over shared state.
pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/health", get(health_route))
        .route("/story/validate", post(validate_story_route))
        .route("/story/extract", post(extract_code_route))
        .route("/story/fallback", post(fallback_story_route))
        .route("/story/generate", post(generate_story_route))
        .layer(middleware::from_fn(json_error_mapper))
        .with_state(state)
}

/// Load state from the environment and serve until Ctrl+C.
pub async fn start() -> AppResult<()> {
    let host_url = env::var("API_ADDRESS").unwrap_or_else(|_| DEFAULT_API_ADDRESS.to_string());
    let state = Arc::new(AppState::from_env()?);
    let app = router(state);

    let listener = tokio::net::TcpListener::bind(&host_url)
        .await
        .map_err(|source| AppError::Bind {
            addr: host_url.clone(),
            source,
        })?;
    info!(address = %host_url, "API listening");

    // Start server with graceful shutdown on Ctrl+C
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(AppError::Server)?;

    info!("API stopped");
    Ok(())
}

/// Resolves when Ctrl+C is pressed.
async fn shutdown_signal() {
    if let Err(e) = signal::ctrl_c().await {
        error!(error = %e, "failed to listen for shutdown signal");
    }
}
