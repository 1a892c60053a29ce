use anyhow::Context;
use axum::{middleware, routing::get, Router};
use log::{error, info};
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::cors::CorsLayer;

use crate::di::ServiceContainer;

pub mod handlers;
pub mod request_log;
pub mod response;

/// Build the HTTP router over the given services
pub fn create_router(services: Arc<ServiceContainer>) -> Router {
    Router::new()
        .route(
            "/swap",
            get(handlers::swap_usage).post(handlers::execute_swap),
        )
        .route("/wallet-tokens", get(handlers::wallet_tokens))
        .route("/token-metadata", get(handlers::token_metadata))
        .route("/validate-key", get(handlers::validate_key))
        .route("/health", get(handlers::health))
        .layer(middleware::from_fn(request_log::log_requests))
        .layer(CorsLayer::permissive())
        .with_state(services)
}

/// Serve on an already-bound listener until Ctrl+C
pub async fn serve(listener: TcpListener, services: Arc<ServiceContainer>) -> anyhow::Result<()> {
    let address = listener
        .local_addr()
        .context("Failed to read listener address")?;
    info!("Listening on http://{}", address);

    axum::serve(listener, create_router(services))
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("HTTP server terminated")?;

    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => info!("Shutdown signal received, draining connections..."),
        Err(e) => {
            error!("Failed to listen for Ctrl+C: {}", e);
            std::future::pending::<()>().await
        }
    }
}
