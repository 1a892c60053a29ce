//! Solana swap API - Main executable
//!
//! HTTP service that executes Jupiter swaps on behalf of callers and
//! reports wallet holdings enriched with token metadata.
use anyhow::Context;
use dotenv::dotenv;
use log::info;
use solana_swap_api::{serve, Config, ServiceContainer};
use std::sync::Arc;
use tokio::net::TcpListener;

/// Application entry point
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables from .env file
    dotenv().ok();

    // Initialize logging with default level of "info"
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));
    info!("Starting Solana swap API v{}", solana_swap_api::VERSION);

    let config = Config::from_env().context("Failed to load configuration")?;
    info!("Default Solana RPC: {}", config.solana_rpc_url);
    info!("Swap API: {}", config.quote_api_url);
    info!("Token API: {}", config.token_api_url);

    let listener = TcpListener::bind(config.bind_address())
        .await
        .with_context(|| format!("Failed to bind {}", config.bind_address()))?;

    let services = Arc::new(ServiceContainer::from_config(&config));
    serve(listener, services).await
}
