use anyhow::{bail, Context, Result};
use serde::Deserialize;
use std::time::Duration;

/// Application configuration
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub host: String,
    pub port: u16,

    /// RPC endpoint used when a request does not name one
    pub solana_rpc_url: String,

    /// Base URL of the swap API (`/quote` and `/swap`)
    pub quote_api_url: String,

    /// Token metadata and price search endpoint
    pub token_api_url: String,

    pub metadata_timeout_secs: u64,
    pub confirm_timeout_secs: u64,
    pub confirm_poll_interval_ms: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 3000,
            solana_rpc_url: "https://api.mainnet-beta.solana.com".to_string(),
            quote_api_url: "https://lite-api.jup.ag/swap/v1".to_string(),
            token_api_url: "https://lite-api.jup.ag/tokens/v2/search".to_string(),
            metadata_timeout_secs: 10,
            confirm_timeout_secs: 60,
            confirm_poll_interval_ms: 500,
        }
    }
}

impl Config {
    /// Layer environment variables (`PORT`, `SOLANA_RPC_URL`, ...) over the defaults
    pub fn from_env() -> Result<Self> {
        let defaults = Config::default();

        let config: Config = config::Config::builder()
            .set_default("host", defaults.host)?
            .set_default("port", defaults.port)?
            .set_default("solana_rpc_url", defaults.solana_rpc_url)?
            .set_default("quote_api_url", defaults.quote_api_url)?
            .set_default("token_api_url", defaults.token_api_url)?
            .set_default("metadata_timeout_secs", defaults.metadata_timeout_secs)?
            .set_default("confirm_timeout_secs", defaults.confirm_timeout_secs)?
            .set_default("confirm_poll_interval_ms", defaults.confirm_poll_interval_ms)?
            .add_source(config::Environment::default().try_parsing(true))
            .build()
            .context("Failed to read configuration")?
            .try_deserialize()
            .context("Invalid configuration")?;

        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.metadata_timeout_secs == 0 {
            bail!("METADATA_TIMEOUT_SECS must be greater than zero");
        }
        if self.confirm_timeout_secs == 0 {
            bail!("CONFIRM_TIMEOUT_SECS must be greater than zero");
        }
        if self.confirm_poll_interval_ms == 0 {
            bail!("CONFIRM_POLL_INTERVAL_MS must be greater than zero");
        }
        Ok(())
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    pub fn metadata_timeout(&self) -> Duration {
        Duration::from_secs(self.metadata_timeout_secs)
    }

    pub fn confirm_timeout(&self) -> Duration {
        Duration::from_secs(self.confirm_timeout_secs)
    }

    pub fn confirm_poll_interval(&self) -> Duration {
        Duration::from_millis(self.confirm_poll_interval_ms)
    }
}
