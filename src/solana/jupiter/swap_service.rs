use async_trait::async_trait;
use log::{debug, info};
use reqwest::Client;
use solana_sdk::pubkey::Pubkey;

use crate::entity::{AppError, Result};
use crate::solana::jupiter::api::fetch_json;
use crate::solana::jupiter::models::{Quote, SwapRequest, SwapResponse};

/// Builds unsigned swap transactions realizing a quote
#[async_trait]
pub trait SwapTransactionService: Send + Sync {
    async fn build_swap_transaction(&self, quote: &Quote, payer: &Pubkey) -> Result<SwapResponse>;
}

/// Transaction builder backed by the Jupiter swap API
pub struct JupiterSwapService {
    http_client: Client,
    quote_api_url: String,
}

impl JupiterSwapService {
    pub fn new(http_client: Client, quote_api_url: impl Into<String>) -> Self {
        Self {
            http_client,
            quote_api_url: quote_api_url.into(),
        }
    }
}

#[async_trait]
impl SwapTransactionService for JupiterSwapService {
    async fn build_swap_transaction(&self, quote: &Quote, payer: &Pubkey) -> Result<SwapResponse> {
        let url = format!("{}/swap", self.quote_api_url.trim_end_matches('/'));

        // SOL is wrapped and unwrapped around the swap as needed
        let swap_request = SwapRequest {
            quote_response: &quote.route,
            user_public_key: payer.to_string(),
            wrap_and_unwrap_sol: true,
            dynamic_compute_unit_limit: true,
            prioritization_fee_lamports: "auto",
        };

        debug!("Requesting swap transaction with user_public_key: {}", payer);

        let value = fetch_json(self.http_client.post(&url).json(&swap_request), &url).await?;
        let swap_response: SwapResponse = serde_json::from_value(value)
            .map_err(|e| AppError::upstream(format!("Unexpected swap response: {}", e)))?;

        info!(
            "Swap transaction received: tx_length={}",
            swap_response.swap_transaction.len()
        );

        Ok(swap_response)
    }
}
