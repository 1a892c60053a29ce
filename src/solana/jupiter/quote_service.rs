use async_trait::async_trait;
use log::{debug, info};
use reqwest::Client;

use crate::entity::Result;
use crate::solana::jupiter::api::fetch_json;
use crate::solana::jupiter::models::{Quote, QuoteParams};

/// Service for obtaining token swap quotes
#[async_trait]
pub trait QuoteService: Send + Sync {
    async fn get_swap_quote(&self, params: &QuoteParams) -> Result<Quote>;
}

/// Quote service backed by the Jupiter swap API
pub struct JupiterQuoteService {
    http_client: Client,
    quote_api_url: String,
}

impl JupiterQuoteService {
    pub fn new(http_client: Client, quote_api_url: impl Into<String>) -> Self {
        Self {
            http_client,
            quote_api_url: quote_api_url.into(),
        }
    }
}

#[async_trait]
impl QuoteService for JupiterQuoteService {
    async fn get_swap_quote(&self, params: &QuoteParams) -> Result<Quote> {
        let url = format!("{}/quote", self.quote_api_url.trim_end_matches('/'));

        debug!("Requesting quote with parameters: {:?}", params);

        let request = self.http_client.get(&url).query(&[
            ("inputMint", params.input_mint.clone()),
            ("outputMint", params.output_mint.clone()),
            ("amount", params.amount.to_string()),
            ("slippageBps", params.slippage_bps.to_string()),
        ]);

        let quote = Quote::from_value(fetch_json(request, &url).await?)?;

        info!(
            "Quote received successfully: input_amount={}, output_amount={}, price_impact={}%",
            quote.in_amount, quote.out_amount, quote.price_impact_pct
        );

        Ok(quote)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entity::AppError;
    use crate::solana::jupiter::models::tests::quote_json;
    use crate::test_support::spawn_upstream;
    use axum::{extract::Query, http::StatusCode, routing::get, Json, Router};
    use std::collections::HashMap;

    fn params() -> QuoteParams {
        QuoteParams {
            input_mint: "So11111111111111111111111111111111111111112".to_string(),
            output_mint: "EPjFWdd5AufqSSqeM2qN1xzybapC8G4wEGGkZwyTDt1v".to_string(),
            amount: 1_000_000,
            slippage_bps: 100,
        }
    }

    #[tokio::test]
    async fn sends_pair_amount_and_slippage() {
        let app = Router::new().route(
            "/quote",
            get(|Query(query): Query<HashMap<String, String>>| async move {
                assert_eq!(query["amount"], "1000000");
                assert_eq!(query["slippageBps"], "100");
                assert_eq!(query["inputMint"], "So11111111111111111111111111111111111111112");
                Json(quote_json("2500"))
            }),
        );
        let base_url = spawn_upstream(app).await;

        let service = JupiterQuoteService::new(Client::new(), base_url);
        let quote = service.get_swap_quote(&params()).await.unwrap();
        assert_eq!(quote.out_amount, "2500");
        assert_eq!(quote.route, quote_json("2500"));
    }

    #[tokio::test]
    async fn non_success_status_carries_url_and_body() {
        let app = Router::new().route(
            "/quote",
            get(|| async { (StatusCode::BAD_REQUEST, "Could not find any route") }),
        );
        let base_url = spawn_upstream(app).await;

        let service = JupiterQuoteService::new(Client::new(), base_url.clone());
        match service.get_swap_quote(&params()).await {
            Err(AppError::UpstreamHttp { url, status, body }) => {
                assert_eq!(url, format!("{}/quote", base_url));
                assert_eq!(status, Some(400));
                assert_eq!(body, "Could not find any route");
            }
            other => panic!("unexpected result: {:?}", other),
        }
    }
}
