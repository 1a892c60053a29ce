use serde::Serialize;

use crate::solana::jupiter::Quote;

/// Outcome of a single swap attempt.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SwapResult {
    pub success: bool,
    pub swap_signature: Option<String>,
    pub out_amount: Option<String>,
    pub input_amount: String,
    pub input_mint: String,
    pub output_mint: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price_impact_pct: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl SwapResult {
    /// Echoes the requested pair and amount; reports the quoted output,
    /// not a re-read of the wallet after landing.
    pub fn succeeded(
        signature: String,
        quote: &Quote,
        input_mint: &str,
        output_mint: &str,
        input_amount: u64,
    ) -> Self {
        Self {
            success: true,
            swap_signature: Some(signature),
            out_amount: Some(quote.out_amount.clone()),
            input_amount: input_amount.to_string(),
            input_mint: input_mint.to_string(),
            output_mint: output_mint.to_string(),
            price_impact_pct: Some(quote.price_impact_pct),
            error: None,
        }
    }

    pub fn failed(
        input_mint: &str,
        output_mint: &str,
        input_amount: u64,
        reason: impl Into<String>,
    ) -> Self {
        Self {
            success: false,
            swap_signature: None,
            out_amount: None,
            input_amount: input_amount.to_string(),
            input_mint: input_mint.to_string(),
            output_mint: output_mint.to_string(),
            price_impact_pct: None,
            error: Some(reason.into()),
        }
    }
}
