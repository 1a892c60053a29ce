use serde::Serialize;

use crate::entity::{TokenHolding, TokenMetadata};
use crate::solana::tokens::constants::{SOL_LOGO_URI, SOL_NAME, SOL_SYMBOL};

/// Flags controlling which optional fields appear on enriched holdings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReportOptions {
    pub include_logo: bool,
    pub include_tags: bool,
}

impl Default for ReportOptions {
    fn default() -> Self {
        Self {
            include_logo: true,
            include_tags: false,
        }
    }
}

/// A holding joined with whatever metadata the lookup produced.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EnrichedHolding {
    pub mint: String,
    pub symbol: String,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub logo: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<String>>,
    /// Raw integer balance in base units.
    pub balance: String,
    pub decimals: u8,
    pub ui_amount: f64,
    pub token_account: String,
    pub is_native: bool,
    pub price: Option<f64>,
    pub usd_value: Option<f64>,
    pub verified: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl EnrichedHolding {
    pub fn matched(
        holding: &TokenHolding,
        metadata: &TokenMetadata,
        options: ReportOptions,
    ) -> Self {
        let price = metadata.usd_price;
        Self {
            mint: holding.mint.clone(),
            symbol: metadata.symbol.clone(),
            name: metadata.name.clone(),
            logo: options
                .include_logo
                .then(|| metadata.icon.clone())
                .flatten(),
            tags: options.include_tags.then(|| metadata.tags.clone()),
            balance: holding.raw_amount.to_string(),
            decimals: holding.decimals,
            ui_amount: holding.ui_amount,
            token_account: holding.token_account.clone(),
            is_native: holding.is_native,
            price,
            usd_value: price.map(|p| p * holding.ui_amount),
            verified: metadata.is_verified,
            error: None,
        }
    }

    /// Native SOL carries fixed metadata and never depends on the price lookup.
    pub fn native(holding: &TokenHolding, options: ReportOptions) -> Self {
        Self {
            mint: holding.mint.clone(),
            symbol: SOL_SYMBOL.to_string(),
            name: SOL_NAME.to_string(),
            logo: options.include_logo.then(|| SOL_LOGO_URI.to_string()),
            tags: options.include_tags.then(|| vec!["native".to_string()]),
            balance: holding.raw_amount.to_string(),
            decimals: holding.decimals,
            ui_amount: holding.ui_amount,
            token_account: holding.token_account.clone(),
            is_native: true,
            price: None,
            usd_value: None,
            verified: true,
            error: None,
        }
    }

    /// Fallback shape for a holding whose metadata could not be processed.
    pub fn unknown(
        holding: &TokenHolding,
        reason: impl Into<String>,
        options: ReportOptions,
    ) -> Self {
        Self {
            mint: holding.mint.clone(),
            symbol: "UNKNOWN".to_string(),
            name: "Unknown Token".to_string(),
            logo: None,
            tags: options.include_tags.then(Vec::new),
            balance: holding.raw_amount.to_string(),
            decimals: holding.decimals,
            ui_amount: holding.ui_amount,
            token_account: holding.token_account.clone(),
            is_native: holding.is_native,
            price: None,
            usd_value: None,
            verified: false,
            error: Some(reason.into()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportSummary {
    pub sol_balance: f64,
    pub spl_tokens_count: usize,
    pub verified_tokens_count: usize,
    pub unverified_tokens_count: usize,
    pub total_tokens: usize,
}

impl ReportSummary {
    pub fn from_tokens(sol_balance: f64, tokens: &[EnrichedHolding]) -> Self {
        let verified = tokens.iter().filter(|t| t.verified).count();
        Self {
            sol_balance,
            spl_tokens_count: tokens.iter().filter(|t| !t.is_native).count(),
            verified_tokens_count: verified,
            unverified_tokens_count: tokens.len() - verified,
            total_tokens: tokens.len(),
        }
    }
}

/// Where the report came from and how it was asked for.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportMetadata {
    pub timestamp: String,
    pub rpc_url: String,
    pub include_logo: bool,
    pub include_tags: bool,
    pub metadata_source: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metadata_error: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WalletReport {
    pub wallet: String,
    pub rpc_url: String,
    pub total_tokens: usize,
    pub tokens: Vec<EnrichedHolding>,
    pub summary: ReportSummary,
    pub metadata: ReportMetadata,
}
