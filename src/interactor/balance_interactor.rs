use async_trait::async_trait;
use chrono::Utc;
use log::{info, warn};
use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use crate::entity::{
    AppError, EnrichedHolding, ReportMetadata, ReportOptions, ReportSummary, Result,
    TokenHolding, TokenMetadata, WalletReport,
};
use crate::solana::jupiter::TokenMetadataService;
use crate::solana::tokens::{native_holding, token_holdings};
use crate::solana::utils::{lamports_to_sol, validate_rpc_url};
use crate::solana::{parse_pubkey, LedgerConnector};

/// Outcome of joining one holding against the metadata lookup.
#[derive(Debug, Clone, PartialEq)]
pub enum MetadataJoin<'a> {
    Matched(&'a TokenMetadata),
    /// No record for the mint, or a record without a market price.
    NoPrice,
    LookupFailed(String),
}

/// Join a holding against the lookup built from one batched search.
///
/// `lookup` is `Err` when the search itself failed.
pub fn join_metadata<'a>(
    holding: &TokenHolding,
    lookup: &std::result::Result<HashMap<&'a str, &'a TokenMetadata>, String>,
) -> MetadataJoin<'a> {
    let lookup = match lookup {
        Ok(lookup) => lookup,
        Err(reason) => return MetadataJoin::LookupFailed(reason.clone()),
    };

    let metadata = match lookup.get(holding.mint.as_str()) {
        Some(metadata) => *metadata,
        None => return MetadataJoin::NoPrice,
    };

    match metadata.usd_price {
        None => MetadataJoin::NoPrice,
        Some(price) if !price.is_finite() || price < 0.0 => MetadataJoin::LookupFailed(format!(
            "Invalid price {} reported for {}",
            price, holding.mint
        )),
        Some(_) => MetadataJoin::Matched(metadata),
    }
}

#[async_trait]
pub trait BalanceInteractor: Send + Sync {
    async fn get_wallet_report(
        &self,
        address: &str,
        rpc_url: Option<&str>,
        options: ReportOptions,
    ) -> Result<WalletReport>;
}

pub struct BalanceInteractorImpl {
    metadata_service: Arc<dyn TokenMetadataService>,
    ledger_connector: Arc<dyn LedgerConnector>,
    default_rpc_url: String,
}

impl BalanceInteractorImpl {
    pub fn new(
        metadata_service: Arc<dyn TokenMetadataService>,
        ledger_connector: Arc<dyn LedgerConnector>,
        default_rpc_url: impl Into<String>,
    ) -> Self {
        Self {
            metadata_service,
            ledger_connector,
            default_rpc_url: default_rpc_url.into(),
        }
    }

    /// One batched exact-match search covering every distinct mint.
    async fn lookup_metadata(
        &self,
        mints: &[&str],
    ) -> std::result::Result<Vec<TokenMetadata>, String> {
        if mints.is_empty() {
            return Ok(Vec::new());
        }

        self.metadata_service
            .search(&mints.join(","), true, mints.len())
            .await
            .map_err(|e| e.to_string())
    }
}

#[async_trait]
impl BalanceInteractor for BalanceInteractorImpl {
    async fn get_wallet_report(
        &self,
        address: &str,
        rpc_url: Option<&str>,
        options: ReportOptions,
    ) -> Result<WalletReport> {
        let address = address.trim();
        if address.is_empty() {
            return Err(AppError::validation("Missing required parameter: address"));
        }
        let owner = parse_pubkey(address)?;

        let rpc_url = match rpc_url.map(str::trim) {
            Some(url) if !url.is_empty() => validate_rpc_url(url)?,
            _ => self.default_rpc_url.clone(),
        };

        let ledger = self.ledger_connector.connect(&rpc_url);
        let lamports = ledger.get_balance(&owner).await?;
        let accounts = ledger.get_token_accounts(&owner).await?;
        let holdings = token_holdings(&accounts)?;

        let mut seen = HashSet::new();
        let mints: Vec<&str> = holdings
            .iter()
            .map(|h| h.mint.as_str())
            .filter(|mint| seen.insert(*mint))
            .collect();

        let search = self.lookup_metadata(&mints).await;
        let metadata_error = search.as_ref().err().cloned();
        if let Some(reason) = &metadata_error {
            warn!("Metadata lookup failed for {}: {}", address, reason);
        }

        let lookup = search
            .as_ref()
            .map(|records| {
                records
                    .iter()
                    .map(|m| (m.id.as_str(), m))
                    .collect::<HashMap<_, _>>()
            })
            .map_err(Clone::clone);

        let mut tokens = Vec::with_capacity(holdings.len() + 1);
        if let Some(native) = native_holding(address, lamports) {
            tokens.push(EnrichedHolding::native(&native, options));
        }

        for holding in &holdings {
            match join_metadata(holding, &lookup) {
                MetadataJoin::Matched(metadata) => {
                    tokens.push(EnrichedHolding::matched(holding, metadata, options));
                }
                MetadataJoin::NoPrice => {
                    warn!("Dropping {} from report: no known price", holding.mint);
                }
                MetadataJoin::LookupFailed(reason) => {
                    tokens.push(EnrichedHolding::unknown(holding, reason, options));
                }
            }
        }

        let summary = ReportSummary::from_tokens(lamports_to_sol(lamports), &tokens);

        info!(
            "Wallet report for {}: {} token(s), {} verified, {} unverified",
            address,
            summary.total_tokens,
            summary.verified_tokens_count,
            summary.unverified_tokens_count
        );

        Ok(WalletReport {
            wallet: address.to_string(),
            rpc_url: rpc_url.clone(),
            total_tokens: tokens.len(),
            tokens,
            summary,
            metadata: ReportMetadata {
                timestamp: Utc::now().to_rfc3339(),
                rpc_url,
                include_logo: options.include_logo,
                include_tags: options.include_tags,
                metadata_source: self.metadata_service.source().to_string(),
                metadata_error,
            },
        })
    }
}
