use async_trait::async_trait;
use log::{error, info};
use solana_sdk::{pubkey::Pubkey, signature::Keypair, signer::Signer};
use std::sync::Arc;

use crate::entity::{AppError, Result, SwapRequest, SwapResult, SWAP_SLIPPAGE_BPS};
use crate::solana::jupiter::{QuoteParams, QuoteService, SwapTransactionService};
use crate::solana::tokens::{decode_transaction, sign_transaction};
use crate::solana::utils::{parse_base_units, validate_rpc_url};
use crate::solana::{keypair_from_base58, parse_pubkey, LedgerConnector};

/// A swap request that passed validation; holds the decoded payer keypair.
pub struct ValidatedSwap {
    pub input_mint: Pubkey,
    pub output_mint: Pubkey,
    pub amount: u64,
    pub rpc_url: String,
    pub payer: Keypair,
}

#[async_trait]
pub trait SwapInteractor: Send + Sync {
    /// Check the request without touching any upstream.
    fn validate_swap_parameters(&self, request: &SwapRequest) -> Result<ValidatedSwap>;

    /// Quote, build, sign, submit and confirm one swap.
    ///
    /// `Err` only for invalid input; upstream failures come back as an
    /// unsuccessful [`SwapResult`].
    async fn execute_swap(&self, request: &SwapRequest) -> Result<SwapResult>;
}

pub struct SwapInteractorImpl {
    quote_service: Arc<dyn QuoteService>,
    swap_service: Arc<dyn SwapTransactionService>,
    ledger_connector: Arc<dyn LedgerConnector>,
    default_rpc_url: String,
}

impl SwapInteractorImpl {
    pub fn new(
        quote_service: Arc<dyn QuoteService>,
        swap_service: Arc<dyn SwapTransactionService>,
        ledger_connector: Arc<dyn LedgerConnector>,
        default_rpc_url: impl Into<String>,
    ) -> Self {
        Self {
            quote_service,
            swap_service,
            ledger_connector,
            default_rpc_url: default_rpc_url.into(),
        }
    }

    async fn run(&self, swap: &ValidatedSwap) -> std::result::Result<SwapResult, String> {
        let params = QuoteParams {
            input_mint: swap.input_mint.to_string(),
            output_mint: swap.output_mint.to_string(),
            amount: swap.amount,
            slippage_bps: SWAP_SLIPPAGE_BPS,
        };

        let quote = self
            .quote_service
            .get_swap_quote(&params)
            .await
            .map_err(|e| format!("Failed to get quote: {}", e))?;

        let payer = swap.payer.pubkey();
        let swap_response = self
            .swap_service
            .build_swap_transaction(&quote, &payer)
            .await
            .map_err(|e| format!("Failed to prepare swap: {}", e))?;

        let transaction = decode_transaction(&swap_response.swap_transaction)
            .and_then(|unsigned| sign_transaction(unsigned, &[&swap.payer]))
            .map_err(|e| format!("Failed to sign swap: {}", e))?;

        let ledger = self.ledger_connector.connect(&swap.rpc_url);
        let signature = ledger
            .send_transaction(&transaction)
            .await
            .map_err(|e| format!("Failed to execute swap: {}", e))?;

        info!("Swap transaction submitted: {}", signature);

        ledger
            .confirm_transaction(&signature)
            .await
            .map_err(|e| format!("Swap {} was not confirmed: {}", signature, e))?;

        Ok(SwapResult::succeeded(
            signature.to_string(),
            &quote,
            &params.input_mint,
            &params.output_mint,
            swap.amount,
        ))
    }
}

fn required<'a>(value: &'a str, field: &str) -> Result<&'a str> {
    let value = value.trim();
    if value.is_empty() {
        return Err(AppError::validation(format!("Missing required field: {}", field)));
    }
    Ok(value)
}

#[async_trait]
impl SwapInteractor for SwapInteractorImpl {
    fn validate_swap_parameters(&self, request: &SwapRequest) -> Result<ValidatedSwap> {
        let input_mint = parse_pubkey(required(&request.input_mint, "inputMint")?)?;
        let output_mint = parse_pubkey(required(&request.output_mint, "outputMint")?)?;
        let signer = required(&request.signer, "signer")?;
        let amount = parse_base_units(&request.input_amount)?;

        if input_mint == output_mint {
            return Err(AppError::validation(
                "inputMint and outputMint must be different",
            ));
        }

        let rpc_url = match request.rpc_url.as_deref().map(str::trim) {
            Some(url) if !url.is_empty() => validate_rpc_url(url)?,
            _ => self.default_rpc_url.clone(),
        };

        let payer = keypair_from_base58(signer)?;

        Ok(ValidatedSwap {
            input_mint,
            output_mint,
            amount,
            rpc_url,
            payer,
        })
    }

    async fn execute_swap(&self, request: &SwapRequest) -> Result<SwapResult> {
        let swap = self.validate_swap_parameters(request)?;

        info!(
            "Executing swap: {} {} -> {} for {}",
            swap.amount,
            swap.input_mint,
            swap.output_mint,
            swap.payer.pubkey()
        );

        match self.run(&swap).await {
            Ok(result) => Ok(result),
            Err(reason) => {
                error!("Swap failed: {}", reason);
                Ok(SwapResult::failed(
                    &swap.input_mint.to_string(),
                    &swap.output_mint.to_string(),
                    swap.amount,
                    reason,
                ))
            }
        }
    }
}
