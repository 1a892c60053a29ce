use async_trait::async_trait;
use log::{debug, info};
use solana_account_decoder::UiAccountData;
use solana_client::nonblocking::rpc_client::RpcClient;
use solana_client::rpc_config::RpcSendTransactionConfig;
use solana_client::rpc_request::TokenAccountsFilter;
use solana_sdk::commitment_config::{CommitmentConfig, CommitmentLevel};
use solana_sdk::{pubkey::Pubkey, signature::Signature, transaction::VersionedTransaction};
use std::sync::Arc;
use std::time::{Duration, Instant};

use crate::entity::{AppError, Result};
use crate::solana::client::create_solana_client;
use crate::solana::tokens::TokenAccount;

/// Ledger reads and transaction submission for one RPC endpoint.
#[async_trait]
pub trait LedgerClient: Send + Sync {
    /// Native balance in lamports.
    async fn get_balance(&self, owner: &Pubkey) -> Result<u64>;

    /// Every account `owner` holds under the SPL token program.
    async fn get_token_accounts(&self, owner: &Pubkey) -> Result<Vec<TokenAccount>>;

    async fn send_transaction(&self, transaction: &VersionedTransaction) -> Result<Signature>;

    /// Wait until the signature reaches processed commitment.
    async fn confirm_transaction(&self, signature: &Signature) -> Result<()>;
}

/// Opens a [`LedgerClient`] for a caller-chosen RPC endpoint.
pub trait LedgerConnector: Send + Sync {
    fn connect(&self, rpc_url: &str) -> Arc<dyn LedgerClient>;
}

pub struct RpcLedgerClient {
    client: Arc<RpcClient>,
    confirm_timeout: Duration,
    poll_interval: Duration,
}

impl RpcLedgerClient {
    pub fn new(client: Arc<RpcClient>, confirm_timeout: Duration, poll_interval: Duration) -> Self {
        Self {
            client,
            confirm_timeout,
            poll_interval,
        }
    }
}

#[async_trait]
impl LedgerClient for RpcLedgerClient {
    async fn get_balance(&self, owner: &Pubkey) -> Result<u64> {
        self.client
            .get_balance(owner)
            .await
            .map_err(|e| AppError::upstream(format!("Failed to get balance: {}", e)))
    }

    async fn get_token_accounts(&self, owner: &Pubkey) -> Result<Vec<TokenAccount>> {
        let keyed_accounts = self
            .client
            .get_token_accounts_by_owner(owner, TokenAccountsFilter::ProgramId(spl_token::ID))
            .await
            .map_err(|e| AppError::upstream(format!("Failed to get token accounts: {}", e)))?;

        debug!("{} token accounts found for {}", keyed_accounts.len(), owner);

        keyed_accounts
            .into_iter()
            .map(|keyed| match keyed.account.data {
                UiAccountData::Json(parsed) => {
                    TokenAccount::from_parsed(keyed.pubkey, parsed.parsed)
                }
                _ => Err(AppError::upstream(format!(
                    "Token account {} was not returned as parsed JSON",
                    keyed.pubkey
                ))),
            })
            .collect()
    }

    async fn send_transaction(&self, transaction: &VersionedTransaction) -> Result<Signature> {
        let config = RpcSendTransactionConfig {
            preflight_commitment: Some(CommitmentLevel::Processed),
            ..RpcSendTransactionConfig::default()
        };

        self.client
            .send_transaction_with_config(transaction, config)
            .await
            .map_err(|e| AppError::upstream(format!("Failed to send transaction: {}", e)))
    }

    async fn confirm_transaction(&self, signature: &Signature) -> Result<()> {
        let deadline = Instant::now() + self.confirm_timeout;

        loop {
            let status = self
                .client
                .get_signature_status_with_commitment(signature, CommitmentConfig::processed())
                .await
                .map_err(|e| {
                    AppError::upstream(format!("Failed to get status of {}: {}", signature, e))
                })?;

            match status {
                Some(Ok(())) => {
                    info!("Transaction {} reached processed commitment", signature);
                    return Ok(());
                }
                Some(Err(e)) => {
                    return Err(AppError::upstream(format!(
                        "Transaction {} failed: {}",
                        signature, e
                    )));
                }
                None if Instant::now() >= deadline => {
                    return Err(AppError::upstream(format!(
                        "Transaction {} was not confirmed within {}s",
                        signature,
                        self.confirm_timeout.as_secs()
                    )));
                }
                None => tokio::time::sleep(self.poll_interval).await,
            }
        }
    }
}

/// Opens RPC clients with shared confirmation settings.
///
/// The configured default endpoint keeps one long-lived client; caller-chosen
/// endpoints get a fresh client scoped to the request.
pub struct RpcLedgerConnector {
    default_rpc_url: String,
    default_client: Arc<RpcLedgerClient>,
    confirm_timeout: Duration,
    poll_interval: Duration,
}

impl RpcLedgerConnector {
    pub fn new(
        default_rpc_url: impl Into<String>,
        confirm_timeout: Duration,
        poll_interval: Duration,
    ) -> Self {
        let default_rpc_url = default_rpc_url.into();
        let default_client = Arc::new(RpcLedgerClient::new(
            create_solana_client(&default_rpc_url),
            confirm_timeout,
            poll_interval,
        ));

        Self {
            default_rpc_url,
            default_client,
            confirm_timeout,
            poll_interval,
        }
    }
}

impl LedgerConnector for RpcLedgerConnector {
    fn connect(&self, rpc_url: &str) -> Arc<dyn LedgerClient> {
        if rpc_url == self.default_rpc_url {
            return self.default_client.clone();
        }

        debug!("Opening RPC client for {}", rpc_url);
        Arc::new(RpcLedgerClient::new(
            create_solana_client(rpc_url),
            self.confirm_timeout,
            self.poll_interval,
        ))
    }
}
