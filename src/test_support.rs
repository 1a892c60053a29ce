//! Shared fakes for unit tests.

use async_trait::async_trait;
use axum::Router;
use solana_sdk::{pubkey::Pubkey, signature::Signature, transaction::VersionedTransaction};
use std::sync::{Arc, Mutex};

use crate::entity::{AppError, Result, TokenMetadata};
use crate::solana::jupiter::models::tests::quote_json;
use crate::solana::jupiter::{
    Quote, QuoteParams, QuoteService, SwapResponse, SwapTransactionService, TokenMetadataService,
};
use crate::solana::tokens::transaction::tests::unsigned_transaction_base64;
use crate::solana::tokens::TokenAccount;
use crate::solana::{LedgerClient, LedgerConnector};

pub const SOL: &str = "So11111111111111111111111111111111111111112";
pub const USDC: &str = "EPjFWdd5AufqSSqeM2qN1xzybapC8G4wEGGkZwyTDt1v";

/// Serve `router` on an ephemeral local port and return its base url.
pub async fn spawn_upstream(router: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    format!("http://{}", addr)
}

pub fn metadata(id: &str, symbol: &str, usd_price: Option<f64>, verified: bool) -> TokenMetadata {
    TokenMetadata {
        id: id.to_string(),
        symbol: symbol.to_string(),
        name: format!("{} Token", symbol),
        icon: Some(format!("https://icons.test/{}.png", symbol)),
        tags: if verified { vec!["verified".to_string()] } else { Vec::new() },
        usd_price,
        is_verified: verified,
        decimals: None,
    }
}

#[derive(Default)]
struct QuoteState {
    out_amount: String,
    failure: Option<String>,
    calls: usize,
    last_params: Option<QuoteParams>,
}

pub struct FakeQuoteService {
    state: Mutex<QuoteState>,
}

impl FakeQuoteService {
    pub fn returning(out_amount: &str) -> Self {
        Self {
            state: Mutex::new(QuoteState {
                out_amount: out_amount.to_string(),
                ..Default::default()
            }),
        }
    }

    pub fn fail_with(&self, reason: &str) {
        self.state.lock().unwrap().failure = Some(reason.to_string());
    }

    pub fn calls(&self) -> usize {
        self.state.lock().unwrap().calls
    }

    pub fn last_params(&self) -> Option<QuoteParams> {
        self.state.lock().unwrap().last_params.clone()
    }
}

#[async_trait]
impl QuoteService for FakeQuoteService {
    async fn get_swap_quote(&self, params: &QuoteParams) -> Result<Quote> {
        let mut state = self.state.lock().unwrap();
        state.calls += 1;
        state.last_params = Some(params.clone());
        if let Some(reason) = &state.failure {
            return Err(AppError::upstream(reason.clone()));
        }
        Quote::from_value(quote_json(&state.out_amount))
    }
}

pub struct FakeSwapService {
    transaction: String,
    calls: Mutex<usize>,
}

impl FakeSwapService {
    /// Always answers with an unsigned transaction paid for by `payer`.
    pub fn for_payer(payer: &Pubkey) -> Self {
        Self {
            transaction: unsigned_transaction_base64(payer),
            calls: Mutex::new(0),
        }
    }

    pub fn calls(&self) -> usize {
        *self.calls.lock().unwrap()
    }
}

#[async_trait]
impl SwapTransactionService for FakeSwapService {
    async fn build_swap_transaction(
        &self,
        _quote: &Quote,
        _payer: &Pubkey,
    ) -> Result<SwapResponse> {
        *self.calls.lock().unwrap() += 1;
        Ok(SwapResponse {
            swap_transaction: self.transaction.clone(),
        })
    }
}

#[derive(Default)]
struct LedgerState {
    lamports: u64,
    token_accounts: Vec<TokenAccount>,
    read_failure: Option<String>,
    send_failure: Option<String>,
    confirm_failure: Option<String>,
    submitted: Vec<VersionedTransaction>,
    confirmations: usize,
}

#[derive(Default)]
pub struct FakeLedger {
    state: Mutex<LedgerState>,
}

impl FakeLedger {
    pub fn with_holdings(lamports: u64, token_accounts: Vec<TokenAccount>) -> Self {
        Self {
            state: Mutex::new(LedgerState {
                lamports,
                token_accounts,
                ..Default::default()
            }),
        }
    }

    pub fn fail_reads(&self, reason: &str) {
        self.state.lock().unwrap().read_failure = Some(reason.to_string());
    }

    pub fn fail_send(&self, reason: &str) {
        self.state.lock().unwrap().send_failure = Some(reason.to_string());
    }

    pub fn fail_confirm(&self, reason: &str) {
        self.state.lock().unwrap().confirm_failure = Some(reason.to_string());
    }

    pub fn submitted(&self) -> Vec<VersionedTransaction> {
        self.state.lock().unwrap().submitted.clone()
    }

    pub fn confirmations(&self) -> usize {
        self.state.lock().unwrap().confirmations
    }
}

#[async_trait]
impl LedgerClient for FakeLedger {
    async fn get_balance(&self, _owner: &Pubkey) -> Result<u64> {
        let state = self.state.lock().unwrap();
        match &state.read_failure {
            Some(reason) => Err(AppError::upstream(reason.clone())),
            None => Ok(state.lamports),
        }
    }

    async fn get_token_accounts(&self, _owner: &Pubkey) -> Result<Vec<TokenAccount>> {
        let state = self.state.lock().unwrap();
        match &state.read_failure {
            Some(reason) => Err(AppError::upstream(reason.clone())),
            None => Ok(state.token_accounts.clone()),
        }
    }

    async fn send_transaction(&self, transaction: &VersionedTransaction) -> Result<Signature> {
        let mut state = self.state.lock().unwrap();
        if let Some(reason) = &state.send_failure {
            return Err(AppError::upstream(reason.clone()));
        }
        state.submitted.push(transaction.clone());
        Ok(transaction.signatures[0])
    }

    async fn confirm_transaction(&self, _signature: &Signature) -> Result<()> {
        let mut state = self.state.lock().unwrap();
        state.confirmations += 1;
        match &state.confirm_failure {
            Some(reason) => Err(AppError::upstream(reason.clone())),
            None => Ok(()),
        }
    }
}

pub struct FakeLedgerConnector {
    ledger: Arc<FakeLedger>,
    urls: Mutex<Vec<String>>,
}

impl FakeLedgerConnector {
    pub fn new(ledger: Arc<FakeLedger>) -> Self {
        Self {
            ledger,
            urls: Mutex::new(Vec::new()),
        }
    }

    pub fn connections(&self) -> usize {
        self.urls.lock().unwrap().len()
    }

    pub fn last_url(&self) -> Option<String> {
        self.urls.lock().unwrap().last().cloned()
    }
}

impl LedgerConnector for FakeLedgerConnector {
    fn connect(&self, rpc_url: &str) -> Arc<dyn LedgerClient> {
        self.urls.lock().unwrap().push(rpc_url.to_string());
        self.ledger.clone()
    }
}

pub struct FakeMetadataService {
    result: std::result::Result<Vec<TokenMetadata>, String>,
    searches: Mutex<Vec<(String, bool, usize)>>,
}

impl FakeMetadataService {
    pub fn returning(tokens: Vec<TokenMetadata>) -> Self {
        Self {
            result: Ok(tokens),
            searches: Mutex::new(Vec::new()),
        }
    }

    pub fn failing(reason: &str) -> Self {
        Self {
            result: Err(reason.to_string()),
            searches: Mutex::new(Vec::new()),
        }
    }

    pub fn calls(&self) -> usize {
        self.searches.lock().unwrap().len()
    }

    pub fn last_search(&self) -> Option<(String, bool, usize)> {
        self.searches.lock().unwrap().last().cloned()
    }
}

#[async_trait]
impl TokenMetadataService for FakeMetadataService {
    async fn search(
        &self,
        query: &str,
        exact_match: bool,
        limit: usize,
    ) -> Result<Vec<TokenMetadata>> {
        self.searches
            .lock()
            .unwrap()
            .push((query.to_string(), exact_match, limit));
        self.result.clone().map_err(AppError::upstream)
    }

    fn source(&self) -> &str {
        "fake-metadata"
    }
}
