use std::sync::Arc;

use reqwest::Client;

use crate::config::Config;
use crate::interactor::{
    BalanceInteractor, BalanceInteractorImpl, SwapInteractor, SwapInteractorImpl,
};
use crate::solana::jupiter::{
    JupiterQuoteService, JupiterSwapService, JupiterTokenService, QuoteService,
    SwapTransactionService, TokenMetadataService,
};
use crate::solana::{LedgerConnector, RpcLedgerConnector};

/// ServiceContainer provides access to core application dependencies
pub struct ServiceContainer {
    // Interactors
    swap_interactor: Arc<dyn SwapInteractor>,
    balance_interactor: Arc<dyn BalanceInteractor>,

    // Token search, also served directly
    token_service: Arc<dyn TokenMetadataService>,
}

impl ServiceContainer {
    /// Wire the production services from configuration
    pub fn from_config(config: &Config) -> Self {
        // One connection pool shared by every Jupiter client
        let http_client = Client::new();

        let quote_service = Arc::new(JupiterQuoteService::new(
            http_client.clone(),
            config.quote_api_url.clone(),
        )) as Arc<dyn QuoteService>;

        let swap_service = Arc::new(JupiterSwapService::new(
            http_client.clone(),
            config.quote_api_url.clone(),
        )) as Arc<dyn SwapTransactionService>;

        let token_service = Arc::new(JupiterTokenService::new(
            http_client,
            config.token_api_url.clone(),
            config.metadata_timeout(),
        )) as Arc<dyn TokenMetadataService>;

        let ledger_connector = Arc::new(RpcLedgerConnector::new(
            config.solana_rpc_url.clone(),
            config.confirm_timeout(),
            config.confirm_poll_interval(),
        )) as Arc<dyn LedgerConnector>;

        let swap_interactor = Arc::new(SwapInteractorImpl::new(
            quote_service,
            swap_service,
            ledger_connector.clone(),
            config.solana_rpc_url.clone(),
        )) as Arc<dyn SwapInteractor>;

        let balance_interactor = Arc::new(BalanceInteractorImpl::new(
            token_service.clone(),
            ledger_connector,
            config.solana_rpc_url.clone(),
        )) as Arc<dyn BalanceInteractor>;

        Self::new(swap_interactor, balance_interactor, token_service)
    }

    /// Assemble a container from already-built parts
    pub fn new(
        swap_interactor: Arc<dyn SwapInteractor>,
        balance_interactor: Arc<dyn BalanceInteractor>,
        token_service: Arc<dyn TokenMetadataService>,
    ) -> Self {
        Self {
            swap_interactor,
            balance_interactor,
            token_service,
        }
    }

    // Accessor methods

    pub fn swap_interactor(&self) -> Arc<dyn SwapInteractor> {
        self.swap_interactor.clone()
    }

    pub fn balance_interactor(&self) -> Arc<dyn BalanceInteractor> {
        self.balance_interactor.clone()
    }

    pub fn token_service(&self) -> Arc<dyn TokenMetadataService> {
        self.token_service.clone()
    }
}
