mod api;
pub mod models;
pub mod quote_service;
pub mod swap_service;
pub mod token_service;

pub use models::{Quote, QuoteParams, SwapResponse};
pub use quote_service::{JupiterQuoteService, QuoteService};
pub use swap_service::{JupiterSwapService, SwapTransactionService};
pub use token_service::{JupiterTokenService, TokenMetadataService};
