mod app_error;
mod swap;
mod swap_result;
mod token;
mod token_balance;
mod wallet_report;

pub use app_error::{AppError, Result};
pub use swap::{SwapRequest, SWAP_SLIPPAGE_BPS};
pub use swap_result::SwapResult;
pub use token::TokenMetadata;
pub use token_balance::TokenHolding;
pub use wallet_report::{
    EnrichedHolding, ReportMetadata, ReportOptions, ReportSummary, WalletReport,
};
