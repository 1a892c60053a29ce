use serde::{Deserialize, Serialize};

/// Slippage tolerance applied to every swap quote, in basis points (1%).
pub const SWAP_SLIPPAGE_BPS: u16 = 100;

/// A swap as submitted by the caller, before any validation.
///
/// Empty strings stand for absent fields; the orchestrator rejects them
/// before any upstream call is made.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SwapRequest {
    pub input_mint: String,
    pub output_mint: String,
    pub input_amount: String,
    pub rpc_url: Option<String>,
    pub signer: String,
}
