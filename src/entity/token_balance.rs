use serde::{Deserialize, Serialize};

/// A positive balance of one asset held by a wallet, as read from the ledger.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenHolding {
    pub mint: String,
    pub raw_amount: u64,
    pub decimals: u8,
    pub ui_amount: f64,
    /// Token account holding the balance; the wallet itself for native SOL.
    pub token_account: String,
    pub is_native: bool,
}
