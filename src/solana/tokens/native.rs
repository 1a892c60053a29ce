use crate::entity::TokenHolding;
use crate::solana::tokens::constants::{SOL_DECIMALS, SOL_MINT};
use crate::solana::utils::lamports_to_sol;

/// Synthetic holding for the wallet's native SOL; `None` unless the balance is positive.
pub fn native_holding(wallet: &str, lamports: u64) -> Option<TokenHolding> {
    if lamports == 0 {
        return None;
    }

    Some(TokenHolding {
        mint: SOL_MINT.to_string(),
        raw_amount: lamports,
        decimals: SOL_DECIMALS,
        ui_amount: lamports_to_sol(lamports),
        token_account: wallet.to_string(),
        is_native: true,
    })
}
