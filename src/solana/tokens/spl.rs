use serde::Deserialize;

use crate::entity::{AppError, Result, TokenHolding};
use crate::solana::utils::raw_to_ui_amount;

/// `tokenAmount` of a jsonParsed SPL token account.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParsedTokenAmount {
    pub amount: String,
    pub decimals: u8,
    #[serde(default)]
    pub ui_amount: Option<f64>,
    #[serde(default)]
    pub ui_amount_string: Option<String>,
}

/// `info` of a jsonParsed SPL token account.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParsedTokenAccountInfo {
    pub mint: String,
    #[serde(default)]
    pub owner: Option<String>,
    pub token_amount: ParsedTokenAmount,
}

#[derive(Debug, Deserialize)]
struct ParsedTokenAccountData {
    info: ParsedTokenAccountInfo,
}

/// An SPL token account owned by the wallet.
#[derive(Debug, Clone, PartialEq)]
pub struct TokenAccount {
    pub address: String,
    pub info: ParsedTokenAccountInfo,
}

impl TokenAccount {
    /// Validate the `parsed` object the RPC node returned for `address`.
    pub fn from_parsed(address: String, parsed: serde_json::Value) -> Result<Self> {
        let data: ParsedTokenAccountData = serde_json::from_value(parsed).map_err(|e| {
            AppError::upstream(format!(
                "Unexpected token account shape for {}: {}",
                address, e
            ))
        })?;

        Ok(Self {
            address,
            info: data.info,
        })
    }

    /// Human-readable balance: the node's string form, else its float, else derived from raw.
    fn ui_amount(&self, raw: u64) -> f64 {
        let amount = &self.info.token_amount;
        amount
            .ui_amount_string
            .as_deref()
            .and_then(|s| s.parse::<f64>().ok())
            .or(amount.ui_amount)
            .unwrap_or_else(|| raw_to_ui_amount(raw, amount.decimals))
    }

    /// `None` for empty accounts, which never appear in reports.
    pub fn to_holding(&self) -> Result<Option<TokenHolding>> {
        let raw = self.info.token_amount.amount.parse::<u64>().map_err(|e| {
            AppError::upstream(format!(
                "Invalid raw amount '{}' for token account {}: {}",
                self.info.token_amount.amount, self.address, e
            ))
        })?;

        let ui_amount = self.ui_amount(raw);
        if ui_amount <= 0.0 {
            return Ok(None);
        }

        Ok(Some(TokenHolding {
            mint: self.info.mint.clone(),
            raw_amount: raw,
            decimals: self.info.token_amount.decimals,
            ui_amount,
            token_account: self.address.clone(),
            is_native: false,
        }))
    }
}

/// Holdings with a strictly positive balance, in ledger order.
pub fn token_holdings(accounts: &[TokenAccount]) -> Result<Vec<TokenHolding>> {
    let mut holdings = Vec::with_capacity(accounts.len());
    for account in accounts {
        if let Some(holding) = account.to_holding()? {
            holdings.push(holding);
        }
    }
    Ok(holdings)
}
