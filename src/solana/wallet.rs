use solana_sdk::{pubkey::Pubkey, signature::Keypair};
use std::str::FromStr;

use crate::entity::{AppError, Result};

/// Length of a Solana keypair's secret representation (32 secret + 32 public bytes).
pub const KEYPAIR_LENGTH: usize = 64;

/// Serialize Keypair (64 bytes) to base58.
pub fn keypair_to_base58(keypair: &Keypair) -> String {
    bs58::encode(keypair.to_bytes()).into_string()
}

/// Restore Keypair from base58 string (64 bytes).
pub fn keypair_from_base58(keypair_base58: &str) -> Result<Keypair> {
    let keypair_bytes = bs58::decode(keypair_base58.trim())
        .into_vec()
        .map_err(|e| AppError::Decode(format!("not valid base58: {}", e)))?;

    if keypair_bytes.len() != KEYPAIR_LENGTH {
        return Err(AppError::Decode(format!(
            "expected {} bytes, got {}",
            KEYPAIR_LENGTH,
            keypair_bytes.len()
        )));
    }

    #[allow(deprecated)]
    Keypair::from_bytes(&keypair_bytes)
        .map_err(|e| AppError::Decode(format!("malformed keypair bytes: {}", e)))
}

/// Convert base58 string to Solana `Pubkey`.
pub fn parse_pubkey(address: &str) -> Result<Pubkey> {
    Pubkey::from_str(address.trim())
        .map_err(|_| AppError::validation(format!("Invalid Solana address: {}", address)))
}
