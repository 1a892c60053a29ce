use base64::{engine::general_purpose::STANDARD, Engine as _};
use log::debug;
use solana_sdk::{signature::Keypair, signer::Signer, transaction::VersionedTransaction};

use crate::entity::{AppError, Result};

/// Deserialize the aggregator's base64 transaction blob.
pub fn decode_transaction(encoded: &str) -> Result<VersionedTransaction> {
    let bytes = STANDARD
        .decode(encoded.trim())
        .map_err(|e| AppError::upstream(format!("Swap transaction is not valid base64: {}", e)))?;

    bincode::deserialize::<VersionedTransaction>(&bytes)
        .map_err(|e| AppError::upstream(format!("Failed to deserialize transaction: {}", e)))
}

/// Sign the transaction's message with every given keypair.
///
/// Each signer must be one of the message's required signers.
pub fn sign_transaction(
    transaction: VersionedTransaction,
    signers: &[&Keypair],
) -> Result<VersionedTransaction> {
    let required = transaction.message.header().num_required_signatures as usize;
    let static_keys = transaction.message.static_account_keys();
    for signer in signers {
        let pubkey = signer.pubkey();
        if !static_keys.iter().take(required).any(|key| *key == pubkey) {
            return Err(AppError::upstream(format!(
                "Payer {} is not a required signer of the swap transaction",
                pubkey
            )));
        }
    }

    let signed = VersionedTransaction::try_new(transaction.message, signers)
        .map_err(|e| AppError::upstream(format!("Failed to sign transaction: {}", e)))?;

    debug!(
        "Transaction signed with {} signature(s)",
        signed.signatures.len()
    );

    Ok(signed)
}
