pub mod client;
pub mod jupiter;
pub mod ledger;
pub mod tokens;
pub mod utils;
pub mod wallet;

// Re-export commonly used items
pub use client::create_solana_client;
pub use ledger::{LedgerClient, LedgerConnector, RpcLedgerConnector};
pub use tokens::constants::SOL_MINT;
pub use wallet::{keypair_from_base58, keypair_to_base58, parse_pubkey};
