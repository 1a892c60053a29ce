// Native SOL, as presented in wallet reports
pub const SOL_MINT: &str = "So11111111111111111111111111111111111111112";
pub const SOL_SYMBOL: &str = "SOL";
pub const SOL_NAME: &str = "Solana";
pub const SOL_LOGO_URI: &str = "https://raw.githubusercontent.com/solana-labs/token-list/main/assets/mainnet/So11111111111111111111111111111111111111112/logo.png";

// Define token decimals
pub const SOL_DECIMALS: u8 = 9;
