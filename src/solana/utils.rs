use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use std::str::FromStr;

use crate::entity::{AppError, Result};

// Constants for conversion
pub const LAMPORTS_PER_SOL: f64 = 1_000_000_000.0;

/// Convert lamports to SOL
pub fn lamports_to_sol(lamports: u64) -> f64 {
    lamports as f64 / LAMPORTS_PER_SOL
}

/// Convert a raw integer amount to its human-readable value.
pub fn raw_to_ui_amount(raw: u64, decimals: u8) -> f64 {
    raw as f64 / 10f64.powi(decimals as i32)
}

/// Parse a caller-supplied amount of base units.
///
/// Accepts any decimal notation but requires a strictly positive whole number
/// that fits in `u64`.
pub fn parse_base_units(amount: &str) -> Result<u64> {
    let amount = amount.trim();
    if amount.is_empty() {
        return Err(AppError::validation("Missing required field: inputAmount"));
    }

    let value = Decimal::from_str(amount)
        .or_else(|_| Decimal::from_scientific(amount))
        .map_err(|_| {
            AppError::validation(format!(
                "inputAmount must be a positive number, got '{}'",
                amount
            ))
        })?;

    if value <= Decimal::ZERO {
        return Err(AppError::validation(format!(
            "inputAmount must be a positive number, got '{}'",
            amount
        )));
    }

    if !value.fract().is_zero() {
        return Err(AppError::validation(format!(
            "inputAmount must be a whole number of base units, got '{}'",
            amount
        )));
    }

    value
        .to_u64()
        .ok_or_else(|| AppError::validation(format!("inputAmount is too large: '{}'", amount)))
}

/// Accepts only absolute http(s) URLs for caller-supplied RPC endpoints.
pub fn validate_rpc_url(rpc_url: &str) -> Result<String> {
    let parsed = reqwest::Url::parse(rpc_url.trim())
        .map_err(|_| AppError::validation(format!("Invalid rpcUrl: {}", rpc_url)))?;

    match parsed.scheme() {
        "http" | "https" => Ok(rpc_url.trim().to_string()),
        other => Err(AppError::validation(format!(
            "rpcUrl must use http or https, got {}",
            other
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn converts_raw_amounts() {
        assert_eq!(lamports_to_sol(2_000_000_000), 2.0);
        assert_eq!(raw_to_ui_amount(1_500_000, 6), 1.5);
        assert_eq!(raw_to_ui_amount(42, 0), 42.0);
    }

    #[test]
    fn parses_positive_whole_amounts() {
        assert_eq!(parse_base_units("1000000").unwrap(), 1_000_000);
        assert_eq!(parse_base_units(" 25.000 ").unwrap(), 25);
        assert_eq!(parse_base_units("1e3").unwrap(), 1000);
    }

    #[test]
    fn rejects_non_positive_amounts() {
        for input in ["-5", "0", "0.0", "abc", ""] {
            let err = parse_base_units(input).unwrap_err();
            assert!(matches!(err, AppError::Validation(_)), "{}", input);
        }
        let err = parse_base_units("-5").unwrap_err();
        assert!(err.to_string().contains("positive number"));
    }

    #[test]
    fn rejects_fractional_and_oversized_amounts() {
        assert!(parse_base_units("0.5").is_err());
        assert!(parse_base_units("18446744073709551616").is_err());
    }

    #[test]
    fn validates_rpc_urls() {
        assert!(validate_rpc_url("https://api.mainnet-beta.solana.com").is_ok());
        assert!(validate_rpc_url("http://127.0.0.1:8899").is_ok());
        assert!(validate_rpc_url("ftp://example.org").is_err());
        assert!(validate_rpc_url("not a url").is_err());
    }
}
