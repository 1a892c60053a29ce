use serde::{Deserialize, Serialize};

use crate::solana::jupiter::models::option_string_or_float;

/// Token record returned by the metadata/price search service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenMetadata {
    #[serde(alias = "address", alias = "mint")]
    pub id: String,
    pub symbol: String,
    pub name: String,
    #[serde(default, alias = "logoURI")]
    pub icon: Option<String>,
    #[serde(default)]
    pub tags: Vec<String>,
    /// Absent when the service knows no market price for the token.
    #[serde(default, alias = "price", with = "option_string_or_float")]
    pub usd_price: Option<f64>,
    #[serde(default, alias = "verified")]
    pub is_verified: bool,
    #[serde(default)]
    pub decimals: Option<u8>,
}
