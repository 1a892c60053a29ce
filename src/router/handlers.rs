use axum::{
    extract::{rejection::JsonRejection, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use chrono::Utc;
use log::{error, info};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use solana_sdk::signer::Signer;
use std::sync::Arc;

use crate::di::ServiceContainer;
use crate::entity::{
    AppError, ReportOptions, Result, SwapRequest, TokenMetadata, SWAP_SLIPPAGE_BPS,
};
use crate::router::response::Success;
use crate::solana::keypair_from_base58;

const DEFAULT_SEARCH_LIMIT: usize = 10;
const MAX_SEARCH_LIMIT: usize = 100;

/// Read a body field as text. Numbers are accepted so `inputAmount` may be sent either way.
fn text_field(body: &Value, key: &str) -> Result<Option<String>> {
    match body.get(key) {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(s)) => Ok(Some(s.trim().to_string())),
        Some(Value::Number(n)) => Ok(Some(n.to_string())),
        Some(_) => Err(AppError::validation(format!("{} must be a string", key))),
    }
}

fn swap_request_from_body(body: &Value) -> Result<SwapRequest> {
    if !body.is_object() {
        return Err(AppError::validation("Request body must be a JSON object"));
    }

    Ok(SwapRequest {
        input_mint: text_field(body, "inputMint")?.unwrap_or_default(),
        output_mint: text_field(body, "outputMint")?.unwrap_or_default(),
        input_amount: text_field(body, "inputAmount")?.unwrap_or_default(),
        rpc_url: text_field(body, "rpcUrl")?.filter(|url| !url.is_empty()),
        signer: text_field(body, "signer")?.unwrap_or_default(),
    })
}

fn parse_flag(name: &str, value: Option<&str>, default: bool) -> Result<bool> {
    match value.map(str::trim) {
        None | Some("") => Ok(default),
        Some(v) if v.eq_ignore_ascii_case("true") || v == "1" => Ok(true),
        Some(v) if v.eq_ignore_ascii_case("false") || v == "0" => Ok(false),
        Some(v) => Err(AppError::validation(format!(
            "{} must be true or false, got '{}'",
            name, v
        ))),
    }
}

fn swap_failure(status: StatusCode, message: String) -> Response {
    (
        status,
        Json(json!({
            "success": false,
            "error": message,
            "swapSignature": null,
            "outAmount": null,
        })),
    )
        .into_response()
}

/// POST /swap
pub async fn execute_swap(
    State(services): State<Arc<ServiceContainer>>,
    body: std::result::Result<Json<Value>, JsonRejection>,
) -> Response {
    let request = match body
        .map_err(AppError::from)
        .and_then(|Json(body)| swap_request_from_body(&body))
    {
        Ok(request) => request,
        Err(e) => return swap_failure(e.status_code(), e.to_string()),
    };

    match services.swap_interactor().execute_swap(&request).await {
        Ok(result) if result.success => (StatusCode::OK, Json(result)).into_response(),
        Ok(result) => (StatusCode::INTERNAL_SERVER_ERROR, Json(result)).into_response(),
        Err(e) => {
            if !e.is_client_error() {
                error!("Swap request failed: {}", e);
            }
            swap_failure(e.status_code(), e.to_string())
        }
    }
}

/// GET /swap: usage notes, no side effects
pub async fn swap_usage() -> Json<Value> {
    Json(json!({
        "message": "POST a JSON body to this endpoint to execute a swap",
        "method": "POST",
        "slippageBps": SWAP_SLIPPAGE_BPS,
        "body": {
            "inputMint": "Mint address of the token to sell",
            "outputMint": "Mint address of the token to buy",
            "inputAmount": "Amount to sell in base units of the input token",
            "rpcUrl": "Optional Solana RPC endpoint",
            "signer": "Base58-encoded 64-byte secret key of the payer",
        },
        "example": {
            "inputMint": "So11111111111111111111111111111111111111112",
            "outputMint": "EPjFWdd5AufqSSqeM2qN1xzybapC8G4wEGGkZwyTDt1v",
            "inputAmount": "1000000",
            "rpcUrl": "https://api.mainnet-beta.solana.com",
            "signer": "<base58 secret key>",
        },
    }))
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WalletTokensQuery {
    address: Option<String>,
    rpc_url: Option<String>,
    include_logo: Option<String>,
    include_tags: Option<String>,
}

/// GET /wallet-tokens
pub async fn wallet_tokens(
    State(services): State<Arc<ServiceContainer>>,
    Query(query): Query<WalletTokensQuery>,
) -> Result<Response> {
    let defaults = ReportOptions::default();
    let options = ReportOptions {
        include_logo: parse_flag(
            "includeLogo",
            query.include_logo.as_deref(),
            defaults.include_logo,
        )?,
        include_tags: parse_flag(
            "includeTags",
            query.include_tags.as_deref(),
            defaults.include_tags,
        )?,
    };

    let report = services
        .balance_interactor()
        .get_wallet_report(
            query.address.as_deref().unwrap_or_default(),
            query.rpc_url.as_deref(),
            options,
        )
        .await?;

    Ok(Success::new(report).into_response())
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenMetadataQuery {
    query: Option<String>,
    exact_match: Option<String>,
    limit: Option<String>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct SearchMetadata {
    query: String,
    exact_match: bool,
    limit: usize,
    count: usize,
    timestamp: String,
}

#[derive(Serialize)]
struct SearchResult {
    metadata: SearchMetadata,
    tokens: Vec<TokenMetadata>,
}

fn parse_limit(value: Option<&str>) -> Result<usize> {
    let value = match value.map(str::trim) {
        None | Some("") => return Ok(DEFAULT_SEARCH_LIMIT),
        Some(v) => v,
    };

    match value.parse::<usize>() {
        Ok(limit) if (1..=MAX_SEARCH_LIMIT).contains(&limit) => Ok(limit),
        _ => Err(AppError::validation(format!(
            "limit must be an integer between 1 and {}, got '{}'",
            MAX_SEARCH_LIMIT, value
        ))),
    }
}

/// GET /token-metadata
pub async fn token_metadata(
    State(services): State<Arc<ServiceContainer>>,
    Query(params): Query<TokenMetadataQuery>,
) -> Result<Response> {
    let query = params.query.as_deref().map(str::trim).unwrap_or_default();
    if query.is_empty() {
        return Err(AppError::validation("Missing required parameter: query"));
    }
    let exact_match = parse_flag("exactMatch", params.exact_match.as_deref(), false)?;
    let limit = parse_limit(params.limit.as_deref())?;

    let tokens = services
        .token_service()
        .search(query, exact_match, limit)
        .await?;

    info!("Token search '{}' returned {} record(s)", query, tokens.len());

    Ok(Success::new(SearchResult {
        metadata: SearchMetadata {
            query: query.to_string(),
            exact_match,
            limit,
            count: tokens.len(),
            timestamp: Utc::now().to_rfc3339(),
        },
        tokens,
    })
    .into_response())
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidateKeyQuery {
    private_key: Option<String>,
}

/// GET /validate-key
pub async fn validate_key(Query(query): Query<ValidateKeyQuery>) -> Response {
    let private_key = query.private_key.as_deref().map(str::trim).unwrap_or_default();
    if private_key.is_empty() {
        return key_failure("Missing required parameter: privateKey".to_string());
    }

    match keypair_from_base58(private_key) {
        Ok(keypair) => Json(json!({
            "success": true,
            "publicKey": keypair.pubkey().to_string(),
            "message": "Private key is valid",
        }))
        .into_response(),
        Err(e) => key_failure(e.to_string()),
    }
}

fn key_failure(message: String) -> Response {
    (
        StatusCode::BAD_REQUEST,
        Json(json!({
            "success": false,
            "publicKey": "",
            "error": message,
        })),
    )
        .into_response()
}

/// GET /health
pub async fn health() -> Json<Value> {
    Json(json!({
        "status": "OK",
        "timestamp": Utc::now().to_rfc3339(),
    }))
}
