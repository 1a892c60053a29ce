use async_trait::async_trait;
use log::{debug, error, info};
use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;

use crate::entity::{AppError, Result, TokenMetadata};
use crate::solana::jupiter::api::fetch_json;

/// Metadata and price search over tokens
#[async_trait]
pub trait TokenMetadataService: Send + Sync {
    /// Search by address, symbol or name. `query` may hold several
    /// comma-separated terms.
    async fn search(
        &self,
        query: &str,
        exact_match: bool,
        limit: usize,
    ) -> Result<Vec<TokenMetadata>>;

    /// Name of the upstream, reported as provenance in wallet reports.
    fn source(&self) -> &str;
}

// The search endpoint answers with a bare list or a wrapped one
#[derive(Deserialize)]
#[serde(untagged)]
enum SearchResponse {
    List(Vec<TokenMetadata>),
    Wrapped {
        #[serde(alias = "data")]
        tokens: Vec<TokenMetadata>,
    },
}

impl SearchResponse {
    fn into_tokens(self) -> Vec<TokenMetadata> {
        match self {
            SearchResponse::List(tokens) | SearchResponse::Wrapped { tokens } => tokens,
        }
    }
}

/// Metadata service backed by the Jupiter token search API
pub struct JupiterTokenService {
    http_client: Client,
    search_url: String,
    timeout: Duration,
}

impl JupiterTokenService {
    pub fn new(http_client: Client, search_url: impl Into<String>, timeout: Duration) -> Self {
        Self {
            http_client,
            search_url: search_url.into(),
            timeout,
        }
    }
}

#[async_trait]
impl TokenMetadataService for JupiterTokenService {
    async fn search(
        &self,
        query: &str,
        exact_match: bool,
        limit: usize,
    ) -> Result<Vec<TokenMetadata>> {
        debug!(
            "Searching token metadata: query={}, exact_match={}, limit={}",
            query, exact_match, limit
        );

        let request = self
            .http_client
            .get(&self.search_url)
            .query(&[
                ("query", query.to_string()),
                ("exactMatch", exact_match.to_string()),
                ("limit", limit.to_string()),
            ])
            .timeout(self.timeout);

        let value = fetch_json(request, &self.search_url).await.map_err(|e| {
            error!("Token metadata search failed: {}", e);
            e
        })?;

        let tokens = serde_json::from_value::<SearchResponse>(value)
            .map_err(|e| AppError::upstream(format!("Unexpected token search response: {}", e)))?
            .into_tokens();

        let tokens = select_results(tokens, query, exact_match, limit);
        info!("Token metadata search returned {} token(s)", tokens.len());

        Ok(tokens)
    }

    fn source(&self) -> &str {
        &self.search_url
    }
}

/// Split a query into its comma-separated, non-empty terms.
pub fn query_terms(query: &str) -> Vec<&str> {
    query
        .split(',')
        .map(str::trim)
        .filter(|term| !term.is_empty())
        .collect()
}

/// Apply exact matching and the result limit to upstream results.
///
/// An exact match is the address itself, or the symbol or name ignoring case.
pub fn select_results(
    tokens: Vec<TokenMetadata>,
    query: &str,
    exact_match: bool,
    limit: usize,
) -> Vec<TokenMetadata> {
    let terms = query_terms(query);
    tokens
        .into_iter()
        .filter(|token| {
            !exact_match
                || terms.iter().any(|term| {
                    token.id == *term
                        || token.symbol.eq_ignore_ascii_case(term)
                        || token.name.eq_ignore_ascii_case(term)
                })
        })
        .take(limit)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::spawn_upstream;
    use axum::{extract::Query, http::StatusCode, routing::get, Json, Router};
    use serde_json::json;
    use std::collections::HashMap;

    fn token(id: &str, symbol: &str, name: &str) -> TokenMetadata {
        TokenMetadata {
            id: id.to_string(),
            symbol: symbol.to_string(),
            name: name.to_string(),
            icon: None,
            tags: vec![],
            usd_price: Some(1.0),
            is_verified: true,
            decimals: Some(6),
        }
    }

    #[test]
    fn exact_match_keeps_only_exact_hits() {
        let tokens = vec![
            token("mintA", "USDC", "USD Coin"),
            token("mintB", "USDCet", "USD Coin (Wormhole)"),
            token("mintC", "BONK", "Bonk"),
        ];

        let exact = select_results(tokens.clone(), "usdc, mintC", true, 10);
        let ids: Vec<_> = exact.iter().map(|t| t.id.as_str()).collect();
        assert_eq!(ids, vec!["mintA", "mintC"]);

        let fuzzy = select_results(tokens, "usdc", false, 2);
        assert_eq!(fuzzy.len(), 2);
    }

    #[test]
    fn parses_upstream_records() {
        let list: SearchResponse = serde_json::from_value(json!([{
            "id": "mintA",
            "symbol": "JUP",
            "name": "Jupiter",
            "icon": "https://example.org/jup.png",
            "tags": ["verified", "strict"],
            "usdPrice": 0.85,
            "isVerified": true,
            "decimals": 6
        }]))
        .unwrap();
        let tokens = list.into_tokens();
        assert_eq!(tokens[0].usd_price, Some(0.85));
        assert_eq!(tokens[0].tags, vec!["verified", "strict"]);

        let wrapped: SearchResponse = serde_json::from_value(json!({"data": [{
            "address": "mintB",
            "symbol": "X",
            "name": "X token",
            "logoURI": "https://example.org/x.png",
            "price": "1.25"
        }]}))
        .unwrap();
        let tokens = wrapped.into_tokens();
        assert_eq!(tokens[0].id, "mintB");
        assert_eq!(tokens[0].icon.as_deref(), Some("https://example.org/x.png"));
        assert_eq!(tokens[0].usd_price, Some(1.25));
        assert!(!tokens[0].is_verified);
    }

    #[tokio::test]
    async fn search_sends_query_flags_and_limit() {
        let app = Router::new().route(
            "/search",
            get(|Query(query): Query<HashMap<String, String>>| async move {
                assert_eq!(query["query"], "mintA,mintB");
                assert_eq!(query["exactMatch"], "true");
                assert_eq!(query["limit"], "2");
                Json(json!([
                    {"id": "mintA", "symbol": "A", "name": "A", "usdPrice": 2.0},
                    {"id": "mintB", "symbol": "B", "name": "B"},
                    {"id": "mintZ", "symbol": "Z", "name": "Z"}
                ]))
            }),
        );
        let base_url = spawn_upstream(app).await;

        let service = JupiterTokenService::new(
            Client::new(),
            format!("{}/search", base_url),
            Duration::from_secs(10),
        );
        let tokens = service.search("mintA,mintB", true, 2).await.unwrap();
        let ids: Vec<_> = tokens.iter().map(|t| t.id.as_str()).collect();
        assert_eq!(ids, vec!["mintA", "mintB"]);
        assert_eq!(tokens[1].usd_price, None);
    }

    #[tokio::test]
    async fn failed_search_reports_url_status_and_body() {
        let app = Router::new().route(
            "/search",
            get(|| async { (StatusCode::SERVICE_UNAVAILABLE, "maintenance") }),
        );
        let base_url = spawn_upstream(app).await;
        let search_url = format!("{}/search", base_url);

        let service =
            JupiterTokenService::new(Client::new(), search_url.clone(), Duration::from_secs(10));
        match service.search("JUP", false, 5).await {
            Err(AppError::UpstreamHttp { url, status, body }) => {
                assert_eq!(url, search_url);
                assert_eq!(status, Some(503));
                assert_eq!(body, "maintenance");
            }
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[tokio::test]
    async fn slow_upstream_times_out() {
        let app = Router::new().route(
            "/search",
            get(|| async {
                tokio::time::sleep(Duration::from_secs(2)).await;
                Json(json!([]))
            }),
        );
        let base_url = spawn_upstream(app).await;

        let service = JupiterTokenService::new(
            Client::new(),
            format!("{}/search", base_url),
            Duration::from_millis(100),
        );
        let err = service.search("JUP", false, 5).await.unwrap_err();
        assert!(matches!(err, AppError::UpstreamHttp { status: None, .. }));
    }
}
