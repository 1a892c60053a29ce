use reqwest::RequestBuilder;
use serde_json::Value;

use crate::entity::{AppError, Result};

/// Send the request and return its JSON body.
///
/// Network errors and non-success statuses become [`AppError::UpstreamHttp`]
/// carrying the URL, status and body.
pub(crate) async fn fetch_json(request: RequestBuilder, url: &str) -> Result<Value> {
    let response = request.send().await.map_err(|e| AppError::UpstreamHttp {
        url: url.to_string(),
        status: None,
        body: e.to_string(),
    })?;

    let status = response.status();
    let body = response.text().await.map_err(|e| AppError::UpstreamHttp {
        url: url.to_string(),
        status: Some(status.as_u16()),
        body: format!("unreadable body: {}", e),
    })?;

    if !status.is_success() {
        return Err(AppError::UpstreamHttp {
            url: url.to_string(),
            status: Some(status.as_u16()),
            body,
        });
    }

    let value = serde_json::from_str::<Value>(&body)
        .map_err(|e| AppError::upstream(format!("{} returned invalid JSON: {}", url, e)))?;

    check_for_api_error(value)
}

/// Jupiter reports some failures as `{"error": ...}` with a success status.
pub(crate) fn check_for_api_error(value: Value) -> Result<Value> {
    match value.get("error") {
        Some(Value::Null) | None => Ok(value),
        Some(Value::String(error)) => {
            Err(AppError::upstream(format!("Jupiter API error: {}", error)))
        }
        Some(error) => Err(AppError::upstream(format!("Jupiter API error: {}", error))),
    }
}
