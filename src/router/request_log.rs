use axum::{extract::Request, middleware::Next, response::Response};
use log::{info, warn};
use std::time::Instant;

/// Log method, path, status and latency of every request.
///
/// Query strings are left out since `/validate-key` carries secret key material there.
pub async fn log_requests(req: Request, next: Next) -> Response {
    let start = Instant::now();
    let method = req.method().clone();
    let path = req.uri().path().to_string();

    let response = next.run(req).await;

    let status = response.status();
    let elapsed = start.elapsed();
    if status.is_server_error() {
        warn!("{} {} -> {} in {:?}", method, path, status.as_u16(), elapsed);
    } else {
        info!("{} {} -> {} in {:?}", method, path, status.as_u16(), elapsed);
    }

    response
}
