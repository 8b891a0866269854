//! Upstream pass-through
//!
//! Requests the gate allows are forwarded verbatim to the configured origin:
//! method, path and query, headers and body. The gate owns no page rendering;
//! the portal application behind it does.

use axum::{
    body::{to_bytes, Body},
    extract::{Request, State},
    http::{HeaderMap, HeaderName, StatusCode},
    response::Response,
};
use std::sync::Arc;

use super::GateState;
use crate::error::{Error, Result};

/// Request bodies larger than this are rejected rather than buffered
const MAX_BODY_BYTES: usize = 10 * 1024 * 1024;

/// Headers that must not cross the proxy boundary (RFC 9110 hop-by-hop),
/// plus `host` which is rewritten for the upstream connection.
const STRIPPED: [&str; 9] = [
    "connection",
    "keep-alive",
    "proxy-authenticate",
    "proxy-authorization",
    "te",
    "trailer",
    "transfer-encoding",
    "upgrade",
    "host",
];

/// Catch-all handler forwarding to the upstream origin
pub async fn forward(State(state): State<Arc<GateState>>, req: Request) -> Response {
    match forward_inner(&state, req).await {
        Ok(response) => response,
        Err(err) => {
            tracing::warn!(error = %err, "upstream forward failed");
            Response::builder()
                .status(StatusCode::BAD_GATEWAY)
                .body(Body::from("upstream unavailable"))
                .unwrap_or_default()
        }
    }
}

async fn forward_inner(state: &GateState, req: Request) -> Result<Response> {
    let (parts, body) = req.into_parts();

    let path_and_query = parts
        .uri
        .path_and_query()
        .map(|pq| pq.as_str())
        .unwrap_or("/");
    let url = format!("{}{}", state.config.upstream.origin, path_and_query);

    let body_bytes = to_bytes(body, MAX_BODY_BYTES)
        .await
        .map_err(|e| Error::Other(format!("request body: {}", e)))?;

    let upstream = state
        .client
        .request(parts.method, url)
        .headers(filter_headers(&parts.headers))
        .body(body_bytes)
        .send()
        .await?;

    let status = upstream.status();
    let headers = filter_headers(upstream.headers());
    let bytes = upstream.bytes().await?;

    let mut response = Response::builder().status(status);
    if let Some(map) = response.headers_mut() {
        *map = headers;
    }
    response
        .body(Body::from(bytes))
        .map_err(|e| Error::Other(format!("response build: {}", e)))
}

fn filter_headers(headers: &HeaderMap) -> HeaderMap {
    let mut filtered = HeaderMap::new();
    for (name, value) in headers {
        if !is_stripped(name) {
            filtered.append(name.clone(), value.clone());
        }
    }
    filtered
}

fn is_stripped(name: &HeaderName) -> bool {
    STRIPPED.iter().any(|h| name.as_str().eq_ignore_ascii_case(h))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    #[test]
    fn test_hop_by_hop_headers_stripped() {
        let mut headers = HeaderMap::new();
        headers.insert("connection", HeaderValue::from_static("keep-alive"));
        headers.insert("transfer-encoding", HeaderValue::from_static("chunked"));
        headers.insert("host", HeaderValue::from_static("gate.local"));
        headers.insert("cookie", HeaderValue::from_static("access_token=tok"));
        headers.insert("accept-language", HeaderValue::from_static("ka,en"));

        let filtered = filter_headers(&headers);
        assert!(filtered.get("connection").is_none());
        assert!(filtered.get("transfer-encoding").is_none());
        assert!(filtered.get("host").is_none());
        assert_eq!(
            filtered.get("cookie").map(|v| v.to_str().unwrap()),
            Some("access_token=tok")
        );
        assert!(filtered.get("accept-language").is_some());
    }
}
