//! Request cookie parsing

use axum::http::header::COOKIE;
use axum::http::HeaderMap;

/// Find a cookie value by name in the request headers
///
/// Walks every `Cookie` header; the first pair with a matching name wins.
/// Malformed pairs are skipped rather than rejected.
pub fn cookie_value(headers: &HeaderMap, name: &str) -> Option<String> {
    for header in headers.get_all(COOKIE) {
        let Ok(raw) = header.to_str() else {
            continue;
        };
        for pair in raw.split(';') {
            let pair = pair.trim();
            if let Some((key, value)) = pair.split_once('=') {
                if key == name {
                    return Some(value.to_string());
                }
            }
        }
    }
    None
}
