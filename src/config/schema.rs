//! Configuration schema definitions

use serde::{Deserialize, Serialize};

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,

    #[serde(default)]
    pub upstream: UpstreamConfig,

    #[serde(default)]
    pub auth: AuthConfig,

    #[serde(default)]
    pub gate: GateRules,
}

/// Listener configuration for the gate itself
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    4180
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

/// Upstream application the gate fronts
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpstreamConfig {
    /// Origin the allowed requests are forwarded to
    #[serde(default = "default_origin")]
    pub origin: String,
}

fn default_origin() -> String {
    "http://127.0.0.1:3000".to_string()
}

impl Default for UpstreamConfig {
    fn default() -> Self {
        Self {
            origin: default_origin(),
        }
    }
}

/// Session verification settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthConfig {
    /// HMAC secret shared with the auth service that issues tokens
    #[serde(default = "default_secret")]
    pub secret: String,

    /// Name of the httpOnly session cookie the gate verifies
    #[serde(default = "default_access_cookie")]
    pub access_cookie: String,

    /// Name of the non-httpOnly role mirror cookie. Client-side UI hint
    /// only; the gate never reads it.
    #[serde(default = "default_role_cookie")]
    pub role_cookie: String,

    /// Name of the httpOnly refresh cookie, exchanged by the auth service
    #[serde(default = "default_refresh_cookie")]
    pub refresh_cookie: String,

    /// Lifetime for tokens minted by the `token` dev command
    #[serde(default = "default_access_ttl")]
    pub access_ttl_secs: i64,

    /// Refresh token lifetime (7 days), informational for the dev command
    #[serde(default = "default_refresh_ttl")]
    pub refresh_ttl_secs: i64,
}

fn default_secret() -> String {
    "edgegate-dev-secret-change-in-production".to_string()
}

fn default_access_cookie() -> String {
    "access_token".to_string()
}

fn default_role_cookie() -> String {
    "role".to_string()
}

fn default_refresh_cookie() -> String {
    "refresh_token".to_string()
}

fn default_access_ttl() -> i64 {
    3600
}

fn default_refresh_ttl() -> i64 {
    7 * 24 * 3600
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            secret: default_secret(),
            access_cookie: default_access_cookie(),
            role_cookie: default_role_cookie(),
            refresh_cookie: default_refresh_cookie(),
            access_ttl_secs: default_access_ttl(),
            refresh_ttl_secs: default_refresh_ttl(),
        }
    }
}

/// Gate scope configuration
///
/// The exclusion list is part of the external contract: paths listed here are
/// never evaluated by the gate. Getting it wrong either disables protection
/// or breaks asset delivery.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GateRules {
    /// Path prefixes the gate never evaluates
    #[serde(default = "default_exclude_prefixes")]
    pub exclude_prefixes: Vec<String>,

    /// Exact paths the gate never evaluates
    #[serde(default = "default_exclude_paths")]
    pub exclude_paths: Vec<String>,
}

fn default_exclude_prefixes() -> Vec<String> {
    ["/api", "/_next", "/static", "/public", "/og-image", "/logo", "/seo"]
        .into_iter()
        .map(String::from)
        .collect()
}

fn default_exclude_paths() -> Vec<String> {
    [
        "/favicon.ico",
        "/sitemap.xml",
        "/robots.txt",
        "/feed.xml",
        "/manifest.json",
        "/healthz",
    ]
    .into_iter()
    .map(String::from)
    .collect()
}

impl Default for GateRules {
    fn default() -> Self {
        Self {
            exclude_prefixes: default_exclude_prefixes(),
            exclude_paths: default_exclude_paths(),
        }
    }
}
