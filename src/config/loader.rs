//! Configuration loading and environment variable interpolation

use crate::error::{Error, Result};
use regex::Regex;
use std::env;
use std::fs;
use std::path::Path;

use super::Config;

const CONFIG_FILENAME: &str = "edgegate.toml";

/// Load configuration from edgegate.toml
pub fn load_config() -> Result<Config> {
    let config_path = find_config_file()?;
    load_config_from_path(&config_path)
}

/// Load configuration from a specific path
pub fn load_config_from_path(path: &Path) -> Result<Config> {
    let content = fs::read_to_string(path).map_err(|_| Error::ConfigNotFound)?;
    let content = interpolate_env_vars(&content);
    let config: Config = toml::from_str(&content)?;
    Ok(config)
}

/// Find the configuration file, searching upward from current directory
fn find_config_file() -> Result<std::path::PathBuf> {
    let mut current = env::current_dir().map_err(|e| Error::Config(e.to_string()))?;

    loop {
        let config_path = current.join(CONFIG_FILENAME);
        if config_path.exists() {
            return Ok(config_path);
        }

        if !current.pop() {
            return Err(Error::ConfigNotFound);
        }
    }
}

/// Interpolate environment variables in the format ${VAR_NAME} or ${VAR_NAME:-default}
fn interpolate_env_vars(content: &str) -> String {
    // This regex is a compile-time constant, panicking is acceptable here
    // as it indicates a programming error in the codebase, not a runtime issue
    let re = Regex::new(r"\$\{([A-Z_][A-Z0-9_]*)(?::-([^}]*))?\}")
        .expect("Invalid regex pattern - this is a bug in the codebase");

    re.replace_all(content, |caps: &regex::Captures| {
        let var_name = &caps[1];
        let default = caps.get(2).map(|m| m.as_str()).unwrap_or("");

        env::var(var_name).unwrap_or_else(|_| default.to_string())
    })
    .to_string()
}

/// Generate a default configuration file content
pub fn default_config_content() -> &'static str {
    r#"# Edgegate Configuration
# The gate sits in front of the portal application and enforces the
# session-role routing policy before any request reaches it.

[server]
host = "0.0.0.0"
port = 4180

[upstream]
# Origin the allowed requests are forwarded to
origin = "http://127.0.0.1:3000"

[auth]
# HMAC secret shared with the auth service that signs access tokens
secret = "${EDGEGATE_JWT_SECRET:-edgegate-dev-secret-change-in-production}"
access_cookie = "access_token"
# The role cookie mirrors the identity role for client-side UI only.
# It is never read by the gate.
role_cookie = "role"
refresh_cookie = "refresh_token"
access_ttl_secs = 3600
refresh_ttl_secs = 604800

[gate]
# Paths never evaluated by the gate. Prefixes match whole segments.
exclude_prefixes = ["/api", "/_next", "/static", "/public", "/og-image", "/logo", "/seo"]
exclude_paths = ["/favicon.ico", "/sitemap.xml", "/robots.txt", "/feed.xml", "/manifest.json", "/healthz"]
"#
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_env_interpolation() {
        env::set_var("EDGEGATE_TEST_VAR", "hello");
        let content = "value = \"${EDGEGATE_TEST_VAR}\"";
        let result = interpolate_env_vars(content);
        assert_eq!(result, "value = \"hello\"");
        env::remove_var("EDGEGATE_TEST_VAR");
    }

    #[test]
    fn test_env_interpolation_with_default() {
        let content = "value = \"${NONEXISTENT_VAR:-default_value}\"";
        let result = interpolate_env_vars(content);
        assert_eq!(result, "value = \"default_value\"");
    }

    #[test]
    fn test_default_config_parses() {
        let config: Config = toml::from_str(&interpolate_env_vars(default_config_content()))
            .expect("default config must parse");
        assert_eq!(config.auth.access_cookie, "access_token");
        assert_eq!(config.auth.refresh_ttl_secs, 604800);
    }

    #[test]
    fn test_load_config_from_path() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("edgegate.toml");
        fs::write(&path, "[server]\nport = 9999\n").expect("write");

        let config = load_config_from_path(&path).expect("load");
        assert_eq!(config.server.port, 9999);
    }

    #[test]
    fn test_missing_config_file() {
        let result = load_config_from_path(Path::new("/nonexistent/edgegate.toml"));
        assert!(matches!(result, Err(Error::ConfigNotFound)));
    }
}
