//! Gate scope exclusions
//!
//! Static assets, API routes and well-known metadata files are never
//! evaluated by the gate. The list is part of the external contract:
//! omissions disable protection, additions can break asset delivery.

use crate::config::GateRules;

/// Compiled exclusion list
#[derive(Debug, Clone)]
pub struct Exclusions {
    prefixes: Vec<String>,
    exact: Vec<String>,
}

impl Exclusions {
    pub fn from_rules(rules: &GateRules) -> Self {
        Self {
            prefixes: rules.exclude_prefixes.clone(),
            exact: rules.exclude_paths.clone(),
        }
    }

    /// Whether the path bypasses the gate entirely
    pub fn is_excluded(&self, path: &str) -> bool {
        if self.exact.iter().any(|p| p == path) {
            return true;
        }
        self.prefixes
            .iter()
            .any(|prefix| match path.strip_prefix(prefix.as_str()) {
                Some(rest) => rest.is_empty() || rest.starts_with('/'),
                None => false,
            })
    }
}

impl Default for Exclusions {
    fn default() -> Self {
        Self::from_rules(&GateRules::default())
    }
}
