//! Route access policy
//!
//! A pure decision function over (path, identity). The policy is an ordered
//! table of named rules evaluated first-match-wins; evaluation is total, with
//! unmatched paths falling through to [`Decision::Allow`] because the public
//! marketing pages require no identity. Rule order is a contract: the
//! role-specific containment rules assume the anonymous case has already been
//! excluded, and the guest-only rule exists to keep authenticated users away
//! from the login and register entry points.

mod rules;

use crate::auth::models::Identity;
use serde::Serialize;

pub use rules::{rule_names, RULES};

/// Outcome of a policy evaluation
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "decision", content = "target", rename_all = "lowercase")]
pub enum Decision {
    /// Pass the request through unchanged
    Allow,
    /// Answer with a terminal redirect to the given path
    Redirect(&'static str),
}

impl Decision {
    pub fn is_allow(&self) -> bool {
        matches!(self, Decision::Allow)
    }
}

/// The static route access policy table
#[derive(Debug, Clone, Copy, Default)]
pub struct Policy;

impl Policy {
    pub fn new() -> Self {
        Self
    }

    /// Decide what to do with a request
    pub fn decide(&self, path: &str, identity: Option<&Identity>) -> Decision {
        self.explain(path, identity).0
    }

    /// Decide, reporting which rule matched (`None` means fallthrough)
    pub fn explain(&self, path: &str, identity: Option<&Identity>) -> (Decision, Option<&'static str>) {
        for (name, rule) in RULES {
            if let Some(decision) = rule(path, identity) {
                return (decision, Some(name));
            }
        }
        (Decision::Allow, None)
    }
}

/// Segment-aware prefix test: `/dashboard` matches `/dashboard` and
/// `/dashboard/news`, but never `/dashboardx`.
pub(crate) fn has_prefix(path: &str, prefix: &str) -> bool {
    match path.strip_prefix(prefix) {
        Some(rest) => rest.is_empty() || rest.starts_with('/'),
        None => false,
    }
}
