//! The edge gate
//!
//! Runs once per request, before anything reaches the upstream: exclusion
//! check, then session resolution, then policy evaluation, in that order.
//! A `Redirect` decision is terminal; an `Allow` passes the request through
//! unchanged. No other side effects - no session refresh, no token rotation,
//! and token material is never logged.

pub mod cookies;
pub mod exclude;

pub use cookies::cookie_value;
pub use exclude::Exclusions;

use crate::policy::Decision;
use crate::server::GateState;
use axum::{
    extract::{Request, State},
    middleware::Next,
    response::{IntoResponse, Redirect, Response},
};
use std::sync::Arc;

/// Gate middleware applied to every application route
pub async fn route_gate(
    State(state): State<Arc<GateState>>,
    req: Request,
    next: Next,
) -> Response {
    let path = req.uri().path().to_string();

    if state.exclusions.is_excluded(&path) {
        return next.run(req).await;
    }

    // Only the httpOnly access cookie carries authority. The non-httpOnly
    // role mirror cookie is a client-side UI hint and is never read here.
    let token = cookie_value(req.headers(), &state.config.auth.access_cookie);
    let identity = state.resolver.resolve(token.as_deref());

    match state.policy.decide(&path, identity.as_ref()) {
        Decision::Allow => next.run(req).await,
        Decision::Redirect(target) => {
            tracing::debug!(%path, redirect = target, authenticated = identity.is_some(), "gated");
            Redirect::temporary(target).into_response()
        }
    }
}
