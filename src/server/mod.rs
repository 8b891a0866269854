//! HTTP server wiring

pub mod proxy;

use axum::{middleware, routing::get, Json, Router};
use serde_json::json;
use std::sync::Arc;
use tower_http::trace::TraceLayer;

use crate::auth::SessionResolver;
use crate::config::Config;
use crate::error::Result;
use crate::gate::{route_gate, Exclusions};
use crate::policy::Policy;

/// Immutable per-process state shared across requests
///
/// Everything here is built once at startup and only read at request time;
/// the gate itself keeps no mutable state between requests.
pub struct GateState {
    pub config: Config,
    pub resolver: SessionResolver,
    pub policy: Policy,
    pub exclusions: Exclusions,
    pub client: reqwest::Client,
}

impl GateState {
    pub fn new(config: Config) -> Self {
        let resolver = SessionResolver::new(&config.auth.secret);
        let exclusions = Exclusions::from_rules(&config.gate);
        Self {
            config,
            resolver,
            policy: Policy::new(),
            exclusions,
            client: reqwest::Client::new(),
        }
    }
}

/// Run the gate server
pub async fn run_server(config: Config, host: &str, port: u16) -> Result<()> {
    let state = Arc::new(GateState::new(config));
    let app = create_router(state);

    let addr = format!("{}:{}", host, port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;

    tracing::info!("Gate listening on {}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}

/// Create the router: a liveness endpoint plus the catch-all upstream proxy,
/// with the gate layered over everything
pub fn create_router(state: Arc<GateState>) -> Router {
    Router::new()
        .route("/healthz", get(health))
        .fallback(proxy::forward)
        .layer(middleware::from_fn_with_state(state.clone(), route_gate))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn health() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}
