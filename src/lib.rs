//! Edgegate - session-aware edge gate for the academy web portal
//!
//! Verifies the `access_token` session cookie, evaluates the route access
//! policy and either forwards the request to the upstream application or
//! answers with a redirect. This is the library interface; the binary wraps
//! it in a small CLI.

pub mod auth;
pub mod cli;
pub mod config;
pub mod error;
pub mod gate;
pub mod policy;
pub mod server;

pub use auth::{Identity, Role, SessionResolver};
pub use config::Config;
pub use error::Error;
pub use policy::{Decision, Policy};
