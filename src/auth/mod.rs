//! Authentication and session resolution

pub mod jwt;
pub mod models;
pub mod resolver;

pub use jwt::{create_token, Claims};
pub use models::{Identity, Role};
pub use resolver::SessionResolver;
