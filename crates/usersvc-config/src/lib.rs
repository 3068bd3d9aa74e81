//! # usersvc config
//!
//! Configuration structures loaded from environment variables:
//!
//! - [`jwt`]: token signing secret, issuer and lifetime
//! - [`cors`]: allowed origins
//! - [`server`]: bind address and metrics port
//! - [`store`]: document store backend selection
//! - [`identity`]: external identity provider endpoint
//!
//! Every type offers `from_env()` plus a `from_lookup()` constructor taking
//! a key lookup function, which keeps them testable without touching the
//! process environment.
//!
//! # Example
//!
//! ```ignore
//! use usersvc_config::{CorsConfig, JwtConfig, ServerConfig, StoreConfig};
//!
//! let jwt_config = JwtConfig::from_env();
//! let cors_config = CorsConfig::from_env();
//! let server_config = ServerConfig::from_env();
//! let store_config = StoreConfig::from_env();
//! ```

pub mod cors;
pub mod identity;
pub mod jwt;
pub mod server;
pub mod store;

// Re-export commonly used types at crate root
pub use cors::CorsConfig;
pub use identity::IdentityConfig;
pub use jwt::JwtConfig;
pub use server::ServerConfig;
pub use store::{StoreBackend, StoreConfig};

pub(crate) fn env_lookup(key: &str) -> Option<String> {
    std::env::var(key).ok()
}

pub(crate) fn parse_or<T, F>(lookup: &F, key: &str, default: T) -> T
where
    T: std::str::FromStr,
    F: Fn(&str) -> Option<String>,
{
    lookup(key)
        .and_then(|v| v.trim().parse().ok())
        .unwrap_or(default)
}
