//! # usersvc auth
//!
//! Authentication building blocks for the user service:
//!
//! - [`claims`]: token payload, registered plus private claims
//! - [`jwt`]: [`TokenService`] for issuing and verifying HS256 tokens
//! - [`identity`]: [`IdentityProvider`] trait and the Google implementation
//!
//! # Example
//!
//! ```ignore
//! use usersvc_auth::{PrivateClaims, TokenService};
//! use usersvc_config::JwtConfig;
//!
//! let tokens = TokenService::new(JwtConfig::from_env());
//! let token = tokens.issue(&user_id, PrivateClaims::default(), tokens.default_ttl())?;
//! let claims = tokens.verify(&token)?;
//! ```

pub mod claims;
pub mod identity;
pub mod jwt;

// Re-export commonly used types at crate root
pub use claims::{Claims, PrivateClaims};
pub use identity::{GoogleIdentityProvider, IdentityProfile, IdentityProvider};
pub use jwt::{INVALID_TOKEN_MESSAGE, TokenService};
