//! Token issuance and verification.
//!
//! Tokens are compact JWTs signed with HMAC-SHA256 using the secret from
//! [`JwtConfig`]. The payload merges the registered claims (`iss`, `sub`,
//! `exp`) with the [`PrivateClaims`] authorization snapshot.
//!
//! # Example
//!
//! ```ignore
//! use usersvc_auth::{PrivateClaims, TokenService};
//! use usersvc_config::JwtConfig;
//!
//! let tokens = TokenService::new(JwtConfig::from_env());
//!
//! let token = tokens.issue(
//!     &user_id,
//!     PrivateClaims {
//!         email: "ana@example.com".to_string(),
//!         roles: vec!["ADMIN".to_string()],
//!         permission_ids: vec![301, 501],
//!     },
//!     tokens.default_ttl(),
//! )?;
//!
//! let claims = tokens.verify(&token)?;
//! assert_eq!(claims.sub, user_id);
//! ```

use anyhow::anyhow;
use chrono::{Duration, Utc};
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};

use usersvc_config::JwtConfig;
use usersvc_core::AppError;

use crate::claims::{Claims, PrivateClaims};

/// Message returned for every verification failure.
pub const INVALID_TOKEN_MESSAGE: &str = "Invalid or expired token";

/// Issues and verifies signed tokens.
#[derive(Clone, Debug)]
pub struct TokenService {
    config: JwtConfig,
}

impl TokenService {
    pub fn new(config: JwtConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &JwtConfig {
        &self.config
    }

    /// Lifetime applied to tokens issued at login.
    pub fn default_ttl(&self) -> Duration {
        Duration::seconds(self.config.ttl_seconds)
    }

    fn secret(&self) -> Result<&[u8], AppError> {
        self.config
            .secret()
            .map(str::as_bytes)
            .ok_or_else(|| AppError::configuration(anyhow!("JWT_SECRET is not configured")))
    }

    /// Signs a token for `subject` carrying `claims`, valid for `ttl`.
    ///
    /// # Errors
    ///
    /// Returns a configuration error (500) if no signing secret is set, or an
    /// internal error if encoding fails.
    pub fn issue(
        &self,
        subject: &str,
        claims: PrivateClaims,
        ttl: Duration,
    ) -> Result<String, AppError> {
        let secret = self.secret()?;
        let exp = (Utc::now() + ttl).timestamp();

        let claims = Claims {
            iss: self.config.issuer.clone(),
            sub: subject.to_string(),
            exp,
            private: claims,
        };

        encode(
            &Header::new(Algorithm::HS256),
            &claims,
            &EncodingKey::from_secret(secret),
        )
        .map_err(|e| AppError::internal(anyhow!("Failed to create token: {}", e)))
    }

    /// Verifies signature, issuer and expiry, returning the embedded claims.
    ///
    /// # Errors
    ///
    /// Every rejection of the token itself yields the same 401
    /// "Invalid or expired token". A missing signing secret yields a
    /// configuration error (500).
    pub fn verify(&self, token: &str) -> Result<Claims, AppError> {
        let secret = self.secret()?;

        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = 0;
        validation.set_issuer(&[self.config.issuer.as_str()]);
        validation.set_required_spec_claims(&["exp", "iss", "sub"]);

        decode::<Claims>(token, &DecodingKey::from_secret(secret), &validation)
            .map(|data| data.claims)
            .map_err(|e| {
                tracing::debug!(reason = %e, "Token rejected");
                AppError::unauthorized(INVALID_TOKEN_MESSAGE)
            })
    }
}
