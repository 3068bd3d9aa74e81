//! Token signing configuration.
//!
//! The signing secret has no default. When `JWT_SECRET` is unset or blank the
//! service still starts, but every attempt to issue or verify a token fails
//! with a configuration error until the secret is provided.

/// Issuer written to and required in every token.
pub const TOKEN_ISSUER: &str = "usersvc";

/// Default token lifetime: 24 hours.
pub const DEFAULT_TTL_SECONDS: i64 = 86_400;

#[derive(Clone)]
pub struct JwtConfig {
    pub secret: Option<String>,
    pub issuer: String,
    pub ttl_seconds: i64,
}

impl JwtConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(crate::env_lookup)
    }

    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        Self {
            secret: lookup("JWT_SECRET").filter(|s| !s.trim().is_empty()),
            issuer: TOKEN_ISSUER.to_string(),
            ttl_seconds: crate::parse_or(&lookup, "JWT_TTL_SECONDS", DEFAULT_TTL_SECONDS),
        }
    }

    pub fn with_secret(secret: impl Into<String>) -> Self {
        Self {
            secret: Some(secret.into()),
            issuer: TOKEN_ISSUER.to_string(),
            ttl_seconds: DEFAULT_TTL_SECONDS,
        }
    }

    pub fn secret(&self) -> Option<&str> {
        self.secret.as_deref()
    }
}

impl std::fmt::Debug for JwtConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtConfig")
            .field("secret", &self.secret.as_ref().map(|_| "<redacted>"))
            .field("issuer", &self.issuer)
            .field("ttl_seconds", &self.ttl_seconds)
            .finish()
    }
}
