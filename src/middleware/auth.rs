//! Authentication and authorization checks.
//!
//! These are the two guard stages a route can require. They run inside
//! [`enforce_guards`](super::guard::enforce_guards) before the handler, and
//! the resulting identity is stored in the request extensions for the
//! [`AuthUser`] extractor.

use anyhow::anyhow;
use axum::{
    extract::FromRequestParts,
    http::{HeaderMap, header, request::Parts},
};

use usersvc_auth::{Claims, TokenService};
use usersvc_core::{AppError, PermissionId};
use usersvc_observability::{track_authorization_check, track_token_rejected};

/// Identity of the caller, taken from a verified bearer token.
#[derive(Debug, Clone)]
pub struct AuthUser(pub Claims);

impl AuthUser {
    /// Token subject, the user ID as a string.
    pub fn subject(&self) -> &str {
        &self.0.sub
    }

    pub fn email(&self) -> &str {
        self.0.email()
    }

    pub fn has_permission(&self, permission: PermissionId) -> bool {
        self.0.has_permission(permission)
    }
}

/// Pulls the token out of `Authorization: Bearer <token>`.
pub fn bearer_token(headers: &HeaderMap) -> Result<&str, AppError> {
    headers
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix("Bearer "))
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .ok_or_else(|| AppError::unauthorized("Missing or malformed authorization header"))
}

/// Verifies the bearer token carried by `headers`.
pub fn authenticate(headers: &HeaderMap, tokens: &TokenService) -> Result<AuthUser, AppError> {
    let token = bearer_token(headers).inspect_err(|_| track_token_rejected())?;

    tokens
        .verify(token)
        .map(AuthUser)
        .inspect_err(|err| {
            if err.status.is_client_error() {
                track_token_rejected();
            }
        })
}

/// Passes `user` through if their token grants `permission`.
pub fn authorize(user: AuthUser, permission: PermissionId) -> Result<AuthUser, AppError> {
    let allowed = user.has_permission(permission);
    track_authorization_check(allowed, permission);

    if allowed {
        Ok(user)
    } else {
        tracing::debug!(sub = %user.subject(), permission, "Permission denied");
        Err(AppError::forbidden(format!(
            "Access denied. Missing required permission: {}",
            permission
        )))
    }
}

impl<S> FromRequestParts<S> for AuthUser
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts.extensions.get::<AuthUser>().cloned().ok_or_else(|| {
            AppError::internal(anyhow!(
                "AuthUser requested on a route without an authentication guard"
            ))
        })
    }
}
