//! Login flows and session token issuance.
//!
//! A session token is a snapshot: the caller's role codes and the union of
//! their permission codes as stored at login time. Later role edits only
//! take effect once the user logs in again.

use std::collections::HashSet;

use anyhow::anyhow;
use chrono::Utc;
use tracing::{info, instrument, warn};

use usersvc_auth::{IdentityProfile, PrivateClaims};
use usersvc_core::{AppError, PermissionId, hydrate, password_matches};
use usersvc_models::{
    DEFAULT_USER_ROLE, LoginResponse, LoginWithEmailRequest, RoleDocument, User, UserId,
};
use usersvc_observability::{
    track_login_failure, track_login_success, track_token_issued, track_user_created,
};

use crate::modules::users::service::normalize_email;
use crate::state::AppState;

const INVALID_CREDENTIALS: &str = "Invalid email or password";

/// Builds the token payload from the roles a user holds, in the user's
/// own role order. Permission codes are deduplicated in first-seen order.
pub fn snapshot_claims(email: &str, roles: &[RoleDocument]) -> PrivateClaims {
    let mut seen = HashSet::new();
    let permission_ids: Vec<PermissionId> = roles
        .iter()
        .flat_map(|role| role.permission_ids.iter().copied())
        .filter(|id| seen.insert(*id))
        .collect();

    PrivateClaims {
        email: email.to_string(),
        roles: roles.iter().map(|role| role.code.clone()).collect(),
        permission_ids,
    }
}

fn split_name(full_name: &str) -> (String, String) {
    let mut parts = full_name.trim().splitn(2, char::is_whitespace);
    let given = parts.next().unwrap_or_default().to_string();
    let family = parts.next().unwrap_or_default().trim().to_string();
    (given, family)
}

pub struct AuthService;

impl AuthService {
    /// Signs a session token for `user` from their current roles.
    ///
    /// Role references that no longer resolve are skipped.
    pub async fn issue_session_token(state: &AppState, user: &User) -> Result<String, AppError> {
        let roles = state.roles();
        let held = hydrate(
            vec![user],
            |user| user.role_ids.as_slice(),
            |ids| async move { roles.find_by_ids(&ids).await },
            |role: &RoleDocument| role.id,
        )
        .await?
        .into_iter()
        .next()
        .map(|hydrated| hydrated.related)
        .unwrap_or_default();

        let claims = snapshot_claims(&user.email, &held);
        let token = state
            .tokens
            .issue(&user.id.to_string(), claims, state.tokens.default_ttl())?;
        track_token_issued();

        Ok(token)
    }

    #[instrument(skip(state, access_token))]
    pub async fn login_with_google(
        state: &AppState,
        access_token: &str,
    ) -> Result<LoginResponse, AppError> {
        let provider = state.identity.name();
        let profile = state
            .identity
            .fetch_profile(access_token)
            .await
            .inspect_err(|err| {
                warn!(provider, status = %err.status, "Identity provider rejected login");
                track_login_failure(provider, "identity_provider");
            })?;

        let user = Self::upsert_from_profile(state, &profile).await?;
        let jwt = Self::issue_session_token(state, &user).await?;
        track_login_success(provider);
        info!(user_id = %user.id, provider, "User logged in");

        let given_name = if profile.given_name.is_empty() {
            split_name(&user.full_name).0
        } else {
            profile.given_name
        };

        Ok(LoginResponse {
            id: user.id,
            full_name: user.full_name,
            given_name,
            family_name: profile.family_name,
            profile_image: user.picture_url,
            email: user.email,
            jwt,
        })
    }

    /// Refreshes name and picture of a known user, or registers a new one
    /// holding the default role.
    async fn upsert_from_profile(
        state: &AppState,
        profile: &IdentityProfile,
    ) -> Result<User, AppError> {
        let users = state.users();
        let email = normalize_email(&profile.email);
        if email.is_empty() {
            return Err(AppError::bad_gateway(anyhow!(
                "Identity provider returned a profile without an email"
            )));
        }

        let now = Utc::now();

        if let Some(mut user) = users.find_by_email(&email).await? {
            if !profile.name.is_empty() {
                user.full_name = profile.name.clone();
            }
            if !profile.picture.is_empty() {
                user.picture_url = profile.picture.clone();
            }
            user.updated_at = now;
            users.save(&user).await?;
            return Ok(user);
        }

        let role = state
            .roles()
            .find_by_code(DEFAULT_USER_ROLE)
            .await?
            .ok_or_else(|| {
                AppError::internal(anyhow!(
                    "Default role {} is missing, run the bootstrap command",
                    DEFAULT_USER_ROLE
                ))
            })?;

        let user = User {
            id: UserId::new(),
            email,
            password_hash: String::new(),
            full_name: profile.name.clone(),
            picture_url: profile.picture.clone(),
            created_at: now,
            updated_at: now,
            role_ids: vec![role.id],
        };
        users.save(&user).await?;
        track_user_created("google");
        info!(user_id = %user.id, "User registered through social login");

        Ok(user)
    }

    #[instrument(skip(state, dto), fields(email = %dto.email))]
    pub async fn login_with_email(
        state: &AppState,
        dto: LoginWithEmailRequest,
    ) -> Result<LoginResponse, AppError> {
        let user = state
            .users()
            .find_by_email(&normalize_email(&dto.email))
            .await?;

        let Some(user) = user.filter(|u| password_matches(&dto.password, &u.password_hash)) else {
            track_login_failure("email", "invalid_credentials");
            return Err(AppError::unauthorized(INVALID_CREDENTIALS));
        };

        let jwt = Self::issue_session_token(state, &user).await?;
        track_login_success("email");
        info!(user_id = %user.id, "User logged in");

        let (given_name, family_name) = split_name(&user.full_name);

        Ok(LoginResponse {
            id: user.id,
            full_name: user.full_name,
            given_name,
            family_name,
            profile_image: user.picture_url,
            email: user.email,
            jwt,
        })
    }
}
