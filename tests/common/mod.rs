#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::Arc;

use anyhow::anyhow;
use async_trait::async_trait;
use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use chrono::{DateTime, Duration, Utc};
use http_body_util::BodyExt;
use serde_json::Value;
use tower::ServiceExt;

use usersvc::router::init_router;
use usersvc::state::AppState;
use usersvc::usersvc_auth::{IdentityProfile, IdentityProvider, PrivateClaims};
use usersvc::usersvc_config::{CorsConfig, JwtConfig};
use usersvc::usersvc_core::password::hash_password_with_cost;
use usersvc::usersvc_core::{AppError, PermissionId};
use usersvc::usersvc_models::{RoleDocument, RoleId, User, UserId};
use usersvc::usersvc_store::InMemoryDocumentStore;

pub const TEST_SECRET: &str = "test-secret";

/// Identity provider answering from a fixed token table.
#[derive(Default)]
pub struct StubIdentityProvider {
    profiles: HashMap<String, IdentityProfile>,
    unavailable: bool,
}

impl StubIdentityProvider {
    pub fn with_profile(mut self, access_token: &str, profile: IdentityProfile) -> Self {
        self.profiles.insert(access_token.to_string(), profile);
        self
    }

    pub fn unavailable() -> Self {
        Self {
            profiles: HashMap::new(),
            unavailable: true,
        }
    }
}

#[async_trait]
impl IdentityProvider for StubIdentityProvider {
    fn name(&self) -> &'static str {
        "stub"
    }

    async fn fetch_profile(&self, access_token: &str) -> Result<IdentityProfile, AppError> {
        if self.unavailable {
            return Err(AppError::bad_gateway(anyhow!("stub provider is down")));
        }
        self.profiles
            .get(access_token)
            .cloned()
            .ok_or_else(|| AppError::unauthorized("Unauthorized identity provider token"))
    }
}

pub fn profile(email: &str, name: &str) -> IdentityProfile {
    let mut parts = name.splitn(2, ' ');
    IdentityProfile {
        email: email.to_string(),
        name: name.to_string(),
        given_name: parts.next().unwrap_or_default().to_string(),
        family_name: parts.next().unwrap_or_default().to_string(),
        picture: format!("https://img.example.com/{}.png", email),
    }
}

pub struct TestApp {
    pub router: Router,
    pub state: AppState,
}

pub fn setup_test_app() -> TestApp {
    setup_test_app_with(StubIdentityProvider::default(), JwtConfig::with_secret(TEST_SECRET))
}

pub fn setup_test_app_with(identity: StubIdentityProvider, jwt_config: JwtConfig) -> TestApp {
    let state = AppState::new(
        Arc::new(InMemoryDocumentStore::new()),
        jwt_config,
        Arc::new(identity),
        CorsConfig {
            allowed_origins: vec!["http://localhost:3000".to_string()],
        },
    );

    TestApp {
        router: init_router(state.clone()),
        state,
    }
}

pub fn generate_unique_email() -> String {
    format!("test-{}@example.com", UserId::new())
}

pub async fn seed_role(state: &AppState, code: &str, permission_ids: &[PermissionId]) -> RoleDocument {
    let role = RoleDocument {
        id: RoleId::new(),
        code: code.to_string(),
        permission_ids: permission_ids.to_vec(),
    };
    state.roles().save(&role).await.unwrap();
    role
}

pub async fn seed_user_at(
    state: &AppState,
    email: &str,
    password: &str,
    role_ids: Vec<RoleId>,
    created_at: DateTime<Utc>,
) -> User {
    let user = User {
        id: UserId::new(),
        email: email.to_string(),
        password_hash: hash_password_with_cost(password, 4).unwrap(),
        full_name: "Test User".to_string(),
        picture_url: String::new(),
        created_at,
        updated_at: created_at,
        role_ids,
    };
    state.users().save(&user).await.unwrap();
    // Read back so timestamps carry stored precision
    state.users().find_by_id(user.id).await.unwrap().unwrap()
}

pub async fn seed_user(state: &AppState, email: &str, password: &str, role_ids: Vec<RoleId>) -> User {
    seed_user_at(state, email, password, role_ids, Utc::now()).await
}

/// Seeds `count` users created one second apart, oldest first.
pub async fn seed_users(state: &AppState, count: usize) -> Vec<User> {
    let base = Utc::now() - Duration::seconds(count as i64);
    let mut users = Vec::with_capacity(count);
    for idx in 0..count {
        let created_at = base + Duration::seconds(idx as i64);
        users.push(
            seed_user_at(state, &generate_unique_email(), "password123", vec![], created_at).await,
        );
    }
    users
}

/// Signs a token directly, bypassing login.
pub fn token_with(state: &AppState, permission_ids: &[PermissionId]) -> String {
    let claims = PrivateClaims {
        email: "caller@example.com".to_string(),
        roles: vec!["TEST".to_string()],
        permission_ids: permission_ids.to_vec(),
    };
    state
        .tokens
        .issue(&UserId::new().to_string(), claims, state.tokens.default_ttl())
        .unwrap()
}

pub async fn send(
    router: &Router,
    method: &str,
    uri: &str,
    token: Option<&str>,
    body: Option<Value>,
) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header("authorization", format!("Bearer {}", token));
    }

    let request = match body {
        Some(body) => builder
            .header("content-type", "application/json")
            .body(Body::from(serde_json::to_vec(&body).unwrap()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = router.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let json = serde_json::from_slice(&bytes).unwrap_or(Value::Null);

    (status, json)
}
