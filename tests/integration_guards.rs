mod common;

use axum::http::StatusCode;

use common::{TEST_SECRET, send, setup_test_app, token_with};
use usersvc::middleware::policy::ROUTES;
use usersvc::usersvc_auth::{PrivateClaims, TokenService};
use usersvc::usersvc_config::JwtConfig;
use usersvc::usersvc_models::UserId;

fn concrete(path: &str) -> String {
    path.replace("{id}", &UserId::new().to_string())
        .replace("{email}", "someone@example.com")
}

#[tokio::test]
async fn test_every_protected_route_requires_a_token() {
    let app = setup_test_app();

    for policy in ROUTES {
        let (status, body) = send(&app.router, policy.method, &concrete(policy.path), None, None).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED, "{} {}", policy.method, policy.path);
        assert!(body["error"].is_string());
    }
}

#[tokio::test]
async fn test_every_protected_route_rejects_foreign_tokens() {
    let app = setup_test_app();
    let foreign = TokenService::new(JwtConfig::with_secret("someone-elses-secret"));
    let token = foreign
        .issue("intruder", PrivateClaims::default(), foreign.default_ttl())
        .unwrap();

    for policy in ROUTES {
        let (status, body) = send(
            &app.router,
            policy.method,
            &concrete(policy.path),
            Some(&token),
            None,
        )
        .await;
        assert_eq!(status, StatusCode::UNAUTHORIZED, "{} {}", policy.method, policy.path);
        assert_eq!(body["error"], "Invalid or expired token");
    }
}

#[tokio::test]
async fn test_permissionless_token_is_forbidden_where_a_permission_is_required() {
    let app = setup_test_app();
    let token = token_with(&app.state, &[]);

    for policy in ROUTES {
        let (status, _) = send(
            &app.router,
            policy.method,
            &concrete(policy.path),
            Some(&token),
            None,
        )
        .await;

        match policy.chain.required_permissions().next() {
            Some(code) => assert_eq!(
                status,
                StatusCode::FORBIDDEN,
                "{} {} should require {}",
                policy.method,
                policy.path,
                code
            ),
            None => assert_ne!(status, StatusCode::FORBIDDEN),
        }
    }
}

#[tokio::test]
async fn test_expired_token_is_rejected() {
    let app = setup_test_app();
    let tokens = TokenService::new(JwtConfig::with_secret(TEST_SECRET));
    let token = tokens
        .issue(
            "user-1",
            PrivateClaims {
                permission_ids: vec![301],
                ..PrivateClaims::default()
            },
            chrono::Duration::seconds(-10),
        )
        .unwrap();

    let (status, _) = send(&app.router, "GET", "/api/v1/permissions", Some(&token), None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_public_routes() {
    let app = setup_test_app();

    let (status, body) = send(&app.router, "GET", "/api/v1/health", None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");

    let (status, body) = send(&app.router, "GET", "/api-docs/openapi.json", None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert!(body["paths"]["/api/v1/users/pages"].is_object());
}
