mod common;

use axum::http::StatusCode;
use serde_json::json;

use common::{seed_role, send, setup_test_app, token_with};
use usersvc::usersvc_models::RoleId;

const ROLE_ADMIN: &[i32] = &[401, 402, 404, 405, 406];

#[tokio::test]
async fn test_create_role_resolves_permissions() {
    let app = setup_test_app();
    let token = token_with(&app.state, ROLE_ADMIN);

    let (status, body) = send(
        &app.router,
        "POST",
        "/api/v1/roles",
        Some(&token),
        Some(json!({ "code": "AUDITOR", "permissions": [505, 301] })),
    )
    .await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["code"], "AUDITOR");
    let permissions = body["permissions"].as_array().unwrap();
    assert_eq!(permissions.len(), 2);
    assert_eq!(permissions[0]["id"], 505);
    assert_eq!(permissions[0]["name"], "Get Users Paginated");
    assert_eq!(permissions[1]["id"], 301);
}

#[tokio::test]
async fn test_create_role_rejects_unknown_permission() {
    let app = setup_test_app();
    let token = token_with(&app.state, ROLE_ADMIN);

    let (status, body) = send(
        &app.router,
        "POST",
        "/api/v1/roles",
        Some(&token),
        Some(json!({ "code": "BROKEN", "permissions": [301, 999] })),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Unknown permission ids: 999");
    assert_eq!(app.state.roles().count().await.unwrap(), 0);
}

#[tokio::test]
async fn test_create_role_rejects_empty_permissions() {
    let app = setup_test_app();
    let token = token_with(&app.state, ROLE_ADMIN);

    let (status, _) = send(
        &app.router,
        "POST",
        "/api/v1/roles",
        Some(&token),
        Some(json!({ "code": "EMPTY", "permissions": [] })),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_create_role_rejects_duplicate_code() {
    let app = setup_test_app();
    seed_role(&app.state, "AUDITOR", &[301]).await;
    let token = token_with(&app.state, ROLE_ADMIN);

    let (status, body) = send(
        &app.router,
        "POST",
        "/api/v1/roles",
        Some(&token),
        Some(json!({ "code": "AUDITOR", "permissions": [302] })),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Role with code AUDITOR already exists");
}

#[tokio::test]
async fn test_create_role_requires_permission() {
    let app = setup_test_app();
    let token = token_with(&app.state, &[402]);

    let (status, _) = send(
        &app.router,
        "POST",
        "/api/v1/roles",
        Some(&token),
        Some(json!({ "code": "AUDITOR", "permissions": [301] })),
    )
    .await;

    assert_eq!(status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_get_role_by_id() {
    let app = setup_test_app();
    let role = seed_role(&app.state, "AUDITOR", &[301, 302]).await;
    let token = token_with(&app.state, ROLE_ADMIN);

    let (status, body) = send(
        &app.router,
        "GET",
        &format!("/api/v1/roles/{}", role.id),
        Some(&token),
        None,
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["id"], role.id.to_string());
    assert_eq!(body["permissions"].as_array().unwrap().len(), 2);

    let (status, _) = send(
        &app.router,
        "GET",
        &format!("/api/v1/roles/{}", RoleId::new()),
        Some(&token),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, body) = send(&app.router, "GET", "/api/v1/roles/not-a-uuid", Some(&token), None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Invalid role id format");
}

#[tokio::test]
async fn test_update_role() {
    let app = setup_test_app();
    let role = seed_role(&app.state, "AUDITOR", &[301]).await;
    let token = token_with(&app.state, ROLE_ADMIN);

    let (status, body) = send(
        &app.router,
        "PUT",
        "/api/v1/roles",
        Some(&token),
        Some(json!({ "id": role.id, "code": "REVIEWER", "permissions": [302, 303] })),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["code"], "REVIEWER");

    let stored = app.state.roles().find_by_id(role.id).await.unwrap().unwrap();
    assert_eq!(stored.code, "REVIEWER");
    assert_eq!(stored.permission_ids, vec![302, 303]);
}

#[tokio::test]
async fn test_update_role_code_conflict_and_missing() {
    let app = setup_test_app();
    let role = seed_role(&app.state, "AUDITOR", &[301]).await;
    seed_role(&app.state, "REVIEWER", &[302]).await;
    let token = token_with(&app.state, ROLE_ADMIN);

    let (status, _) = send(
        &app.router,
        "PUT",
        "/api/v1/roles",
        Some(&token),
        Some(json!({ "id": role.id, "code": "REVIEWER", "permissions": [301] })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = send(
        &app.router,
        "PUT",
        "/api/v1/roles",
        Some(&token),
        Some(json!({ "id": RoleId::new(), "code": "GHOST", "permissions": [301] })),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_delete_role() {
    let app = setup_test_app();
    let role = seed_role(&app.state, "AUDITOR", &[301]).await;
    let token = token_with(&app.state, ROLE_ADMIN);
    let uri = format!("/api/v1/roles/{}", role.id);

    let (status, body) = send(&app.router, "DELETE", &uri, Some(&token), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);

    let (status, _) = send(&app.router, "DELETE", &uri, Some(&token), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_roles_page_is_ordered_by_code() {
    let app = setup_test_app();
    for code in ["DELTA", "ALPHA", "CHARLIE", "BRAVO", "ECHO"] {
        seed_role(&app.state, code, &[301]).await;
    }
    let token = token_with(&app.state, ROLE_ADMIN);

    let (status, body) = send(
        &app.router,
        "GET",
        "/api/v1/roles/pages?page=2&size=2",
        Some(&token),
        None,
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    let codes: Vec<&str> = body["data"]
        .as_array()
        .unwrap()
        .iter()
        .map(|r| r["code"].as_str().unwrap())
        .collect();
    assert_eq!(codes, vec!["CHARLIE", "DELTA"]);
    assert_eq!(body["page"]["totalElements"], 5);
    assert_eq!(body["page"]["totalPages"], 3);
    assert_eq!(body["links"]["self"], "/api/v1/roles/pages?page=2&size=2");
    assert_eq!(body["links"]["next"], "/api/v1/roles/pages?page=3&size=2");
    assert_eq!(body["links"]["prev"], "/api/v1/roles/pages?page=1&size=2");
}
