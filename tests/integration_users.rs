mod common;

use axum::http::StatusCode;
use serde_json::json;

use common::{
    generate_unique_email, seed_role, seed_user, seed_users, send, setup_test_app, token_with,
};
use usersvc::usersvc_core::password_matches;
use usersvc::usersvc_models::UserId;

const USER_ADMIN: &[i32] = &[501, 502, 503, 504, 505];

#[tokio::test]
async fn test_create_user() {
    let app = setup_test_app();
    let role = seed_role(&app.state, "USER", &[301, 302, 303]).await;
    let token = token_with(&app.state, USER_ADMIN);

    let (status, body) = send(
        &app.router,
        "POST",
        "/api/v1/users",
        Some(&token),
        Some(json!({
            "email": "Jane.Doe@Example.com",
            "password": "password123",
            "fullName": "Jane Doe",
            "roleIds": [role.id]
        })),
    )
    .await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["email"], "jane.doe@example.com");
    assert_eq!(body["fullName"], "Jane Doe");
    assert!(body.get("passwordHash").is_none());
    assert_eq!(body["roles"][0]["code"], "USER");
    assert_eq!(body["roles"][0]["permissions"].as_array().unwrap().len(), 3);

    let stored = app
        .state
        .users()
        .find_by_email("jane.doe@example.com")
        .await
        .unwrap()
        .unwrap();
    assert_ne!(stored.password_hash, "password123");
    assert!(password_matches("password123", &stored.password_hash));
}

#[tokio::test]
async fn test_create_user_requires_token_and_permission() {
    let app = setup_test_app();
    let payload = json!({
        "email": generate_unique_email(),
        "password": "password123",
        "fullName": "Jane Doe"
    });

    let (status, _) = send(&app.router, "POST", "/api/v1/users", None, Some(payload.clone())).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let token = token_with(&app.state, &[502]);
    let (status, body) =
        send(&app.router, "POST", "/api/v1/users", Some(&token), Some(payload)).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["error"], "Access denied. Missing required permission: 501");
    assert_eq!(app.state.users().count().await.unwrap(), 0);
}

#[tokio::test]
async fn test_create_user_duplicate_email() {
    let app = setup_test_app();
    seed_user(&app.state, "taken@example.com", "password123", vec![]).await;
    let token = token_with(&app.state, USER_ADMIN);

    let (status, body) = send(
        &app.router,
        "POST",
        "/api/v1/users",
        Some(&token),
        Some(json!({
            "email": "taken@example.com",
            "password": "password123",
            "fullName": "Someone Else"
        })),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "User with email taken@example.com already exists");
}

#[tokio::test]
async fn test_create_user_validation() {
    let app = setup_test_app();
    let token = token_with(&app.state, USER_ADMIN);

    let (status, body) = send(
        &app.router,
        "POST",
        "/api/v1/users",
        Some(&token),
        Some(json!({
            "email": "short@example.com",
            "password": "short",
            "fullName": "Short Password"
        })),
    )
    .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["error"], "password must be at least 8 characters");

    let (status, body) = send(
        &app.router,
        "POST",
        "/api/v1/users",
        Some(&token),
        Some(json!({ "password": "password123", "fullName": "No Email" })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "email is required");
}

#[tokio::test]
async fn test_get_user_by_id() {
    let app = setup_test_app();
    let user = seed_user(&app.state, &generate_unique_email(), "password123", vec![]).await;
    let token = token_with(&app.state, &[502]);

    let (status, body) = send(
        &app.router,
        "GET",
        &format!("/api/v1/users/{}", user.id),
        Some(&token),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["id"], user.id.to_string());
    assert_eq!(body["roles"], json!([]));

    let (status, _) = send(
        &app.router,
        "GET",
        &format!("/api/v1/users/{}", UserId::new()),
        Some(&token),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, body) = send(&app.router, "GET", "/api/v1/users/42", Some(&token), None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Invalid user id format");
}

#[tokio::test]
async fn test_get_user_by_email() {
    let app = setup_test_app();
    seed_user(&app.state, "find.me@example.com", "password123", vec![]).await;
    let token = token_with(&app.state, &[502]);

    let (status, body) = send(
        &app.router,
        "GET",
        "/api/v1/users/email/find.me@example.com",
        Some(&token),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["email"], "find.me@example.com");

    let (status, _) = send(
        &app.router,
        "GET",
        "/api/v1/users/email/nobody@example.com",
        Some(&token),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_get_users_by_ids_hydrates_in_one_pass() {
    let app = setup_test_app();
    let reader = seed_role(&app.state, "READER", &[301]).await;
    let writer = seed_role(&app.state, "WRITER", &[401]).await;
    let first = seed_user(&app.state, &generate_unique_email(), "password123", vec![reader.id]).await;
    let second = seed_user(
        &app.state,
        &generate_unique_email(),
        "password123",
        vec![writer.id, reader.id],
    )
    .await;
    let token = token_with(&app.state, &[502]);

    let (status, body) = send(
        &app.router,
        "POST",
        "/api/v1/users/by-ids",
        Some(&token),
        Some(json!({ "ids": [first.id, UserId::new(), second.id] })),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    let users = body.as_array().unwrap();
    assert_eq!(users.len(), 2);

    let second_json = users
        .iter()
        .find(|u| u["id"] == second.id.to_string())
        .unwrap();
    let codes: Vec<&str> = second_json["roles"]
        .as_array()
        .unwrap()
        .iter()
        .map(|r| r["code"].as_str().unwrap())
        .collect();
    assert_eq!(codes, vec!["WRITER", "READER"]);
}

#[tokio::test]
async fn test_list_users_needs_only_authentication() {
    let app = setup_test_app();
    seed_users(&app.state, 3).await;
    let token = token_with(&app.state, &[]);

    let (status, body) = send(&app.router, "GET", "/api/v1/users", Some(&token), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.as_array().unwrap().len(), 3);

    let (status, _) = send(&app.router, "GET", "/api/v1/users", None, None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_users_page_last_page() {
    let app = setup_test_app();
    let users = seed_users(&app.state, 25).await;
    let token = token_with(&app.state, &[505]);

    let (status, body) = send(
        &app.router,
        "GET",
        "/api/v1/users/pages?page=3&size=10",
        Some(&token),
        None,
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    let data = body["data"].as_array().unwrap();
    assert_eq!(data.len(), 5);
    // Newest first, so the last page holds the five oldest users
    assert_eq!(data[4]["id"], users[0].id.to_string());
    assert_eq!(body["page"]["currentPage"], 3);
    assert_eq!(body["page"]["totalElements"], 25);
    assert_eq!(body["page"]["totalPages"], 3);
    assert_eq!(body["links"]["prev"], "/api/v1/users/pages?page=2&size=10");
    assert!(body["links"].get("next").is_none());
}

#[tokio::test]
async fn test_users_page_normalizes_bad_params() {
    let app = setup_test_app();
    seed_users(&app.state, 12).await;
    let token = token_with(&app.state, &[505]);

    let (status, body) = send(
        &app.router,
        "GET",
        "/api/v1/users/pages?page=0&size=-5&query=jane",
        Some(&token),
        None,
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"].as_array().unwrap().len(), 10);
    assert_eq!(body["page"]["currentPage"], 1);
    assert_eq!(body["page"]["size"], 10);
    assert_eq!(body["page"]["totalPages"], 2);
    assert!(body["links"].get("prev").is_none());
    assert_eq!(
        body["links"]["next"],
        "/api/v1/users/pages?page=2&size=-5&query=jane"
    );
}

#[tokio::test]
async fn test_update_user_rehashes_only_new_password() {
    let app = setup_test_app();
    let user = seed_user(&app.state, &generate_unique_email(), "original-pass", vec![]).await;
    let role = seed_role(&app.state, "USER", &[301]).await;
    let token = token_with(&app.state, &[503]);

    let (status, body) = send(
        &app.router,
        "PUT",
        "/api/v1/users",
        Some(&token),
        Some(json!({
            "id": user.id,
            "email": user.email,
            "fullName": "Renamed User",
            "roleIds": [role.id]
        })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["fullName"], "Renamed User");
    assert_eq!(body["roles"][0]["code"], "USER");

    let stored = app.state.users().find_by_id(user.id).await.unwrap().unwrap();
    assert_eq!(stored.password_hash, user.password_hash);
    assert_eq!(stored.created_at, user.created_at);
    assert!(stored.updated_at >= user.updated_at);

    let (status, _) = send(
        &app.router,
        "PUT",
        "/api/v1/users",
        Some(&token),
        Some(json!({
            "id": user.id,
            "email": user.email,
            "password": "brand-new-pass",
            "fullName": "Renamed User"
        })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let stored = app.state.users().find_by_id(user.id).await.unwrap().unwrap();
    assert!(password_matches("brand-new-pass", &stored.password_hash));
    assert!(stored.role_ids.is_empty());
}

#[tokio::test]
async fn test_update_user_keeps_picture_when_omitted() {
    let app = setup_test_app();
    let mut user = seed_user(&app.state, &generate_unique_email(), "password123", vec![]).await;
    user.picture_url = "https://example.com/p.png".to_string();
    app.state.users().save(&user).await.unwrap();
    let token = token_with(&app.state, &[503]);

    let (status, body) = send(
        &app.router,
        "PUT",
        "/api/v1/users",
        Some(&token),
        Some(json!({
            "id": user.id,
            "email": user.email,
            "fullName": "Pictured User"
        })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["pictureUrl"], "https://example.com/p.png");

    let stored = app.state.users().find_by_id(user.id).await.unwrap().unwrap();
    assert_eq!(stored.picture_url, "https://example.com/p.png");

    let (status, body) = send(
        &app.router,
        "PUT",
        "/api/v1/users",
        Some(&token),
        Some(json!({
            "id": user.id,
            "email": user.email,
            "fullName": "Pictured User",
            "pictureUrl": "https://example.com/new.png"
        })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["pictureUrl"], "https://example.com/new.png");
}

#[tokio::test]
async fn test_update_user_email_conflict() {
    let app = setup_test_app();
    seed_user(&app.state, "first@example.com", "password123", vec![]).await;
    let second = seed_user(&app.state, "second@example.com", "password123", vec![]).await;
    let token = token_with(&app.state, &[503]);

    let (status, _) = send(
        &app.router,
        "PUT",
        "/api/v1/users",
        Some(&token),
        Some(json!({
            "id": second.id,
            "email": "first@example.com",
            "fullName": "Second"
        })),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_delete_user() {
    let app = setup_test_app();
    let user = seed_user(&app.state, &generate_unique_email(), "password123", vec![]).await;
    let token = token_with(&app.state, &[504]);
    let uri = format!("/api/v1/users/{}", user.id);

    let (status, body) = send(&app.router, "DELETE", &uri, Some(&token), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);

    let (status, _) = send(&app.router, "DELETE", &uri, Some(&token), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_deleted_role_is_skipped_on_read() {
    let app = setup_test_app();
    let kept = seed_role(&app.state, "KEPT", &[301]).await;
    let dropped = seed_role(&app.state, "DROPPED", &[302]).await;
    let user = seed_user(
        &app.state,
        &generate_unique_email(),
        "password123",
        vec![dropped.id, kept.id],
    )
    .await;
    app.state.roles().delete(dropped.id).await.unwrap();
    let token = token_with(&app.state, &[502]);

    let (status, body) = send(
        &app.router,
        "GET",
        &format!("/api/v1/users/{}", user.id),
        Some(&token),
        None,
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    let roles = body["roles"].as_array().unwrap();
    assert_eq!(roles.len(), 1);
    assert_eq!(roles[0]["code"], "KEPT");
}
