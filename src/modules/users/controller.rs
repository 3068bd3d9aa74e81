use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use tracing::instrument;

use usersvc_core::{AppError, PageableParams, PaginationResponse};
use usersvc_models::{CreateUserDto, DeleteResponse, UpdateUserDto, UserResponse, UsersByIdsRequest};

use super::service::UserService;
use crate::middleware::auth::AuthUser;
use crate::modules::auth::controller::ErrorResponse;
use crate::state::AppState;
use crate::utils::pagination::PageRequest;
use crate::validator::ValidatedJson;

/// Create a user
#[utoipa::path(
    post,
    path = "/api/v1/users",
    request_body = CreateUserDto,
    responses(
        (status = 201, description = "User created", body = UserResponse),
        (status = 400, description = "Email already registered or malformed body", body = ErrorResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 403, description = "Forbidden", body = ErrorResponse),
        (status = 422, description = "Validation error", body = ErrorResponse)
    ),
    tag = "Users",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state, auth_user, dto), fields(actor = %auth_user.subject()))]
pub async fn create_user(
    State(state): State<AppState>,
    auth_user: AuthUser,
    ValidatedJson(dto): ValidatedJson<CreateUserDto>,
) -> Result<(StatusCode, Json<UserResponse>), AppError> {
    let user = UserService::create_user(&state, dto).await?;
    Ok((StatusCode::CREATED, Json(user)))
}

/// List every user, newest first
#[utoipa::path(
    get,
    path = "/api/v1/users",
    responses(
        (status = 200, description = "All users with their roles", body = Vec<UserResponse>),
        (status = 401, description = "Unauthorized", body = ErrorResponse)
    ),
    tag = "Users",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state, _auth_user))]
pub async fn get_users(
    State(state): State<AppState>,
    _auth_user: AuthUser,
) -> Result<Json<Vec<UserResponse>>, AppError> {
    let users = UserService::get_all_users(&state).await?;
    Ok(Json(users))
}

/// List users one page at a time, newest first
#[utoipa::path(
    get,
    path = "/api/v1/users/pages",
    params(PageableParams),
    responses(
        (status = 200, description = "Page of users", body = PaginationResponse<UserResponse>),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 403, description = "Forbidden", body = ErrorResponse)
    ),
    tag = "Users",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state, _auth_user))]
pub async fn get_users_page(
    State(state): State<AppState>,
    _auth_user: AuthUser,
    page: PageRequest,
) -> Result<Json<PaginationResponse<UserResponse>>, AppError> {
    let users = UserService::get_users_page(&state, page.pageable, page.links).await?;
    Ok(Json(users))
}

/// Get a batch of users by ID
#[utoipa::path(
    post,
    path = "/api/v1/users/by-ids",
    request_body = UsersByIdsRequest,
    responses(
        (status = 200, description = "Users found among the requested IDs", body = Vec<UserResponse>),
        (status = 400, description = "Malformed body", body = ErrorResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 403, description = "Forbidden", body = ErrorResponse),
        (status = 422, description = "Validation error", body = ErrorResponse)
    ),
    tag = "Users",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state, _auth_user, request))]
pub async fn get_users_by_ids(
    State(state): State<AppState>,
    _auth_user: AuthUser,
    ValidatedJson(request): ValidatedJson<UsersByIdsRequest>,
) -> Result<Json<Vec<UserResponse>>, AppError> {
    let users = UserService::get_users_by_ids(&state, &request.ids).await?;
    Ok(Json(users))
}

/// Get a user by email
#[utoipa::path(
    get,
    path = "/api/v1/users/email/{email}",
    params(
        ("email" = String, Path, description = "User email")
    ),
    responses(
        (status = 200, description = "User with their roles", body = UserResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 403, description = "Forbidden", body = ErrorResponse),
        (status = 404, description = "User not found", body = ErrorResponse)
    ),
    tag = "Users",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state, _auth_user))]
pub async fn get_user_by_email(
    State(state): State<AppState>,
    _auth_user: AuthUser,
    Path(email): Path<String>,
) -> Result<Json<UserResponse>, AppError> {
    let user = UserService::get_user_by_email(&state, &email).await?;
    Ok(Json(user))
}

/// Get a user by ID
#[utoipa::path(
    get,
    path = "/api/v1/users/{id}",
    params(
        ("id" = String, Path, description = "User ID")
    ),
    responses(
        (status = 200, description = "User with their roles", body = UserResponse),
        (status = 400, description = "Invalid user ID", body = ErrorResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 403, description = "Forbidden", body = ErrorResponse),
        (status = 404, description = "User not found", body = ErrorResponse)
    ),
    tag = "Users",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state, _auth_user))]
pub async fn get_user_by_id(
    State(state): State<AppState>,
    _auth_user: AuthUser,
    Path(id): Path<String>,
) -> Result<Json<UserResponse>, AppError> {
    let user = UserService::get_user_by_id(&state, &id).await?;
    Ok(Json(user))
}

/// Update a user
#[utoipa::path(
    put,
    path = "/api/v1/users",
    request_body = UpdateUserDto,
    responses(
        (status = 200, description = "User updated", body = UserResponse),
        (status = 400, description = "Email already registered or malformed body", body = ErrorResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 403, description = "Forbidden", body = ErrorResponse),
        (status = 404, description = "User not found", body = ErrorResponse),
        (status = 422, description = "Validation error", body = ErrorResponse)
    ),
    tag = "Users",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state, auth_user, dto), fields(actor = %auth_user.subject()))]
pub async fn update_user(
    State(state): State<AppState>,
    auth_user: AuthUser,
    ValidatedJson(dto): ValidatedJson<UpdateUserDto>,
) -> Result<Json<UserResponse>, AppError> {
    let user = UserService::update_user(&state, dto).await?;
    Ok(Json(user))
}

/// Delete a user
#[utoipa::path(
    delete,
    path = "/api/v1/users/{id}",
    params(
        ("id" = String, Path, description = "User ID")
    ),
    responses(
        (status = 200, description = "User deleted", body = DeleteResponse),
        (status = 400, description = "Invalid user ID", body = ErrorResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 403, description = "Forbidden", body = ErrorResponse),
        (status = 404, description = "User not found", body = ErrorResponse)
    ),
    tag = "Users",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state, auth_user), fields(actor = %auth_user.subject()))]
pub async fn delete_user(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path(id): Path<String>,
) -> Result<Json<DeleteResponse>, AppError> {
    let response = UserService::delete_user(&state, &id).await?;
    Ok(Json(response))
}
