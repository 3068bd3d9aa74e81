use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use tracing::instrument;

use usersvc_core::{AppError, PageableParams, PaginationResponse};
use usersvc_models::{CreateRoleDto, DeleteResponse, Role, UpdateRoleDto};

use super::service::RoleService;
use crate::middleware::auth::AuthUser;
use crate::modules::auth::controller::ErrorResponse;
use crate::state::AppState;
use crate::utils::pagination::PageRequest;
use crate::validator::ValidatedJson;

/// Create a role
#[utoipa::path(
    post,
    path = "/api/v1/roles",
    request_body = CreateRoleDto,
    responses(
        (status = 201, description = "Role created", body = Role),
        (status = 400, description = "Unknown permission, empty permission set or duplicate code", body = ErrorResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 403, description = "Forbidden", body = ErrorResponse),
        (status = 422, description = "Validation error", body = ErrorResponse)
    ),
    tag = "Roles",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state, auth_user, dto), fields(actor = %auth_user.subject()))]
pub async fn create_role(
    State(state): State<AppState>,
    auth_user: AuthUser,
    ValidatedJson(dto): ValidatedJson<CreateRoleDto>,
) -> Result<(StatusCode, Json<Role>), AppError> {
    let role = RoleService::create_role(&state, dto).await?;
    Ok((StatusCode::CREATED, Json(role)))
}

/// List roles one page at a time, ordered by code
#[utoipa::path(
    get,
    path = "/api/v1/roles/pages",
    params(PageableParams),
    responses(
        (status = 200, description = "Page of roles", body = PaginationResponse<Role>),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 403, description = "Forbidden", body = ErrorResponse)
    ),
    tag = "Roles",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state, _auth_user))]
pub async fn get_roles_page(
    State(state): State<AppState>,
    _auth_user: AuthUser,
    page: PageRequest,
) -> Result<Json<PaginationResponse<Role>>, AppError> {
    let roles = RoleService::get_roles_page(&state, page.pageable, page.links).await?;
    Ok(Json(roles))
}

/// Get a role by ID
#[utoipa::path(
    get,
    path = "/api/v1/roles/{id}",
    params(
        ("id" = String, Path, description = "Role ID")
    ),
    responses(
        (status = 200, description = "Role with its permissions", body = Role),
        (status = 400, description = "Invalid role ID", body = ErrorResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 403, description = "Forbidden", body = ErrorResponse),
        (status = 404, description = "Role not found", body = ErrorResponse)
    ),
    tag = "Roles",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state, _auth_user))]
pub async fn get_role_by_id(
    State(state): State<AppState>,
    _auth_user: AuthUser,
    Path(id): Path<String>,
) -> Result<Json<Role>, AppError> {
    let role = RoleService::get_role_by_id(&state, &id).await?;
    Ok(Json(role))
}

/// Update a role's code and permissions
#[utoipa::path(
    put,
    path = "/api/v1/roles",
    request_body = UpdateRoleDto,
    responses(
        (status = 200, description = "Role updated", body = Role),
        (status = 400, description = "Unknown permission, empty permission set or duplicate code", body = ErrorResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 403, description = "Forbidden", body = ErrorResponse),
        (status = 404, description = "Role not found", body = ErrorResponse),
        (status = 422, description = "Validation error", body = ErrorResponse)
    ),
    tag = "Roles",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state, auth_user, dto), fields(actor = %auth_user.subject()))]
pub async fn update_role(
    State(state): State<AppState>,
    auth_user: AuthUser,
    ValidatedJson(dto): ValidatedJson<UpdateRoleDto>,
) -> Result<Json<Role>, AppError> {
    let role = RoleService::update_role(&state, dto).await?;
    Ok(Json(role))
}

/// Delete a role
#[utoipa::path(
    delete,
    path = "/api/v1/roles/{id}",
    params(
        ("id" = String, Path, description = "Role ID")
    ),
    responses(
        (status = 200, description = "Role deleted", body = DeleteResponse),
        (status = 400, description = "Invalid role ID", body = ErrorResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 403, description = "Forbidden", body = ErrorResponse),
        (status = 404, description = "Role not found", body = ErrorResponse)
    ),
    tag = "Roles",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state, auth_user), fields(actor = %auth_user.subject()))]
pub async fn delete_role(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path(id): Path<String>,
) -> Result<Json<DeleteResponse>, AppError> {
    let response = RoleService::delete_role(&state, &id).await?;
    Ok(Json(response))
}
