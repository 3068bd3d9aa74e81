use axum::{
    Json,
    extract::{Path, State},
};
use tracing::instrument;

use usersvc_core::{AppError, Permission};
use usersvc_models::PermissionsByIdsRequest;

use super::service::PermissionService;
use crate::middleware::auth::AuthUser;
use crate::modules::auth::controller::ErrorResponse;
use crate::state::AppState;
use crate::validator::ValidatedJson;

/// List every permission
#[utoipa::path(
    get,
    path = "/api/v1/permissions",
    responses(
        (status = 200, description = "All permissions ordered by code", body = Vec<Permission>),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 403, description = "Forbidden", body = ErrorResponse)
    ),
    tag = "Permissions",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state, _auth_user))]
pub async fn get_permissions(
    State(state): State<AppState>,
    _auth_user: AuthUser,
) -> Json<Vec<Permission>> {
    Json(PermissionService::get_all(&state.registry))
}

/// Get a permission by its code
#[utoipa::path(
    get,
    path = "/api/v1/permissions/{id}",
    params(
        ("id" = i32, Path, description = "Permission code")
    ),
    responses(
        (status = 200, description = "Permission details", body = Permission),
        (status = 400, description = "Invalid permission code", body = ErrorResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 403, description = "Forbidden", body = ErrorResponse),
        (status = 404, description = "Permission not found", body = ErrorResponse)
    ),
    tag = "Permissions",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state, _auth_user))]
pub async fn get_permission_by_id(
    State(state): State<AppState>,
    _auth_user: AuthUser,
    Path(id): Path<String>,
) -> Result<Json<Permission>, AppError> {
    let permission = PermissionService::get_by_id(&state.registry, &id)?;
    Ok(Json(permission))
}

/// Get a batch of permissions by code
#[utoipa::path(
    post,
    path = "/api/v1/permissions/by-ids",
    request_body = PermissionsByIdsRequest,
    responses(
        (status = 200, description = "Known permissions among the requested codes", body = Vec<Permission>),
        (status = 400, description = "Invalid request body", body = ErrorResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 403, description = "Forbidden", body = ErrorResponse)
    ),
    tag = "Permissions",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state, _auth_user, request))]
pub async fn get_permissions_by_ids(
    State(state): State<AppState>,
    _auth_user: AuthUser,
    ValidatedJson(request): ValidatedJson<PermissionsByIdsRequest>,
) -> Json<Vec<Permission>> {
    Json(PermissionService::get_by_ids(&state.registry, &request.ids))
}
