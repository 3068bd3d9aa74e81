use axum::{Json, extract::State};
use tracing::instrument;
use utoipa::ToSchema;

use usersvc_core::AppError;
use usersvc_models::{LoginResponse, LoginWithEmailRequest, LoginWithGoogleRequest};

use super::service::AuthService;
use crate::state::AppState;
use crate::validator::ValidatedJson;

#[derive(ToSchema)]
pub struct ErrorResponse {
    pub error: String,
}

/// Log in with an identity provider access token
///
/// The first login with a new email registers the user with the default role.
#[utoipa::path(
    post,
    path = "/api/v1/auth/login-with-google",
    request_body = LoginWithGoogleRequest,
    responses(
        (status = 200, description = "Login successful", body = LoginResponse),
        (status = 400, description = "Malformed body", body = ErrorResponse),
        (status = 401, description = "Identity provider rejected the token", body = ErrorResponse),
        (status = 422, description = "Validation error", body = ErrorResponse),
        (status = 502, description = "Identity provider unavailable", body = ErrorResponse)
    ),
    tag = "Authentication"
)]
#[instrument(skip_all)]
pub async fn login_with_google(
    State(state): State<AppState>,
    ValidatedJson(request): ValidatedJson<LoginWithGoogleRequest>,
) -> Result<Json<LoginResponse>, AppError> {
    let response = AuthService::login_with_google(&state, &request.access_token).await?;
    Ok(Json(response))
}

/// Log in with email and password
#[utoipa::path(
    post,
    path = "/api/v1/auth/login-with-email",
    request_body = LoginWithEmailRequest,
    responses(
        (status = 200, description = "Login successful", body = LoginResponse),
        (status = 400, description = "Malformed body", body = ErrorResponse),
        (status = 401, description = "Invalid email or password", body = ErrorResponse),
        (status = 422, description = "Validation error", body = ErrorResponse)
    ),
    tag = "Authentication"
)]
#[instrument(skip_all)]
pub async fn login_with_email(
    State(state): State<AppState>,
    ValidatedJson(request): ValidatedJson<LoginWithEmailRequest>,
) -> Result<Json<LoginResponse>, AppError> {
    let response = AuthService::login_with_email(&state, request).await?;
    Ok(Json(response))
}
