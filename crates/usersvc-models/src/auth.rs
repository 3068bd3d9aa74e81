use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::ids::UserId;

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct LoginWithEmailRequest {
    #[validate(email(message = "email must be a valid email address"))]
    pub email: String,
    #[validate(length(min = 1, message = "password is required"))]
    pub password: String,
}

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LoginWithGoogleRequest {
    /// Access token obtained from the identity provider
    #[validate(length(min = 1, message = "accessToken is required"))]
    pub access_token: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LoginResponse {
    pub id: UserId,
    pub full_name: String,
    pub given_name: String,
    pub family_name: String,
    pub profile_image: String,
    pub email: String,
    /// Signed bearer token
    pub jwt: String,
}
