//! User domain models and DTOs.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use usersvc_core::serde::timestamp;

use crate::ids::{RoleId, UserId};
use crate::roles::Role;

/// A user as stored.
///
/// `role_ids` are weak references: a role deleted after assignment is simply
/// skipped when the user is read.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: UserId,
    pub email: String,
    #[serde(default)]
    pub password_hash: String,
    #[serde(default)]
    pub full_name: String,
    #[serde(default)]
    pub picture_url: String,
    #[serde(with = "timestamp")]
    pub created_at: DateTime<Utc>,
    #[serde(with = "timestamp")]
    pub updated_at: DateTime<Utc>,
    #[serde(default)]
    pub role_ids: Vec<RoleId>,
}

/// A user as returned by the API, with roles resolved.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UserResponse {
    pub id: UserId,
    pub email: String,
    pub full_name: String,
    pub picture_url: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub roles: Vec<Role>,
}

impl UserResponse {
    pub fn from_parts(user: User, roles: Vec<Role>) -> Self {
        Self {
            id: user.id,
            email: user.email,
            full_name: user.full_name,
            picture_url: user.picture_url,
            created_at: user.created_at,
            updated_at: user.updated_at,
            roles,
        }
    }
}

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateUserDto {
    #[validate(email(message = "email must be a valid email address"))]
    pub email: String,
    #[validate(length(min = 8, message = "password must be at least 8 characters"))]
    pub password: String,
    #[validate(length(min = 1, message = "fullName is required"))]
    pub full_name: String,
    #[serde(default)]
    pub picture_url: Option<String>,
    /// Role IDs to assign to the user. If empty, no roles are assigned.
    #[serde(default)]
    pub role_ids: Vec<RoleId>,
}

/// Replacement of a user's editable fields. The password is only changed
/// when a non-empty value is sent, and the picture only when present.
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateUserDto {
    pub id: UserId,
    #[validate(email(message = "email must be a valid email address"))]
    pub email: String,
    #[serde(default)]
    pub password: Option<String>,
    #[validate(length(min = 1, message = "fullName is required"))]
    pub full_name: String,
    #[serde(default)]
    pub picture_url: Option<String>,
    #[serde(default)]
    pub role_ids: Vec<RoleId>,
}

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct UsersByIdsRequest {
    #[validate(length(min = 1, message = "ids must not be empty"))]
    pub ids: Vec<UserId>,
}
