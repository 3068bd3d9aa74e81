//! Role models and DTOs.
//!
//! Roles are stored as [`RoleDocument`]s holding permission codes and served
//! as [`Role`]s with those codes resolved against the permission registry.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use usersvc_core::{Permission, PermissionId};

use crate::ids::RoleId;

/// Code of the role granted to users created through social login.
pub const DEFAULT_USER_ROLE: &str = "USER";

/// Code of the role bootstrapped with every permission.
pub const ADMIN_ROLE: &str = "ADMIN";

/// Stored form of a role.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoleDocument {
    pub id: RoleId,
    pub code: String,
    #[serde(default)]
    pub permission_ids: Vec<PermissionId>,
}

/// A role with its permissions resolved.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Role {
    pub id: RoleId,
    pub code: String,
    pub permissions: Vec<Permission>,
}

impl Role {
    pub fn permission_ids(&self) -> impl Iterator<Item = PermissionId> + '_ {
        self.permissions.iter().map(|p| p.id)
    }
}

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct CreateRoleDto {
    #[validate(length(min = 1, max = 64, message = "code must be between 1 and 64 characters"))]
    pub code: String,
    /// Permission codes. Every code must exist in the registry.
    #[serde(default)]
    pub permissions: Vec<PermissionId>,
}

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct UpdateRoleDto {
    pub id: RoleId,
    #[validate(length(min = 1, max = 64, message = "code must be between 1 and 64 characters"))]
    pub code: String,
    #[serde(default)]
    pub permissions: Vec<PermissionId>,
}
