use serde::Deserialize;
use utoipa::ToSchema;
use validator::Validate;

use usersvc_core::PermissionId;

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct PermissionsByIdsRequest {
    /// Permission codes to look up. Unknown codes are skipped.
    #[serde(default)]
    pub ids: Vec<PermissionId>,
}
