use anyhow::anyhow;

use usersvc_core::{AppError, Permission, PermissionId, PermissionRegistry};

pub struct PermissionService;

impl PermissionService {
    pub fn get_all(registry: &PermissionRegistry) -> Vec<Permission> {
        registry.all()
    }

    pub fn get_by_id(registry: &PermissionRegistry, id: &str) -> Result<Permission, AppError> {
        let id: PermissionId = id
            .trim()
            .parse()
            .map_err(|_| AppError::bad_request(anyhow!("Invalid permission id format")))?;

        registry
            .by_id(id)
            .cloned()
            .ok_or_else(|| AppError::not_found(anyhow!("Permission not found")))
    }

    /// Unknown codes are left out of the result.
    pub fn get_by_ids(registry: &PermissionRegistry, ids: &[PermissionId]) -> Vec<Permission> {
        registry.by_ids(ids)
    }
}
