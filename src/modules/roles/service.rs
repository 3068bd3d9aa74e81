use std::collections::HashSet;

use anyhow::anyhow;
use tracing::{info, instrument};

use usersvc_core::{
    AppError, LinkBase, Pageable, PaginationResponse, Permission, PermissionId,
    PermissionRegistry, hydrate_with, paginate,
};
use usersvc_models::{
    CreateRoleDto, DeleteResponse, Role, RoleDocument, RoleId, UpdateRoleDto,
};

use crate::state::AppState;

pub struct RoleService;

impl RoleService {
    /// Checks a requested permission set against the registry.
    ///
    /// Duplicates are collapsed keeping first-seen order. An empty set or any
    /// unknown code is rejected.
    pub fn resolve_permission_ids(
        registry: &PermissionRegistry,
        requested: &[PermissionId],
    ) -> Result<Vec<PermissionId>, AppError> {
        if requested.is_empty() {
            return Err(AppError::bad_request(anyhow!(
                "A role requires at least one permission"
            )));
        }

        let mut seen = HashSet::new();
        let ids: Vec<PermissionId> = requested
            .iter()
            .copied()
            .filter(|id| seen.insert(*id))
            .collect();

        if registry.by_ids(&ids).len() != ids.len() {
            let unknown: Vec<String> = ids
                .iter()
                .filter(|id| !registry.contains(**id))
                .map(|id| id.to_string())
                .collect();
            return Err(AppError::bad_request(anyhow!(
                "Unknown permission ids: {}",
                unknown.join(", ")
            )));
        }

        Ok(ids)
    }

    /// Resolves the permission codes of stored roles.
    pub fn hydrate_roles(registry: &PermissionRegistry, documents: Vec<RoleDocument>) -> Vec<Role> {
        hydrate_with(
            documents,
            |doc| doc.permission_ids.as_slice(),
            |ids| registry.by_ids(&ids),
            |permission: &Permission| permission.id,
        )
        .into_iter()
        .map(|hydrated| {
            let (doc, permissions) = hydrated.into_parts();
            Role {
                id: doc.id,
                code: doc.code,
                permissions,
            }
        })
        .collect()
    }

    pub async fn find_roles_by_ids(state: &AppState, ids: Vec<RoleId>) -> Result<Vec<Role>, AppError> {
        let documents = state.roles().find_by_ids(&ids).await?;
        Ok(Self::hydrate_roles(&state.registry, documents))
    }

    async fn ensure_code_available(
        state: &AppState,
        code: &str,
        owner: Option<RoleId>,
    ) -> Result<(), AppError> {
        match state.roles().find_by_code(code).await? {
            Some(existing) if Some(existing.id) != owner => Err(AppError::bad_request(anyhow!(
                "Role with code {} already exists",
                code
            ))),
            _ => Ok(()),
        }
    }

    #[instrument(skip(state))]
    pub async fn create_role(state: &AppState, dto: CreateRoleDto) -> Result<Role, AppError> {
        let code = dto.code.trim().to_string();
        let permission_ids = Self::resolve_permission_ids(&state.registry, &dto.permissions)?;
        Self::ensure_code_available(state, &code, None).await?;

        let document = RoleDocument {
            id: RoleId::new(),
            code,
            permission_ids,
        };
        state.roles().save(&document).await?;
        info!(role_id = %document.id, code = %document.code, "Role created");

        Self::hydrate_roles(&state.registry, vec![document])
            .into_iter()
            .next()
            .ok_or_else(|| AppError::internal(anyhow!("Hydration dropped the created role")))
    }

    #[instrument(skip(state))]
    pub async fn get_role_by_id(state: &AppState, id: &str) -> Result<Role, AppError> {
        let id = RoleId::parse(id)?;
        let document = state
            .roles()
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::not_found(anyhow!("Role not found")))?;

        Self::hydrate_roles(&state.registry, vec![document])
            .into_iter()
            .next()
            .ok_or_else(|| AppError::not_found(anyhow!("Role not found")))
    }

    #[instrument(skip(state))]
    pub async fn update_role(state: &AppState, dto: UpdateRoleDto) -> Result<Role, AppError> {
        let roles = state.roles();
        let mut document = roles
            .find_by_id(dto.id)
            .await?
            .ok_or_else(|| AppError::not_found(anyhow!("Role not found")))?;

        let code = dto.code.trim().to_string();
        let permission_ids = Self::resolve_permission_ids(&state.registry, &dto.permissions)?;
        if code != document.code {
            Self::ensure_code_available(state, &code, Some(document.id)).await?;
        }

        document.code = code;
        document.permission_ids = permission_ids;
        roles.save(&document).await?;
        info!(role_id = %document.id, "Role updated");

        Self::hydrate_roles(&state.registry, vec![document])
            .into_iter()
            .next()
            .ok_or_else(|| AppError::internal(anyhow!("Hydration dropped the updated role")))
    }

    /// Users holding the role keep the dangling reference, which is skipped
    /// whenever they are read.
    #[instrument(skip(state))]
    pub async fn delete_role(state: &AppState, id: &str) -> Result<DeleteResponse, AppError> {
        let id = RoleId::parse(id)?;

        if !state.roles().delete(id).await? {
            return Err(AppError::not_found(anyhow!("Role not found")));
        }
        info!(role_id = %id, "Role deleted");

        Ok(DeleteResponse::deleted("Role deleted successfully"))
    }

    #[instrument(skip(state, links))]
    pub async fn get_roles_page(
        state: &AppState,
        pageable: Pageable,
        links: LinkBase,
    ) -> Result<PaginationResponse<Role>, AppError> {
        let mut page = paginate(&state.roles(), &pageable, &links).await?;
        let documents = std::mem::take(&mut page.data);

        Ok(page.with_data(Self::hydrate_roles(&state.registry, documents)))
    }
}
