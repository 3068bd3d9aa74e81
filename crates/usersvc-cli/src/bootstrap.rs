//! Built-in roles and the first administrator.

use std::sync::Arc;

use anyhow::{anyhow, bail};
use chrono::Utc;

use usersvc_core::{PermissionId, PermissionRegistry};
use usersvc_core::permissions::READ_ONLY_PERMISSIONS;
use usersvc_models::{ADMIN_ROLE, DEFAULT_USER_ROLE, RoleDocument, RoleId, User, UserId};
use usersvc_store::{DocumentStore, RoleRepository, UserRepository};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoleChange {
    Created,
    Updated,
    Unchanged,
}

#[derive(Debug, Clone)]
pub struct BootstrapReport {
    pub admin: RoleDocument,
    pub admin_change: RoleChange,
    pub user: RoleDocument,
    pub user_change: RoleChange,
}

/// Creates the role `code` or resets its permissions to `permission_ids`.
async fn ensure_role(
    roles: &RoleRepository,
    code: &str,
    permission_ids: Vec<PermissionId>,
) -> anyhow::Result<(RoleDocument, RoleChange)> {
    match roles.find_by_code(code).await? {
        Some(role) if role.permission_ids == permission_ids => Ok((role, RoleChange::Unchanged)),
        Some(mut role) => {
            role.permission_ids = permission_ids;
            roles.save(&role).await?;
            Ok((role, RoleChange::Updated))
        }
        None => {
            let role = RoleDocument {
                id: RoleId::new(),
                code: code.to_string(),
                permission_ids,
            };
            roles.save(&role).await?;
            Ok((role, RoleChange::Created))
        }
    }
}

/// Ensures `ADMIN` holds every permission and `USER` the read-only family.
///
/// Safe to run repeatedly.
pub async fn bootstrap_roles(store: Arc<dyn DocumentStore>) -> anyhow::Result<BootstrapReport> {
    let roles = RoleRepository::new(store);
    let registry = PermissionRegistry::shared();

    let (admin, admin_change) = ensure_role(&roles, ADMIN_ROLE, registry.ids()).await?;
    let (user, user_change) =
        ensure_role(&roles, DEFAULT_USER_ROLE, READ_ONLY_PERMISSIONS.to_vec()).await?;

    Ok(BootstrapReport {
        admin,
        admin_change,
        user,
        user_change,
    })
}

/// Creates a user holding the `ADMIN` role, bootstrapping roles first.
pub async fn create_admin(
    store: Arc<dyn DocumentStore>,
    email: &str,
    full_name: &str,
    password: &str,
) -> anyhow::Result<User> {
    let email = email.trim().to_lowercase();
    if !email.contains('@') {
        bail!("{} is not a valid email address", email);
    }
    if password.chars().count() < 8 {
        bail!("Password must be at least 8 characters");
    }

    let report = bootstrap_roles(store.clone()).await?;
    let users = UserRepository::new(store);

    if users.find_by_email(&email).await?.is_some() {
        bail!("User with email {} already exists", email);
    }

    let password_hash = usersvc_core::hash_password(password)
        .map_err(|e| anyhow!("Failed to hash password: {}", e.error))?;
    let now = Utc::now();
    let user = User {
        id: UserId::new(),
        email,
        password_hash,
        full_name: full_name.trim().to_string(),
        picture_url: String::new(),
        created_at: now,
        updated_at: now,
        role_ids: vec![report.admin.id],
    };
    users.save(&user).await?;

    Ok(user)
}

#[cfg(test)]
mod tests {
    use super::*;
    use usersvc_core::password_matches;
    use usersvc_store::InMemoryDocumentStore;

    fn store() -> Arc<dyn DocumentStore> {
        Arc::new(InMemoryDocumentStore::new())
    }

    #[tokio::test]
    async fn test_bootstrap_creates_both_roles() {
        let report = bootstrap_roles(store()).await.unwrap();

        assert_eq!(report.admin_change, RoleChange::Created);
        assert_eq!(report.admin.permission_ids, PermissionRegistry::new().ids());
        assert_eq!(report.user_change, RoleChange::Created);
        assert_eq!(report.user.permission_ids, vec![301, 302, 303]);
    }

    #[tokio::test]
    async fn test_bootstrap_is_idempotent() {
        let store = store();
        let first = bootstrap_roles(store.clone()).await.unwrap();
        let second = bootstrap_roles(store.clone()).await.unwrap();

        assert_eq!(second.admin_change, RoleChange::Unchanged);
        assert_eq!(second.user_change, RoleChange::Unchanged);
        assert_eq!(first.admin.id, second.admin.id);
        assert_eq!(RoleRepository::new(store).count().await.unwrap(), 2);
    }

    #[tokio::test]
    async fn test_bootstrap_repairs_drifted_role() {
        let store = store();
        let roles = RoleRepository::new(store.clone());
        roles
            .save(&RoleDocument {
                id: RoleId::new(),
                code: "USER".to_string(),
                permission_ids: vec![301],
            })
            .await
            .unwrap();

        let report = bootstrap_roles(store).await.unwrap();
        assert_eq!(report.user_change, RoleChange::Updated);
        assert_eq!(report.user.permission_ids, vec![301, 302, 303]);
    }

    #[tokio::test]
    async fn test_create_admin_assigns_admin_role() {
        let store = store();
        let user = create_admin(store.clone(), "Root@Example.com", "Root User", "s3cret-pass")
            .await
            .unwrap();

        assert_eq!(user.email, "root@example.com");
        assert!(password_matches("s3cret-pass", &user.password_hash));

        let admin = RoleRepository::new(store)
            .find_by_code(ADMIN_ROLE)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(user.role_ids, vec![admin.id]);
    }

    #[tokio::test]
    async fn test_create_admin_rejects_duplicate_email() {
        let store = store();
        create_admin(store.clone(), "root@example.com", "Root", "s3cret-pass")
            .await
            .unwrap();

        let err = create_admin(store, "root@example.com", "Root", "s3cret-pass")
            .await
            .unwrap_err();
        assert!(err.to_string().contains("already exists"));
    }

    #[tokio::test]
    async fn test_create_admin_rejects_short_password() {
        let err = create_admin(store(), "root@example.com", "Root", "short")
            .await
            .unwrap_err();
        assert!(err.to_string().contains("at least 8"));
    }
}
