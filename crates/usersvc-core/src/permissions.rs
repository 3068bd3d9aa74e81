//! Permission catalog and registry.
//!
//! Every protected route is tied to a single permission code. Codes are small
//! integers grouped by resource family:
//!
//! - `3xx`: permission management
//! - `4xx`: role management
//! - `5xx`: user management
//! - `6xx`: product management (served by a collaborating service)
//!
//! The catalog is closed and known at build time. [`PermissionRegistry`]
//! indexes it once and is shared read-only for the lifetime of the process.

use std::collections::BTreeMap;
use std::sync::{Arc, OnceLock};

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Numeric permission code carried in tokens and role documents.
pub type PermissionId = i32;

// Permission management
pub const GET_ALL_PERMISSIONS: PermissionId = 301;
pub const GET_PERMISSION_BY_ID: PermissionId = 302;
pub const GET_PERMISSIONS_BY_IDS: PermissionId = 303;

// Role management
pub const CREATE_ROLE: PermissionId = 401;
pub const GET_ROLE_BY_ID: PermissionId = 402;
pub const GET_ROLES_PAGINATED: PermissionId = 404;
pub const DELETE_ROLE: PermissionId = 405;
pub const UPDATE_ROLE: PermissionId = 406;

// User management
pub const CREATE_USER: PermissionId = 501;
pub const GET_USER_BY_ID: PermissionId = 502;
pub const UPDATE_USER: PermissionId = 503;
pub const DELETE_USER: PermissionId = 504;
pub const GET_USERS_PAGINATED: PermissionId = 505;

// Product management
pub const CREATE_PRODUCT: PermissionId = 601;
pub const GET_PRODUCT_BY_ID: PermissionId = 602;
pub const UPDATE_PRODUCT: PermissionId = 603;
pub const DELETE_PRODUCT: PermissionId = 604;
pub const GET_PRODUCTS_PAGINATED: PermissionId = 605;
pub const ADJUST_PRODUCT_STOCK: PermissionId = 606;
pub const SEARCH_PRODUCTS: PermissionId = 607;

/// Read-only permission family granted to the default `USER` role.
pub const READ_ONLY_PERMISSIONS: [PermissionId; 3] =
    [GET_ALL_PERMISSIONS, GET_PERMISSION_BY_ID, GET_PERMISSIONS_BY_IDS];

/// A single fine-grained capability tied to one HTTP method and path.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Permission {
    pub id: PermissionId,
    pub method: String,
    pub path: String,
    pub name: String,
    pub description: String,
}

struct Entry {
    id: PermissionId,
    method: &'static str,
    path: &'static str,
    name: &'static str,
    description: &'static str,
}

const CATALOG: &[Entry] = &[
    Entry {
        id: GET_ALL_PERMISSIONS,
        method: "GET",
        path: "/permissions",
        name: "Get All Permissions",
        description: "List every permission known to the system",
    },
    Entry {
        id: GET_PERMISSION_BY_ID,
        method: "GET",
        path: "/permissions/:id",
        name: "Get Permission By Id",
        description: "Read a single permission by its code",
    },
    Entry {
        id: GET_PERMISSIONS_BY_IDS,
        method: "POST",
        path: "/permissions/by-ids",
        name: "Get Permissions By Ids",
        description: "Read a batch of permissions by their codes",
    },
    Entry {
        id: CREATE_ROLE,
        method: "POST",
        path: "/roles",
        name: "Create Role",
        description: "Create a role from a set of permission codes",
    },
    Entry {
        id: GET_ROLE_BY_ID,
        method: "GET",
        path: "/roles/:id",
        name: "Get Role By Id",
        description: "Read a single role with its permissions",
    },
    Entry {
        id: GET_ROLES_PAGINATED,
        method: "GET",
        path: "/roles/pages",
        name: "Get Roles Paginated",
        description: "List roles one page at a time",
    },
    Entry {
        id: DELETE_ROLE,
        method: "DELETE",
        path: "/roles/:id",
        name: "Delete Role",
        description: "Delete a role",
    },
    Entry {
        id: UPDATE_ROLE,
        method: "PUT",
        path: "/roles",
        name: "Update Role",
        description: "Change a role's code or permissions",
    },
    Entry {
        id: CREATE_USER,
        method: "POST",
        path: "/users",
        name: "Create User",
        description: "Register a new user account",
    },
    Entry {
        id: GET_USER_BY_ID,
        method: "GET",
        path: "/users/:id",
        name: "Get User By Id",
        description: "Read a single user with their roles",
    },
    Entry {
        id: UPDATE_USER,
        method: "PUT",
        path: "/users",
        name: "Update User",
        description: "Change a user's profile, password or roles",
    },
    Entry {
        id: DELETE_USER,
        method: "DELETE",
        path: "/users/:id",
        name: "Delete User",
        description: "Delete a user account",
    },
    Entry {
        id: GET_USERS_PAGINATED,
        method: "GET",
        path: "/users/pages",
        name: "Get Users Paginated",
        description: "List users one page at a time",
    },
    Entry {
        id: CREATE_PRODUCT,
        method: "POST",
        path: "/products",
        name: "Create Product",
        description: "Add a product to the catalog",
    },
    Entry {
        id: GET_PRODUCT_BY_ID,
        method: "GET",
        path: "/products/:id",
        name: "Get Product By Id",
        description: "Read a single product",
    },
    Entry {
        id: UPDATE_PRODUCT,
        method: "PUT",
        path: "/products",
        name: "Update Product",
        description: "Change a product's details",
    },
    Entry {
        id: DELETE_PRODUCT,
        method: "DELETE",
        path: "/products/:id",
        name: "Delete Product",
        description: "Remove a product from the catalog",
    },
    Entry {
        id: GET_PRODUCTS_PAGINATED,
        method: "GET",
        path: "/products/pages",
        name: "Get Products Paginated",
        description: "List products one page at a time",
    },
    Entry {
        id: ADJUST_PRODUCT_STOCK,
        method: "PATCH",
        path: "/products/:id/stock",
        name: "Adjust Product Stock",
        description: "Increase or decrease the stock of a product",
    },
    Entry {
        id: SEARCH_PRODUCTS,
        method: "GET",
        path: "/products/search",
        name: "Search Products",
        description: "Search the product catalog",
    },
];

impl From<&Entry> for Permission {
    fn from(entry: &Entry) -> Self {
        Self {
            id: entry.id,
            method: entry.method.to_string(),
            path: entry.path.to_string(),
            name: entry.name.to_string(),
            description: entry.description.to_string(),
        }
    }
}

static SHARED: OnceLock<Arc<PermissionRegistry>> = OnceLock::new();

/// Read-only index over the permission catalog.
///
/// Construct it once at startup with [`PermissionRegistry::shared`] and hand
/// the `Arc` to whatever needs it. The registry never errors on unknown
/// codes; callers needing strict validation compare lengths themselves.
#[derive(Debug)]
pub struct PermissionRegistry {
    permissions: BTreeMap<PermissionId, Permission>,
}

impl PermissionRegistry {
    /// Builds a registry over the built-in catalog.
    pub fn new() -> Self {
        let permissions = CATALOG
            .iter()
            .map(|entry| (entry.id, Permission::from(entry)))
            .collect();

        Self { permissions }
    }

    /// Process-wide instance, built on first access.
    pub fn shared() -> Arc<Self> {
        SHARED.get_or_init(|| Arc::new(Self::new())).clone()
    }

    /// Every permission, ordered by code.
    pub fn all(&self) -> Vec<Permission> {
        self.permissions.values().cloned().collect()
    }

    pub fn by_id(&self, id: PermissionId) -> Option<&Permission> {
        self.permissions.get(&id)
    }

    /// Permissions for the codes that exist. Unknown codes are dropped.
    pub fn by_ids(&self, ids: &[PermissionId]) -> Vec<Permission> {
        ids.iter()
            .filter_map(|id| self.permissions.get(id))
            .cloned()
            .collect()
    }

    pub fn contains(&self, id: PermissionId) -> bool {
        self.permissions.contains_key(&id)
    }

    pub fn ids(&self) -> Vec<PermissionId> {
        self.permissions.keys().copied().collect()
    }

    pub fn len(&self) -> usize {
        self.permissions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.permissions.is_empty()
    }
}

impl Default for PermissionRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_by_id_returns_catalog_entry() {
        let registry = PermissionRegistry::new();
        let permission = registry.by_id(GET_ALL_PERMISSIONS).unwrap();

        assert_eq!(permission.id, 301);
        assert_eq!(permission.method, "GET");
        assert_eq!(permission.path, "/permissions");
        assert_eq!(permission.name, "Get All Permissions");
    }

    #[test]
    fn test_by_id_unknown_code() {
        let registry = PermissionRegistry::new();
        assert!(registry.by_id(999).is_none());
    }

    #[test]
    fn test_by_ids_drops_unknown_codes() {
        let registry = PermissionRegistry::new();
        let found = registry.by_ids(&[301, 999]);

        assert_eq!(found.len(), 1);
        assert_eq!(found[0].id, 301);
    }

    #[test]
    fn test_all_is_ordered_by_code() {
        let registry = PermissionRegistry::new();
        let ids: Vec<_> = registry.all().iter().map(|p| p.id).collect();

        let mut sorted = ids.clone();
        sorted.sort_unstable();
        assert_eq!(ids, sorted);
        assert_eq!(ids.len(), CATALOG.len());
    }

    #[test]
    fn test_catalog_codes_are_unique() {
        let registry = PermissionRegistry::new();
        assert_eq!(registry.len(), CATALOG.len());
    }

    #[test]
    fn test_codes_sit_in_their_family() {
        for entry in CATALOG {
            let family = entry.id / 100;
            let expected = match entry.path.split('/').nth(1) {
                Some("permissions") => 3,
                Some("roles") => 4,
                Some("users") => 5,
                Some("products") => 6,
                other => panic!("unexpected resource {:?}", other),
            };
            assert_eq!(family, expected, "code {} in wrong family", entry.id);
        }
    }

    #[test]
    fn test_shared_is_built_once() {
        let first = PermissionRegistry::shared();
        let second = PermissionRegistry::shared();
        assert!(Arc::ptr_eq(&first, &second));
    }

    #[test]
    fn test_read_only_permissions_exist() {
        let registry = PermissionRegistry::new();
        assert_eq!(
            registry.by_ids(&READ_ONLY_PERMISSIONS).len(),
            READ_ONLY_PERMISSIONS.len()
        );
    }
}
