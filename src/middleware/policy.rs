//! Guard chains for every protected route.
//!
//! Routers reference these constants, and [`ROUTES`] lists them against the
//! path they protect so the whole access policy can be read in one place.

use usersvc_core::permissions as perm;

use super::guard::{Guard::Authenticate, Guard::Authorize, GuardChain};

pub const AUTHENTICATED: GuardChain = GuardChain::new(&[Authenticate]);

// Users
pub const CREATE_USER: GuardChain = GuardChain::new(&[Authenticate, Authorize(perm::CREATE_USER)]);
pub const LIST_USERS: GuardChain = AUTHENTICATED;
pub const GET_USERS_PAGINATED: GuardChain =
    GuardChain::new(&[Authenticate, Authorize(perm::GET_USERS_PAGINATED)]);
pub const READ_USER: GuardChain = GuardChain::new(&[Authenticate, Authorize(perm::GET_USER_BY_ID)]);
pub const UPDATE_USER: GuardChain = GuardChain::new(&[Authenticate, Authorize(perm::UPDATE_USER)]);
pub const DELETE_USER: GuardChain = GuardChain::new(&[Authenticate, Authorize(perm::DELETE_USER)]);

// Roles
pub const CREATE_ROLE: GuardChain = GuardChain::new(&[Authenticate, Authorize(perm::CREATE_ROLE)]);
pub const GET_ROLES_PAGINATED: GuardChain =
    GuardChain::new(&[Authenticate, Authorize(perm::GET_ROLES_PAGINATED)]);
pub const READ_ROLE: GuardChain = GuardChain::new(&[Authenticate, Authorize(perm::GET_ROLE_BY_ID)]);
pub const UPDATE_ROLE: GuardChain = GuardChain::new(&[Authenticate, Authorize(perm::UPDATE_ROLE)]);
pub const DELETE_ROLE: GuardChain = GuardChain::new(&[Authenticate, Authorize(perm::DELETE_ROLE)]);

// Permissions
pub const LIST_PERMISSIONS: GuardChain =
    GuardChain::new(&[Authenticate, Authorize(perm::GET_ALL_PERMISSIONS)]);
pub const READ_PERMISSION: GuardChain =
    GuardChain::new(&[Authenticate, Authorize(perm::GET_PERMISSION_BY_ID)]);
pub const READ_PERMISSIONS_BY_IDS: GuardChain =
    GuardChain::new(&[Authenticate, Authorize(perm::GET_PERMISSIONS_BY_IDS)]);

/// A protected route and the chain guarding it.
#[derive(Debug, Clone, Copy)]
pub struct RoutePolicy {
    pub method: &'static str,
    pub path: &'static str,
    pub chain: GuardChain,
}

const fn route(method: &'static str, path: &'static str, chain: GuardChain) -> RoutePolicy {
    RoutePolicy {
        method,
        path,
        chain,
    }
}

pub const ROUTES: &[RoutePolicy] = &[
    route("POST", "/api/v1/users", CREATE_USER),
    route("GET", "/api/v1/users", LIST_USERS),
    route("GET", "/api/v1/users/pages", GET_USERS_PAGINATED),
    route("POST", "/api/v1/users/by-ids", READ_USER),
    route("GET", "/api/v1/users/email/{email}", READ_USER),
    route("GET", "/api/v1/users/{id}", READ_USER),
    route("PUT", "/api/v1/users", UPDATE_USER),
    route("DELETE", "/api/v1/users/{id}", DELETE_USER),
    route("POST", "/api/v1/roles", CREATE_ROLE),
    route("GET", "/api/v1/roles/pages", GET_ROLES_PAGINATED),
    route("GET", "/api/v1/roles/{id}", READ_ROLE),
    route("PUT", "/api/v1/roles", UPDATE_ROLE),
    route("DELETE", "/api/v1/roles/{id}", DELETE_ROLE),
    route("GET", "/api/v1/permissions", LIST_PERMISSIONS),
    route("GET", "/api/v1/permissions/{id}", READ_PERMISSION),
    route("POST", "/api/v1/permissions/by-ids", READ_PERMISSIONS_BY_IDS),
];

#[cfg(test)]
mod tests {
    use super::*;
    use usersvc_core::PermissionRegistry;

    #[test]
    fn test_every_required_permission_is_registered() {
        let registry = PermissionRegistry::new();

        for policy in ROUTES {
            for code in policy.chain.required_permissions() {
                assert!(
                    registry.contains(code),
                    "{} {} requires unknown permission {}",
                    policy.method,
                    policy.path,
                    code
                );
            }
        }
    }

    #[test]
    fn test_every_route_authenticates_first() {
        for policy in ROUTES {
            assert_eq!(
                policy.chain.stages().first(),
                Some(&Authenticate),
                "{} {} does not authenticate first",
                policy.method,
                policy.path
            );
        }
    }

    #[test]
    fn test_only_listing_users_skips_authorization() {
        let open: Vec<_> = ROUTES
            .iter()
            .filter(|p| p.chain.required_permissions().next().is_none())
            .map(|p| (p.method, p.path))
            .collect();

        assert_eq!(open, vec![("GET", "/api/v1/users")]);
    }
}
