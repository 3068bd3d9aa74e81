//! # usersvc models
//!
//! Domain models and DTOs shared by the HTTP layer, the document store
//! repositories and the CLI.
//!
//! # Modules
//!
//! - [`ids`]: typed UUID identifiers
//! - [`users`]: stored users, API responses and requests
//! - [`roles`]: stored roles, resolved roles and requests
//! - [`auth`]: login requests and responses
//! - [`permissions`]: permission lookup requests
//! - [`common`]: responses shared across resources

pub mod auth;
pub mod common;
pub mod ids;
pub mod permissions;
pub mod roles;
pub mod users;

// Re-export commonly used types at crate root for convenience
pub use auth::{LoginResponse, LoginWithEmailRequest, LoginWithGoogleRequest};
pub use common::DeleteResponse;
pub use ids::{RoleId, UserId};
pub use permissions::PermissionsByIdsRequest;
pub use roles::{ADMIN_ROLE, CreateRoleDto, DEFAULT_USER_ROLE, Role, RoleDocument, UpdateRoleDto};
pub use usersvc_core::Permission;
pub use users::{CreateUserDto, UpdateUserDto, User, UserResponse, UsersByIdsRequest};
