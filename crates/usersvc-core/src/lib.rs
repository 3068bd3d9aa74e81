//! # usersvc core
//!
//! Core types and engines shared by every part of the user service.
//!
//! - [`errors`]: application error type with HTTP response conversion
//! - [`permissions`]: the permission catalog and its read-only registry
//! - [`hydration`]: batch resolution of ID references
//! - [`pagination`]: page requests, windowing and navigation links
//! - [`password`]: bcrypt password hashing and verification
//! - [`serde`]: fixed-width timestamp serialization for stored documents
//!
//! # Example
//!
//! ```ignore
//! use usersvc_core::{AppError, PermissionRegistry, Pageable};
//!
//! let registry = PermissionRegistry::shared();
//! let found = registry.by_ids(&[301, 999]);
//! assert_eq!(found.len(), 1);
//!
//! let pageable = Pageable::parse(Some("0"), Some("-5"), None);
//! assert_eq!((pageable.page, pageable.size), (1, 10));
//! ```

pub mod errors;
pub mod hydration;
pub mod pagination;
pub mod password;
pub mod permissions;
pub mod serde;

// Re-export commonly used types at crate root
pub use errors::AppError;
pub use hydration::{Hydrated, hydrate, hydrate_with};
pub use pagination::{
    LinkBase, PageInfo, PageLinks, PagedCollection, Pageable, PageableParams, PaginationResponse,
    paginate,
};
pub use password::{hash_password, password_matches, verify_password};
pub use permissions::{Permission, PermissionId, PermissionRegistry};
