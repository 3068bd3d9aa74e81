//! # usersvc store
//!
//! Persistence for the user service.
//!
//! - [`document`]: the [`DocumentStore`] contract (get, batch get, query by
//!   field, ordered scan, put, delete, count)
//! - [`memory`]: [`InMemoryDocumentStore`] for tests and local development
//! - [`postgres`]: [`PostgresDocumentStore`], one JSONB table in PostgreSQL
//! - [`repositories`]: typed user and role repositories over any store
//!
//! # Example
//!
//! ```ignore
//! use std::sync::Arc;
//! use usersvc_store::{InMemoryDocumentStore, UserRepository};
//!
//! let store = Arc::new(InMemoryDocumentStore::new());
//! let users = UserRepository::new(store);
//! let found = users.find_by_email("ana@example.com").await?;
//! ```

pub mod document;
pub mod error;
pub mod memory;
pub mod postgres;
pub mod repositories;

// Re-export commonly used types at crate root
pub use document::{DocumentStore, SortDirection, SortOrder};
pub use error::StoreError;
pub use memory::InMemoryDocumentStore;
pub use postgres::PostgresDocumentStore;
pub use repositories::{RoleRepository, UserRepository};
