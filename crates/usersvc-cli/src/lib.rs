//! # usersvc CLI
//!
//! Administrative tasks run against the document store outside the HTTP
//! service: bootstrapping the built-in roles, creating an administrator and
//! seeding fake users for development.
//!
//! ```ignore
//! use usersvc_cli::{bootstrap, seeder};
//!
//! let store: Arc<dyn DocumentStore> = Arc::new(PostgresDocumentStore::connect(url, 5).await?);
//! bootstrap::bootstrap_roles(store.clone()).await?;
//! seeder::seed_users(store, 100, "password123").await?;
//! ```

pub mod bootstrap;
pub mod seeder;
