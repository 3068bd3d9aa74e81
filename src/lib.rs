//! # usersvc
//!
//! A REST API for user management with role-based access control, built on
//! Axum and a JSON document store.
//!
//! ## Overview
//!
//! - **Authentication**: social login through an external identity provider,
//!   or email and password, both issuing a signed bearer token
//! - **Authorization**: every protected route requires one numeric permission
//!   code from a fixed catalog; roles bundle permission codes and users hold
//!   roles
//! - **Users and roles**: CRUD, batch lookups and paginated listings with
//!   navigation links
//!
//! ## Architecture
//!
//! ```text
//! src/
//! ├── middleware/       # Guard chains, authentication, authorization
//! ├── modules/          # Feature modules
//! │   ├── auth/        # Login flows and token issuance
//! │   ├── users/       # User management
//! │   ├── roles/       # Role management
//! │   └── permissions/ # Permission catalog lookups
//! └── utils/            # Request extractors
//! ```
//!
//! Each feature module follows the same layout:
//!
//! - `mod.rs`: module exports
//! - `controller.rs`: HTTP handlers with OpenAPI annotations
//! - `service.rs`: business logic
//! - `router.rs`: routes and the guard chain attached to each
//!
//! Shared pieces live in workspace crates:
//!
//! | Crate | Contents |
//! |-------|----------|
//! | `usersvc-core` | errors, permission registry, pagination, hydration, passwords |
//! | `usersvc-config` | environment-driven configuration |
//! | `usersvc-auth` | token service, claims, identity provider client |
//! | `usersvc-models` | domain models and DTOs |
//! | `usersvc-store` | document store trait, in-memory and PostgreSQL backends, repositories |
//! | `usersvc-observability` | tracing setup and Prometheus metrics |
//!
//! ## Tokens
//!
//! Tokens are HS256-signed and carry the issuer, the user ID as subject, an
//! expiry, and a snapshot of the user's role codes and permission codes taken
//! at login. Permission changes apply from the next login.
//!
//! ## Errors
//!
//! All errors are returned as JSON:
//!
//! ```json
//! { "error": "Access denied. Missing required permission: 501" }
//! ```
//!
//! | Status | Meaning |
//! |--------|---------|
//! | 400 | Malformed input or identifier, duplicate email or role code |
//! | 401 | Missing, malformed, invalid or expired token, bad credentials |
//! | 403 | Valid token lacking the required permission |
//! | 404 | Entity not found |
//! | 422 | Body failed validation |
//! | 500 | Store failure or missing configuration |
//! | 502 | Identity provider unavailable |
//!
//! ## API Documentation
//!
//! - Swagger UI at `/swagger-ui`
//! - Scalar at `/scalar`
//! - OpenAPI JSON at `/api-docs/openapi.json`

pub mod docs;
pub mod middleware;
pub mod modules;
pub mod router;
pub mod state;
pub mod utils;
pub mod validator;

// Re-export workspace crates for convenience
pub use usersvc_auth;
pub use usersvc_config;
pub use usersvc_core;
pub use usersvc_models;
pub use usersvc_store;
