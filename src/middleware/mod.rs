//! Request guards.
//!
//! Access control is declared per route as a [`GuardChain`](guard::GuardChain)
//! and enforced by a route layer before the handler runs.
//!
//! # Modules
//!
//! - [`auth`]: bearer token authentication, permission checks, `AuthUser`
//! - [`guard`]: guard stages, chains and the enforcing middleware
//! - [`policy`]: the chain attached to each protected route
//!
//! # Flow
//!
//! 1. Client sends `Authorization: Bearer <token>`
//! 2. `Authenticate` verifies the token and yields the caller's claims
//! 3. `Authorize(code)` checks the code against the token's `permissionIds`
//! 4. The identity is stored in request extensions and the handler runs
//!
//! ```ignore
//! async fn create_user(
//!     State(state): State<AppState>,
//!     auth_user: AuthUser,
//!     ValidatedJson(dto): ValidatedJson<CreateUserDto>,
//! ) -> Result<Json<UserResponse>, AppError> {
//!     // Only reached when the policy passed
//! }
//! ```

pub mod auth;
pub mod guard;
pub mod policy;
