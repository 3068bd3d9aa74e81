//! # usersvc observability
//!
//! - [`logging`]: tracing subscriber setup and the request logging middleware
//! - [`metrics`]: Prometheus exporter, HTTP metrics middleware and business
//!   counters for tokens, logins and authorization decisions
//!
//! Observability is on by default and can be switched off at runtime with
//! `OBSERVABILITY_ENABLED=false`. When off, logging falls back to a plain
//! console subscriber and every metric helper is a no-op.
//!
//! # Example
//!
//! ```no_run
//! use usersvc_observability::{init_tracing, serve_metrics};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     init_tracing();
//!     serve_metrics("0.0.0.0:9090").await?;
//!     // ... application code ...
//!     Ok(())
//! }
//! ```

pub mod logging;
pub mod metrics;

pub use self::logging::{init_basic_console_logging, init_tracing, logging_middleware};
pub use self::metrics::{
    is_observability_enabled, metrics_middleware, serve_metrics, track_authorization_check,
    track_login_failure, track_login_success, track_token_issued, track_token_rejected,
    track_user_created,
};
