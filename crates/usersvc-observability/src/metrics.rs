//! Prometheus metrics.
//!
//! [`serve_metrics`] installs the recorder and exposes `/metrics` on a
//! dedicated listener. Until a recorder is installed the `metrics` macros are
//! no-ops, so the helpers below need no guard of their own when observability
//! is disabled.

use std::sync::OnceLock;
use std::time::{Duration, Instant};

use anyhow::Context;
use axum::{
    Router,
    extract::{MatchedPath, Request},
    middleware::Next,
    response::Response,
    routing::get,
};
use metrics::{counter, gauge, histogram};
use metrics_exporter_prometheus::{Matcher, PrometheusBuilder, PrometheusHandle};
use tracing::{error, info};

const HTTP_REQUESTS: &str = "usersvc_http_requests_total";
const HTTP_DURATION: &str = "usersvc_http_request_duration_seconds";
const HTTP_IN_FLIGHT: &str = "usersvc_http_requests_in_flight";
const TOKENS_ISSUED: &str = "usersvc_tokens_issued_total";
const TOKENS_REJECTED: &str = "usersvc_tokens_rejected_total";
const AUTHORIZATION_CHECKS: &str = "usersvc_authorization_checks_total";
const LOGINS: &str = "usersvc_logins_total";
const USERS_CREATED: &str = "usersvc_users_created_total";

// Login runs bcrypt, so the upper buckets reach into seconds.
const DURATION_BUCKETS: &[f64] = &[0.005, 0.01, 0.025, 0.05, 0.1, 0.25, 0.5, 1.0, 2.5];

const UPKEEP_INTERVAL: Duration = Duration::from_secs(5);

static OBSERVABILITY_ENABLED: OnceLock<bool> = OnceLock::new();

/// `OBSERVABILITY_ENABLED`, read once. Anything but `false` or `0` enables it.
pub fn is_observability_enabled() -> bool {
    *OBSERVABILITY_ENABLED.get_or_init(|| {
        std::env::var("OBSERVABILITY_ENABLED")
            .map(|v| !v.eq_ignore_ascii_case("false") && v != "0")
            .unwrap_or(true)
    })
}

fn install_recorder() -> anyhow::Result<PrometheusHandle> {
    PrometheusBuilder::new()
        .set_buckets_for_metric(Matcher::Full(HTTP_DURATION.to_string()), DURATION_BUCKETS)
        .context("Failed to set histogram buckets")?
        .install_recorder()
        .context("Failed to install Prometheus recorder")
}

/// Installs the recorder and serves `/metrics` on `addr` in the background.
///
/// Does nothing when observability is disabled.
pub async fn serve_metrics(addr: &str) -> anyhow::Result<()> {
    if !is_observability_enabled() {
        return Ok(());
    }

    let handle = install_recorder()?;
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind metrics listener on {}", addr))?;

    let upkeep = handle.clone();
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(UPKEEP_INTERVAL);
        loop {
            ticker.tick().await;
            upkeep.run_upkeep();
        }
    });

    let app = Router::new().route("/metrics", get(move || async move { handle.render() }));
    tokio::spawn(async move {
        if let Err(e) = axum::serve(listener, app).await {
            error!(error = %e, "Metrics server stopped");
        }
    });

    info!("Metrics available at http://{}/metrics", addr);
    Ok(())
}

/// Decrements the in-flight gauge when the request finishes or is dropped.
struct InFlight;

impl InFlight {
    fn start() -> Self {
        gauge!(HTTP_IN_FLIGHT).increment(1.0);
        Self
    }
}

impl Drop for InFlight {
    fn drop(&mut self) {
        gauge!(HTTP_IN_FLIGHT).decrement(1.0);
    }
}

/// Counts requests and records their latency by method and matched route.
pub async fn metrics_middleware(req: Request, next: Next) -> Response {
    let method = req.method().as_str().to_owned();
    let route = req
        .extensions()
        .get::<MatchedPath>()
        .map(|p| p.as_str().to_owned())
        .unwrap_or_else(|| "unmatched".to_owned());

    let _in_flight = InFlight::start();
    let start = Instant::now();
    let response = next.run(req).await;
    let elapsed = start.elapsed().as_secs_f64();

    let status = response.status().as_u16().to_string();
    histogram!(HTTP_DURATION, "method" => method.clone(), "route" => route.clone())
        .record(elapsed);
    counter!(HTTP_REQUESTS, "method" => method, "route" => route, "status" => status)
        .increment(1);

    response
}

pub fn track_token_issued() {
    counter!(TOKENS_ISSUED).increment(1);
}

pub fn track_token_rejected() {
    counter!(TOKENS_REJECTED).increment(1);
}

/// One guard decision for `permission`.
pub fn track_authorization_check(allowed: bool, permission: i32) {
    let outcome = if allowed { "allowed" } else { "denied" };
    counter!(
        AUTHORIZATION_CHECKS,
        "outcome" => outcome,
        "permission" => permission.to_string()
    )
    .increment(1);
}

pub fn track_login_success(provider: &'static str) {
    counter!(LOGINS, "provider" => provider, "outcome" => "success").increment(1);
}

pub fn track_login_failure(provider: &'static str, reason: &'static str) {
    counter!(LOGINS, "provider" => provider, "outcome" => "failure", "reason" => reason)
        .increment(1);
}

/// `source` is where the account came from: `api` or `google`.
pub fn track_user_created(source: &'static str) {
    counter!(USERS_CREATED, "source" => source).increment(1);
}
