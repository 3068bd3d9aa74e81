//! Declarative guard chains.
//!
//! A route declares the checks it needs as a [`GuardChain`], an ordered list
//! of [`Guard`] stages. Each stage sees the identity produced by the stages
//! before it. An `Authorize` stage with no identity upstream is a wiring
//! mistake and fails closed with a 500.
//!
//! ```ignore
//! const CREATE_USER: GuardChain =
//!     GuardChain::new(&[Guard::Authenticate, Guard::Authorize(permissions::CREATE_USER)]);
//!
//! Router::new().route("/", post(create_user).route_layer(guarded!(state, CREATE_USER)));
//! ```

use anyhow::anyhow;
use axum::{
    extract::{Request, State},
    http::HeaderMap,
    middleware::Next,
    response::Response,
};

use usersvc_auth::TokenService;
use usersvc_core::{AppError, PermissionId};

use super::auth::{AuthUser, authenticate, authorize};
use crate::state::AppState;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Guard {
    /// Requires a valid bearer token.
    Authenticate,
    /// Requires the authenticated caller to hold the permission code.
    Authorize(PermissionId),
}

impl Guard {
    fn check(
        self,
        identity: Option<AuthUser>,
        headers: &HeaderMap,
        tokens: &TokenService,
    ) -> Result<AuthUser, AppError> {
        match self {
            Guard::Authenticate => authenticate(headers, tokens),
            Guard::Authorize(permission) => {
                let user = identity.ok_or_else(|| {
                    AppError::internal(anyhow!(
                        "Authorize({}) guard ran without an authenticated identity",
                        permission
                    ))
                })?;
                authorize(user, permission)
            }
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GuardChain {
    stages: &'static [Guard],
}

impl GuardChain {
    pub const fn new(stages: &'static [Guard]) -> Self {
        Self { stages }
    }

    pub fn stages(&self) -> &'static [Guard] {
        self.stages
    }

    /// Permission codes this chain checks for.
    pub fn required_permissions(&self) -> impl Iterator<Item = PermissionId> + '_ {
        self.stages.iter().filter_map(|guard| match guard {
            Guard::Authorize(permission) => Some(*permission),
            Guard::Authenticate => None,
        })
    }

    /// Runs every stage in order, stopping at the first rejection.
    ///
    /// Returns the identity established by the chain, if any stage produced
    /// one.
    pub fn run(
        &self,
        headers: &HeaderMap,
        tokens: &TokenService,
    ) -> Result<Option<AuthUser>, AppError> {
        self.stages
            .iter()
            .try_fold(None, |identity, guard| {
                guard.check(identity, headers, tokens).map(Some)
            })
    }
}

/// State handed to [`enforce_guards`] for a single route.
#[derive(Clone)]
pub struct GuardLayerState {
    tokens: TokenService,
    chain: GuardChain,
}

impl GuardLayerState {
    pub fn new(state: &AppState, chain: GuardChain) -> Self {
        Self {
            tokens: state.tokens.clone(),
            chain,
        }
    }
}

pub async fn enforce_guards(
    State(guard): State<GuardLayerState>,
    mut req: Request,
    next: Next,
) -> Result<Response, AppError> {
    if let Some(user) = guard.chain.run(req.headers(), &guard.tokens)? {
        req.extensions_mut().insert(user);
    }

    Ok(next.run(req).await)
}

/// Builds the route layer enforcing a [`GuardChain`].
#[macro_export]
macro_rules! guarded {
    ($state:expr, $chain:expr) => {
        ::axum::middleware::from_fn_with_state(
            $crate::middleware::guard::GuardLayerState::new(&$state, $chain),
            $crate::middleware::guard::enforce_guards,
        )
    };
}
