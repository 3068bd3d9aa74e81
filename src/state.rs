use std::sync::Arc;

use anyhow::Context;
use tracing::{info, warn};

use usersvc_auth::{GoogleIdentityProvider, IdentityProvider, TokenService};
use usersvc_config::{CorsConfig, IdentityConfig, JwtConfig, StoreBackend, StoreConfig};
use usersvc_core::PermissionRegistry;
use usersvc_store::{
    DocumentStore, InMemoryDocumentStore, PostgresDocumentStore, RoleRepository, UserRepository,
};

/// Shared handles injected into every handler and guard.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn DocumentStore>,
    pub registry: Arc<PermissionRegistry>,
    pub tokens: TokenService,
    pub identity: Arc<dyn IdentityProvider>,
    pub cors_config: CorsConfig,
}

impl AppState {
    pub fn new(
        store: Arc<dyn DocumentStore>,
        jwt_config: JwtConfig,
        identity: Arc<dyn IdentityProvider>,
        cors_config: CorsConfig,
    ) -> Self {
        Self {
            store,
            registry: PermissionRegistry::shared(),
            tokens: TokenService::new(jwt_config),
            identity,
            cors_config,
        }
    }

    pub fn users(&self) -> UserRepository {
        UserRepository::new(self.store.clone())
    }

    pub fn roles(&self) -> RoleRepository {
        RoleRepository::new(self.store.clone())
    }
}

pub async fn init_store(config: &StoreConfig) -> anyhow::Result<Arc<dyn DocumentStore>> {
    match config.backend {
        StoreBackend::Memory => {
            warn!("Using the in-memory document store, data will not survive a restart");
            Ok(Arc::new(InMemoryDocumentStore::new()))
        }
        StoreBackend::Postgres => {
            let url = config
                .database_url
                .as_deref()
                .context("DATABASE_URL must be set when STORE_BACKEND=postgres")?;
            let store = PostgresDocumentStore::connect(url, config.max_connections)
                .await
                .context("Failed to connect to the document store")?;
            info!("Connected to PostgreSQL document store");
            Ok(Arc::new(store))
        }
    }
}

pub async fn init_app_state() -> anyhow::Result<AppState> {
    let store = init_store(&StoreConfig::from_env()).await?;

    let jwt_config = JwtConfig::from_env();
    if jwt_config.secret().is_none() {
        warn!("JWT_SECRET is not set, token issuance and protected routes will fail");
    }

    let identity = GoogleIdentityProvider::new(&IdentityConfig::from_env())
        .map_err(|e| e.error.context("Failed to build identity provider client"))?;

    Ok(AppState::new(
        store,
        jwt_config,
        Arc::new(identity),
        CorsConfig::from_env(),
    ))
}
