use std::sync::Arc;

use async_trait::async_trait;
use serde_json::Value;
use tracing::instrument;

use usersvc_core::PagedCollection;
use usersvc_models::{RoleDocument, RoleId};

use super::{decode, decode_all, encode};
use crate::document::{DocumentStore, SortOrder};
use crate::error::StoreError;

pub const ROLES: &str = "roles";

pub const ROLE_ORDER: SortOrder = SortOrder::asc("code");

#[derive(Clone)]
pub struct RoleRepository {
    store: Arc<dyn DocumentStore>,
}

impl RoleRepository {
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self { store }
    }

    #[instrument(skip(self))]
    pub async fn find_by_id(&self, id: RoleId) -> Result<Option<RoleDocument>, StoreError> {
        self.store
            .get(ROLES, &id.to_string())
            .await?
            .map(|doc| decode(ROLES, doc))
            .transpose()
    }

    #[instrument(skip(self))]
    pub async fn find_by_code(&self, code: &str) -> Result<Option<RoleDocument>, StoreError> {
        let documents = self
            .store
            .query(ROLES, "code", &Value::String(code.to_string()), 1)
            .await?;

        documents
            .into_iter()
            .next()
            .map(|doc| decode(ROLES, doc))
            .transpose()
    }

    /// Roles for the given ids in one lookup. Unknown ids are skipped.
    #[instrument(skip(self, ids), fields(count = ids.len()))]
    pub async fn find_by_ids(&self, ids: &[RoleId]) -> Result<Vec<RoleDocument>, StoreError> {
        let keys: Vec<String> = ids.iter().map(RoleId::to_string).collect();
        let documents = self.store.get_many(ROLES, &keys).await?;
        decode_all(ROLES, documents)
    }

    #[instrument(skip(self))]
    pub async fn find_all(&self) -> Result<Vec<RoleDocument>, StoreError> {
        let documents = self.store.scan(ROLES, ROLE_ORDER).await?;
        decode_all(ROLES, documents)
    }

    #[instrument(skip(self, role), fields(role_id = %role.id, code = %role.code))]
    pub async fn save(&self, role: &RoleDocument) -> Result<(), StoreError> {
        self.store
            .put(ROLES, &role.id.to_string(), encode(role)?)
            .await
    }

    #[instrument(skip(self))]
    pub async fn delete(&self, id: RoleId) -> Result<bool, StoreError> {
        self.store.delete(ROLES, &id.to_string()).await
    }

    pub async fn count(&self) -> Result<i64, StoreError> {
        self.store.count_all(ROLES).await
    }
}

#[async_trait]
impl PagedCollection for RoleRepository {
    type Item = RoleDocument;
    type Error = StoreError;

    async fn window(&self, offset: usize, limit: usize) -> Result<Vec<RoleDocument>, StoreError> {
        let documents = self.store.window(ROLES, ROLE_ORDER, offset, limit).await?;
        decode_all(ROLES, documents)
    }

    async fn count_all(&self) -> Result<i64, StoreError> {
        self.count().await
    }
}
