use std::sync::Arc;

use async_trait::async_trait;
use serde_json::Value;
use tracing::instrument;

use usersvc_core::PagedCollection;
use usersvc_models::{User, UserId};

use super::{decode, decode_all, encode};
use crate::document::{DocumentStore, SortOrder};
use crate::error::StoreError;

pub const USERS: &str = "users";

/// Newest users first.
pub const USER_ORDER: SortOrder = SortOrder::desc("createdAt");

#[derive(Clone)]
pub struct UserRepository {
    store: Arc<dyn DocumentStore>,
}

impl UserRepository {
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self { store }
    }

    #[instrument(skip(self))]
    pub async fn find_by_id(&self, id: UserId) -> Result<Option<User>, StoreError> {
        self.store
            .get(USERS, &id.to_string())
            .await?
            .map(|doc| decode(USERS, doc))
            .transpose()
    }

    #[instrument(skip(self))]
    pub async fn find_by_email(&self, email: &str) -> Result<Option<User>, StoreError> {
        let documents = self
            .store
            .query(USERS, "email", &Value::String(email.to_string()), 1)
            .await?;

        documents
            .into_iter()
            .next()
            .map(|doc| decode(USERS, doc))
            .transpose()
    }

    /// Users for the given ids in one lookup. Unknown ids are skipped.
    #[instrument(skip(self, ids), fields(count = ids.len()))]
    pub async fn find_by_ids(&self, ids: &[UserId]) -> Result<Vec<User>, StoreError> {
        let keys: Vec<String> = ids.iter().map(UserId::to_string).collect();
        let documents = self.store.get_many(USERS, &keys).await?;
        decode_all(USERS, documents)
    }

    #[instrument(skip(self))]
    pub async fn find_all(&self) -> Result<Vec<User>, StoreError> {
        let documents = self.store.scan(USERS, USER_ORDER).await?;
        decode_all(USERS, documents)
    }

    /// Creates or replaces the user.
    #[instrument(skip(self, user), fields(user_id = %user.id))]
    pub async fn save(&self, user: &User) -> Result<(), StoreError> {
        self.store
            .put(USERS, &user.id.to_string(), encode(user)?)
            .await
    }

    #[instrument(skip(self))]
    pub async fn delete(&self, id: UserId) -> Result<bool, StoreError> {
        self.store.delete(USERS, &id.to_string()).await
    }

    pub async fn count(&self) -> Result<i64, StoreError> {
        self.store.count_all(USERS).await
    }
}

#[async_trait]
impl PagedCollection for UserRepository {
    type Item = User;
    type Error = StoreError;

    async fn window(&self, offset: usize, limit: usize) -> Result<Vec<User>, StoreError> {
        let documents = self.store.window(USERS, USER_ORDER, offset, limit).await?;
        decode_all(USERS, documents)
    }

    async fn count_all(&self) -> Result<i64, StoreError> {
        self.count().await
    }
}
