//! The document store contract.
//!
//! Records are JSON documents addressed by `(collection, id)`. The store can
//! fetch by id, fetch a batch of ids, query by field equality, scan a whole
//! collection in a given order, write, delete and count. It has no native
//! offset/limit windowing: [`DocumentStore::window`] skips and collects over
//! an ordered scan.

use async_trait::async_trait;
use serde_json::Value;

use crate::error::StoreError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDirection {
    Ascending,
    Descending,
}

/// Ordering of a collection scan by one top-level document field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SortOrder {
    pub field: &'static str,
    pub direction: SortDirection,
}

impl SortOrder {
    pub const fn asc(field: &'static str) -> Self {
        Self {
            field,
            direction: SortDirection::Ascending,
        }
    }

    pub const fn desc(field: &'static str) -> Self {
        Self {
            field,
            direction: SortDirection::Descending,
        }
    }
}

#[async_trait]
pub trait DocumentStore: Send + Sync {
    async fn get(&self, collection: &str, id: &str) -> Result<Option<Value>, StoreError>;

    /// Batch lookup. Ids that do not exist are absent from the result.
    async fn get_many(&self, collection: &str, ids: &[String]) -> Result<Vec<Value>, StoreError>;

    /// Documents whose top-level `field` equals `value`, at most `limit`.
    async fn query(
        &self,
        collection: &str,
        field: &str,
        value: &Value,
        limit: usize,
    ) -> Result<Vec<Value>, StoreError>;

    /// Every document of the collection in `order`.
    async fn scan(&self, collection: &str, order: SortOrder) -> Result<Vec<Value>, StoreError>;

    /// Creates or replaces the document.
    async fn put(&self, collection: &str, id: &str, document: Value) -> Result<(), StoreError>;

    /// Removes the document, returning whether it existed.
    async fn delete(&self, collection: &str, id: &str) -> Result<bool, StoreError>;

    /// Number of documents in the collection.
    async fn count_all(&self, collection: &str) -> Result<i64, StoreError>;

    /// `limit` documents after skipping `offset`, in `order`.
    async fn window(
        &self,
        collection: &str,
        order: SortOrder,
        offset: usize,
        limit: usize,
    ) -> Result<Vec<Value>, StoreError> {
        let documents = self.scan(collection, order).await?;
        Ok(documents.into_iter().skip(offset).take(limit).collect())
    }
}
