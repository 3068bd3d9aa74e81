//! Typed repositories over a [`DocumentStore`](crate::DocumentStore).

pub mod roles;
pub mod users;

pub use roles::RoleRepository;
pub use users::UserRepository;

use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::error::StoreError;

pub(crate) fn decode<T>(collection: &str, document: Value) -> Result<T, StoreError>
where
    T: DeserializeOwned,
{
    let id = document
        .get("id")
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_string();

    serde_json::from_value(document).map_err(|source| StoreError::Decode {
        collection: collection.to_string(),
        id,
        source,
    })
}

pub(crate) fn decode_all<T>(collection: &str, documents: Vec<Value>) -> Result<Vec<T>, StoreError>
where
    T: DeserializeOwned,
{
    documents
        .into_iter()
        .map(|document| decode(collection, document))
        .collect()
}

pub(crate) fn encode<T>(entity: &T) -> Result<Value, StoreError>
where
    T: Serialize,
{
    serde_json::to_value(entity).map_err(StoreError::Encode)
}
