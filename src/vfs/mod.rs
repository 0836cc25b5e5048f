pub mod memory_kv_store;
pub mod seed;

use std::future::Future;
use std::time::Duration;

use serde::de::DeserializeOwned;
use serde::Serialize;
use thiserror::Error;

pub use memory_kv_store::MemoryKvStore;

#[derive(Error, Debug)]
pub enum KvError {
    #[error("Malformed value under {key}: {reason}")]
    Serialization { key: String, reason: String },

    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),
}

/// Key-value collaborator holding node/profile collections and the
/// subscription cache.
pub trait KvStore {
    fn get(&self, key: &str) -> impl Future<Output = Result<Option<String>, KvError>>;
    /// Stores `value`; with a `ttl` the entry disappears once it elapses.
    fn put(
        &self,
        key: &str,
        value: String,
        ttl: Option<Duration>,
    ) -> impl Future<Output = Result<(), KvError>>;
    fn delete(&self, key: &str) -> impl Future<Output = Result<(), KvError>>;
}

/// Reads and deserializes a JSON value. A missing key is `Ok(None)`.
pub async fn get_json<T, K>(store: &K, key: &str) -> Result<Option<T>, KvError>
where
    T: DeserializeOwned,
    K: KvStore,
{
    match store.get(key).await? {
        Some(raw) => serde_json::from_str(&raw)
            .map(Some)
            .map_err(|e| KvError::Serialization {
                key: key.to_string(),
                reason: e.to_string(),
            }),
        None => Ok(None),
    }
}

/// Serializes `value` as JSON and stores it without expiry.
pub async fn put_json<T, K>(store: &K, key: &str, value: &T) -> Result<(), KvError>
where
    T: Serialize,
    K: KvStore,
{
    let raw = serde_json::to_string(value).map_err(|e| KvError::Serialization {
        key: key.to_string(),
        reason: e.to_string(),
    })?;
    store.put(key, raw, None).await
}
