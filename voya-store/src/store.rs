use async_trait::async_trait;

/// Failures reaching or decoding the backing store. The search engine
/// recovers from every variant by recomputing, so none of these escape it.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("store backend error: {0}")]
    Backend(String),

    #[error("stored payload could not be decoded: {0}")]
    Serialization(String),
}

impl From<redis::RedisError> for StoreError {
    fn from(err: redis::RedisError) -> Self {
        StoreError::Backend(err.to_string())
    }
}

/// Byte-level key/value store with per-entry TTL.
///
/// Implementations are best-effort: callers must treat any error as a cache
/// miss, never as a failed search.
#[async_trait]
pub trait ResultStore: Send + Sync {
    async fn get(&self, key: &str) -> Result<Option<Vec<u8>>, StoreError>;

    async fn put(&self, key: &str, value: Vec<u8>, ttl_seconds: u64) -> Result<(), StoreError>;
}
