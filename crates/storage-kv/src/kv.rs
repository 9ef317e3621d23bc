use async_trait::async_trait;
use folioadvisor_core::Result;

/// The handful of primitives the repositories need from a key-value server.
///
/// Every method is atomic on its own; nothing here spans more than one key.
#[async_trait]
pub trait KeyValueStore: Send + Sync {
    async fn get(&self, key: &str) -> Result<Option<String>>;

    async fn set(&self, key: &str, value: &str) -> Result<()>;

    /// Writes only if `key` is absent. Returns whether the write happened.
    async fn set_nx(&self, key: &str, value: &str) -> Result<bool>;

    /// Overwrites `key` only if it is present. Returns whether the write happened.
    async fn set_existing(&self, key: &str, value: &str) -> Result<bool>;

    /// Returns whether the key existed.
    async fn del(&self, key: &str) -> Result<bool>;

    /// Increments the integer at `key` (absent counts as 0) and returns the new value.
    async fn incr(&self, key: &str) -> Result<i64>;

    async fn sadd(&self, key: &str, member: &str) -> Result<()>;

    async fn srem(&self, key: &str, member: &str) -> Result<()>;

    async fn smembers(&self, key: &str) -> Result<Vec<String>>;
}
