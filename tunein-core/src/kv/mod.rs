//! Key-value port for notification subscriptions
//!
//! Values are plain strings, sets hold string members. Implementations are
//! treated as remote dependencies: every call may fail or be slow.

mod memory;
mod redis_store;

pub use self::memory::MemoryKvStore;
pub use self::redis_store::RedisKvStore;

use async_trait::async_trait;

use crate::Result;

#[async_trait]
pub trait KvStore: Send + Sync {
    async fn get(&self, key: &str) -> Result<Option<String>>;

    async fn set(&self, key: &str, value: &str) -> Result<()>;

    /// Removing a missing key is not an error
    async fn delete(&self, key: &str) -> Result<()>;

    async fn set_add(&self, key: &str, member: &str) -> Result<()>;

    async fn set_remove(&self, key: &str, member: &str) -> Result<()>;

    /// Members of the set at `key`, empty when the set does not exist
    async fn set_members(&self, key: &str) -> Result<Vec<String>>;
}
