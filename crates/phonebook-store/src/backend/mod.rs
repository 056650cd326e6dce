//! Key-value primitives the address repository is built on.
//!
//! A backend must make `set_if_absent` and `set_if_present` atomic with
//! respect to concurrent callers on the same key. The repository never
//! emulates them with a read followed by a write.

pub mod memory;
pub mod redis;

pub use memory::MemoryBackend;
pub use redis::{RedisBackend, RedisSettings};

use crate::error::Result;
use async_trait::async_trait;

#[async_trait]
pub trait KvBackend: Send + Sync {
    /// Short label for logs.
    fn name(&self) -> &'static str;

    async fn get(&self, key: &str) -> Result<Option<String>>;

    /// Writes only when `key` is absent. Returns whether the write happened.
    async fn set_if_absent(&self, key: &str, value: &str) -> Result<bool>;

    /// Writes only when `key` already exists. Returns whether the write happened.
    async fn set_if_present(&self, key: &str, value: &str) -> Result<bool>;

    /// Returns the number of keys removed (0 or 1).
    async fn delete(&self, key: &str) -> Result<u64>;
}
