pub mod backend;
pub mod error;
pub mod repo;

use crate::backend::{KvBackend, MemoryBackend, RedisBackend, RedisSettings};
use crate::error::Result;
use std::sync::Arc;

/// Handle to the key-value namespace holding `canonical phone -> address`.
///
/// Cloning is cheap; every clone talks to the same backend.
#[derive(Clone)]
pub struct Store {
    backend: Arc<dyn KvBackend>,
}

impl Store {
    pub async fn connect_redis(settings: &RedisSettings) -> Result<Self> {
        let backend = RedisBackend::connect(settings).await?;
        Ok(Self::with_backend(Arc::new(backend)))
    }

    pub fn in_memory() -> Self {
        Self::with_backend(Arc::new(MemoryBackend::new()))
    }

    pub fn with_backend(backend: Arc<dyn KvBackend>) -> Self {
        Self { backend }
    }

    pub fn backend_name(&self) -> &'static str {
        self.backend.name()
    }

    pub fn addresses(&self) -> repo::AddressesRepo<'_> {
        repo::AddressesRepo::new(self.backend.as_ref())
    }
}
