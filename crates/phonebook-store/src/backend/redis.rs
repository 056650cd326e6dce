use super::KvBackend;
use crate::error::{Result, StoreError};
use async_trait::async_trait;
use fred::clients::Pool;
use fred::prelude::*;
use fred::types::{Builder, SetOptions};
use std::time::Duration;

/// Connection parameters for the Redis namespace holding addresses.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RedisSettings {
    pub host: String,
    pub port: u16,
    pub username: Option<String>,
    pub password: Option<String>,
    pub database: u8,
    pub pool_size: usize,
    pub connect_timeout: Duration,
    pub command_timeout: Duration,
}

impl Default for RedisSettings {
    fn default() -> Self {
        Self {
            host: "localhost".to_string(),
            port: 6379,
            username: None,
            password: None,
            database: 0,
            pool_size: 4,
            connect_timeout: Duration::from_secs(5),
            command_timeout: Duration::from_secs(5),
        }
    }
}

impl RedisSettings {
    /// Credential-free URL; username and password are applied to the
    /// client config separately so they never need escaping.
    pub fn url(&self) -> String {
        let host = if self.host.contains(':') && !self.host.starts_with('[') {
            format!("[{}]", self.host)
        } else {
            self.host.clone()
        };
        format!("redis://{}:{}/{}", host, self.port, self.database)
    }

    fn client_config(&self) -> Result<Config> {
        if self.host.trim().is_empty() {
            return Err(StoreError::InvalidSettings("redis host is empty".to_string()));
        }
        if self.pool_size == 0 {
            return Err(StoreError::InvalidSettings(
                "redis pool size must be at least 1".to_string(),
            ));
        }
        let mut config = Config::from_url(&self.url())?;
        config.username = self.username.clone();
        config.password = self.password.clone();
        Ok(config)
    }
}

pub struct RedisBackend {
    pool: Pool,
}

impl RedisBackend {
    /// Builds the pool and waits for the initial connections.
    ///
    /// Commands are sent once: a failed command surfaces to the caller
    /// instead of being replayed behind its back.
    pub async fn connect(settings: &RedisSettings) -> Result<Self> {
        let config = settings.client_config()?;
        let connect_timeout = settings.connect_timeout;
        let command_timeout = settings.command_timeout;

        let pool = Builder::from_config(config)
            .with_connection_config(|cfg| {
                cfg.connection_timeout = connect_timeout;
                cfg.internal_command_timeout = command_timeout;
                cfg.max_command_attempts = 1;
            })
            .with_performance_config(|cfg| {
                cfg.default_command_timeout = command_timeout;
            })
            .set_policy(ReconnectPolicy::new_exponential(0, 100, 2_000, 2))
            .build_pool(settings.pool_size)?;

        pool.init().await?;
        tracing::debug!(
            host = %settings.host,
            port = settings.port,
            database = settings.database,
            pool_size = settings.pool_size,
            "redis pool connected"
        );

        Ok(Self { pool })
    }
}

#[async_trait]
impl KvBackend for RedisBackend {
    fn name(&self) -> &'static str {
        "redis"
    }

    async fn get(&self, key: &str) -> Result<Option<String>> {
        let value: Option<String> = self.pool.get(key).await?;
        Ok(value)
    }

    async fn set_if_absent(&self, key: &str, value: &str) -> Result<bool> {
        // SET .. NX replies OK on write and nil when the key exists
        let reply: Option<String> = self
            .pool
            .set(key, value, None, Some(SetOptions::NX), false)
            .await?;
        Ok(reply.is_some())
    }

    async fn set_if_present(&self, key: &str, value: &str) -> Result<bool> {
        let reply: Option<String> = self
            .pool
            .set(key, value, None, Some(SetOptions::XX), false)
            .await?;
        Ok(reply.is_some())
    }

    async fn delete(&self, key: &str) -> Result<u64> {
        let removed: i64 = self.pool.del(key).await?;
        Ok(u64::try_from(removed).unwrap_or(0))
    }
}
