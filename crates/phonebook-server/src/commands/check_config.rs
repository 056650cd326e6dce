use crate::commands::print_json;
use anyhow::Result;
use phonebook_config::{AppConfig, StoreBackend};
use serde::Serialize;

const REDACTED: &str = "********";

#[derive(Debug, Serialize)]
struct ResolvedConfigDto<'a> {
    bind: String,
    endpoint_prefix: &'a str,
    store_backend: StoreBackend,
    redis: ResolvedRedisDto<'a>,
}

#[derive(Debug, Serialize)]
struct ResolvedRedisDto<'a> {
    host: &'a str,
    port: u16,
    username: Option<&'a str>,
    password: Option<&'static str>,
    database: u8,
    pool_size: usize,
    connect_timeout_ms: u64,
    command_timeout_ms: u64,
}

pub fn check_config(config: &AppConfig) -> Result<()> {
    print_json(&resolved(config))
}

fn resolved(config: &AppConfig) -> ResolvedConfigDto<'_> {
    ResolvedConfigDto {
        bind: config.server.bind.to_string(),
        endpoint_prefix: &config.server.endpoint_prefix,
        store_backend: config.store.backend,
        redis: ResolvedRedisDto {
            host: &config.redis.host,
            port: config.redis.port,
            username: config.redis.username.as_deref(),
            password: config.redis.password.as_ref().map(|_| REDACTED),
            database: config.redis.database,
            pool_size: config.redis.pool_size,
            connect_timeout_ms: config.redis.connect_timeout_ms,
            command_timeout_ms: config.redis.command_timeout_ms,
        },
    }
}
