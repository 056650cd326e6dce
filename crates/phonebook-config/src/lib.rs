use std::env;
use std::fs;
use std::net::SocketAddr;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

const APP_DIR: &str = "phonebook";
const CONFIG_FILENAME: &str = "config.toml";

pub const DEFAULT_BIND: &str = "127.0.0.1:8000";
pub const DEFAULT_ENDPOINT_PREFIX: &str = "/addr_by_phone";
pub const DEFAULT_REDIS_HOST: &str = "localhost";
pub const DEFAULT_REDIS_PORT: u16 = 6379;
pub const DEFAULT_REDIS_USERNAME: &str = "default";
pub const DEFAULT_POOL_SIZE: usize = 4;
pub const DEFAULT_TIMEOUT_MS: u64 = 5_000;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub store: StoreConfig,
    pub redis: RedisConfig,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub bind: SocketAddr,
    pub endpoint_prefix: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreConfig {
    pub backend: StoreBackend,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StoreBackend {
    Redis,
    Memory,
}

impl StoreBackend {
    fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "redis" => Some(StoreBackend::Redis),
            "memory" => Some(StoreBackend::Memory),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RedisConfig {
    pub host: String,
    pub port: u16,
    pub username: Option<String>,
    pub password: Option<String>,
    pub database: u8,
    pub pool_size: usize,
    pub connect_timeout_ms: u64,
    pub command_timeout_ms: u64,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            server: ServerConfig {
                bind: SocketAddr::from(([127, 0, 0, 1], 8000)),
                endpoint_prefix: DEFAULT_ENDPOINT_PREFIX.to_string(),
            },
            store: StoreConfig {
                backend: StoreBackend::Redis,
            },
            redis: RedisConfig {
                host: DEFAULT_REDIS_HOST.to_string(),
                port: DEFAULT_REDIS_PORT,
                username: Some(DEFAULT_REDIS_USERNAME.to_string()),
                password: None,
                database: 0,
                pool_size: DEFAULT_POOL_SIZE,
                connect_timeout_ms: DEFAULT_TIMEOUT_MS,
                command_timeout_ms: DEFAULT_TIMEOUT_MS,
            },
        }
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing home directory")]
    MissingHomeDir,
    #[error("invalid config path: {0}")]
    InvalidConfigPath(PathBuf),
    #[error("config file not found: {0}")]
    MissingConfigFile(PathBuf),
    #[error("config file permissions too permissive: {0}")]
    InsecurePermissions(PathBuf),
    #[error("invalid endpoint_prefix value: {0:?}")]
    InvalidEndpointPrefix(String),
    #[error("invalid redis pool_size value: {0}")]
    InvalidPoolSize(usize),
    #[error("invalid redis {field} value: {value} (must be greater than zero)")]
    InvalidTimeout { field: &'static str, value: u64 },
    #[error("invalid value for environment variable {name}: {value:?}")]
    InvalidEnv { name: &'static str, value: String },
    #[error("failed to read config file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse config file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

pub type Result<T> = std::result::Result<T, ConfigError>;

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct ConfigFile {
    server: Option<ServerFile>,
    store: Option<StoreFile>,
    redis: Option<RedisFile>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct ServerFile {
    bind: Option<SocketAddr>,
    endpoint_prefix: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct StoreFile {
    backend: Option<StoreBackend>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct RedisFile {
    host: Option<String>,
    port: Option<u16>,
    username: Option<String>,
    password: Option<String>,
    database: Option<u8>,
    pool_size: Option<usize>,
    connect_timeout_ms: Option<u64>,
    command_timeout_ms: Option<u64>,
}

/// Loads defaults, then the config file, then environment overrides.
///
/// An explicit `config_path` must exist; the default location is optional.
pub fn load(config_path: Option<PathBuf>) -> Result<AppConfig> {
    let file_config = load_file(config_path)?;
    let config = apply_env(file_config, |name| env::var(name).ok())?;
    validate(config)
}

fn load_file(config_path: Option<PathBuf>) -> Result<AppConfig> {
    let required = config_path.is_some();
    let path = match resolve_config_path(config_path) {
        Ok(path) => path,
        Err(ConfigError::MissingHomeDir) if !required => return Ok(AppConfig::default()),
        Err(ConfigError::InvalidConfigPath(_)) if !required => return Ok(AppConfig::default()),
        Err(err) => return Err(err),
    };
    match load_at_path(&path, required)? {
        Some(config) => Ok(config),
        None => Ok(AppConfig::default()),
    }
}

pub fn resolve_config_path(custom: Option<PathBuf>) -> Result<PathBuf> {
    match custom {
        Some(path) => {
            if path.as_os_str().is_empty() {
                return Err(ConfigError::InvalidConfigPath(path));
            }
            Ok(path)
        }
        None => {
            let base = if let Some(dir) = env::var_os("XDG_CONFIG_HOME") {
                let path = PathBuf::from(dir);
                if path.as_os_str().is_empty() {
                    return Err(ConfigError::InvalidConfigPath(path));
                }
                path
            } else {
                let home = dirs::home_dir().ok_or(ConfigError::MissingHomeDir)?;
                home.join(".config")
            };
            Ok(base.join(APP_DIR).join(CONFIG_FILENAME))
        }
    }
}

fn load_at_path(path: &Path, required: bool) -> Result<Option<AppConfig>> {
    if !path.exists() {
        if required {
            return Err(ConfigError::MissingConfigFile(path.to_path_buf()));
        }
        return Ok(None);
    }

    ensure_permissions(path)?;
    let contents = fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let parsed: ConfigFile = toml::from_str(&contents).map_err(|source| ConfigError::Parse {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(Some(merge_config(parsed)))
}

fn merge_config(parsed: ConfigFile) -> AppConfig {
    let mut config = AppConfig::default();

    if let Some(server) = parsed.server {
        if let Some(bind) = server.bind {
            config.server.bind = bind;
        }
        if let Some(prefix) = server.endpoint_prefix {
            config.server.endpoint_prefix = prefix;
        }
    }

    if let Some(backend) = parsed.store.and_then(|store| store.backend) {
        config.store.backend = backend;
    }

    if let Some(redis) = parsed.redis {
        if let Some(host) = redis.host {
            config.redis.host = host;
        }
        if let Some(port) = redis.port {
            config.redis.port = port;
        }
        if let Some(username) = redis.username {
            config.redis.username = non_empty(username);
        }
        if let Some(password) = redis.password {
            config.redis.password = non_empty(password);
        }
        if let Some(database) = redis.database {
            config.redis.database = database;
        }
        if let Some(pool_size) = redis.pool_size {
            config.redis.pool_size = pool_size;
        }
        if let Some(ms) = redis.connect_timeout_ms {
            config.redis.connect_timeout_ms = ms;
        }
        if let Some(ms) = redis.command_timeout_ms {
            config.redis.command_timeout_ms = ms;
        }
    }

    config
}

/// Environment variables win over the file. `lookup` returns `None` for
/// unset variables.
pub fn apply_env<F>(mut config: AppConfig, lookup: F) -> Result<AppConfig>
where
    F: Fn(&str) -> Option<String>,
{
    if let Some(host) = lookup("REDIS_HOST") {
        config.redis.host = host;
    }
    if let Some(port) = lookup("REDIS_PORT") {
        config.redis.port = parse_env("REDIS_PORT", port)?;
    }
    if let Some(username) = lookup("REDIS_USERNAME") {
        config.redis.username = non_empty(username);
    }
    if let Some(password) = lookup("REDIS_PASSWORD") {
        config.redis.password = non_empty(password);
    }
    if let Some(database) = lookup("REDIS_DB") {
        config.redis.database = parse_env("REDIS_DB", database)?;
    }
    if let Some(prefix) = lookup("ENDPOINT_PREFIX") {
        config.server.endpoint_prefix = prefix;
    }
    if let Some(bind) = lookup("PHONEBOOK_BIND") {
        config.server.bind = parse_env("PHONEBOOK_BIND", bind)?;
    }
    if let Some(backend) = lookup("PHONEBOOK_STORE_BACKEND") {
        config.store.backend =
            StoreBackend::parse(&backend).ok_or(ConfigError::InvalidEnv {
                name: "PHONEBOOK_STORE_BACKEND",
                value: backend,
            })?;
    }
    Ok(config)
}

fn parse_env<T: std::str::FromStr>(name: &'static str, value: String) -> Result<T> {
    value
        .trim()
        .parse()
        .map_err(|_| ConfigError::InvalidEnv { name, value })
}

fn non_empty(value: String) -> Option<String> {
    if value.is_empty() {
        None
    } else {
        Some(value)
    }
}

/// Checks cross-field constraints and canonicalizes the endpoint prefix.
pub fn validate(mut config: AppConfig) -> Result<AppConfig> {
    config.server.endpoint_prefix = normalize_endpoint_prefix(&config.server.endpoint_prefix)?;

    if config.redis.pool_size == 0 {
        return Err(ConfigError::InvalidPoolSize(config.redis.pool_size));
    }
    if config.redis.connect_timeout_ms == 0 {
        return Err(ConfigError::InvalidTimeout {
            field: "connect_timeout_ms",
            value: 0,
        });
    }
    if config.redis.command_timeout_ms == 0 {
        return Err(ConfigError::InvalidTimeout {
            field: "command_timeout_ms",
            value: 0,
        });
    }
    Ok(config)
}

pub fn normalize_endpoint_prefix(raw: &str) -> Result<String> {
    let trimmed = raw.trim();
    let without_slash = trimmed.trim_end_matches('/');
    let valid = without_slash.starts_with('/')
        && without_slash.len() > 1
        && !without_slash.contains(char::is_whitespace)
        && !without_slash.contains(['?', '#', '{', '}', ':', '*']);
    if !valid {
        return Err(ConfigError::InvalidEndpointPrefix(raw.to_string()));
    }
    Ok(without_slash.to_string())
}

#[cfg(unix)]
fn ensure_permissions(path: &Path) -> Result<()> {
    use std::os::unix::fs::PermissionsExt;

    let metadata = fs::metadata(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let mode = metadata.permissions().mode();
    if mode & 0o077 != 0 {
        return Err(ConfigError::InsecurePermissions(path.to_path_buf()));
    }
    Ok(())
}

#[cfg(not(unix))]
fn ensure_permissions(_path: &Path) -> Result<()> {
    Ok(())
}
