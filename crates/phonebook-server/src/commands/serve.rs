use anyhow::{Context as _, Result};
use clap::Args;
use phonebook_config::{AppConfig, RedisConfig, StoreBackend};
use phonebook_server::router;
use phonebook_store::backend::RedisSettings;
use phonebook_store::Store;
use std::net::SocketAddr;
use std::time::Duration;
use tokio::net::TcpListener;
use tokio::runtime::Runtime;
use tracing::{info, warn};

#[derive(Debug, Args)]
pub struct ServeArgs {
    /// Address to listen on, overriding the configured one
    #[arg(long)]
    pub bind: Option<SocketAddr>,
}

pub fn serve(config: &AppConfig, args: ServeArgs) -> Result<()> {
    let runtime = Runtime::new().with_context(|| "start async runtime")?;
    runtime.block_on(run(config, args))
}

async fn run(config: &AppConfig, args: ServeArgs) -> Result<()> {
    let bind = args.bind.unwrap_or(config.server.bind);
    let store = open_store(config).await?;
    let app = router(store.clone(), &config.server.endpoint_prefix);

    let listener = TcpListener::bind(bind)
        .await
        .with_context(|| format!("bind {}", bind))?;
    let local_addr = listener.local_addr().with_context(|| "read local address")?;
    info!(
        addr = %local_addr,
        prefix = %config.server.endpoint_prefix,
        backend = store.backend_name(),
        "listening"
    );

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .with_context(|| "serve http")?;
    info!("server stopped");
    Ok(())
}

async fn open_store(config: &AppConfig) -> Result<Store> {
    match config.store.backend {
        StoreBackend::Memory => {
            warn!("using in-memory store; data is lost on exit");
            Ok(Store::in_memory())
        }
        StoreBackend::Redis => {
            let settings = redis_settings(&config.redis);
            let store = Store::connect_redis(&settings)
                .await
                .with_context(|| format!("connect to redis at {}", settings.url()))?;
            Ok(store)
        }
    }
}

pub fn redis_settings(config: &RedisConfig) -> RedisSettings {
    RedisSettings {
        host: config.host.clone(),
        port: config.port,
        username: config.username.clone(),
        password: config.password.clone(),
        database: config.database,
        pool_size: config.pool_size,
        connect_timeout: Duration::from_millis(config.connect_timeout_ms),
        command_timeout: Duration::from_millis(config.command_timeout_ms),
    }
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(err) = tokio::signal::ctrl_c().await {
            warn!(error = %err, "failed to listen for ctrl-c");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        use tokio::signal::unix::{signal, SignalKind};
        match signal(SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(err) => {
                warn!(error = %err, "failed to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
    info!("shutdown requested");
}
