//! Catalogue server entry-point: loads settings, prepares the store and
//! serves the pages.

mod server;

use actix_web::web;
use color_eyre::eyre::{Result, WrapErr};
use ortho_config::OrthoConfig;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use catalog::inbound::http::health::HealthState;
use catalog::outbound::persistence::{DbPool, PoolConfig, run_pending_migrations};

use server::{ServerConfig, ServerSettings, create_server, drain};

/// Apply pending migrations on a blocking thread.
async fn migrate(database_url: String) -> Result<()> {
    let applied = tokio::task::spawn_blocking(move || run_pending_migrations(&database_url))
        .await
        .wrap_err("migration task panicked")?
        .wrap_err("failed to apply database migrations")?;
    info!(applied, "database migrations applied");
    Ok(())
}

async fn server_config(settings: &ServerSettings) -> Result<ServerConfig> {
    let config = ServerConfig::new(settings.bind_addr()?);
    let Some(database_url) = settings.database_url() else {
        return Ok(config);
    };
    if settings.run_migrations {
        migrate(database_url.clone()).await?;
    } else {
        warn!("skipping database migrations");
    }
    let pool = DbPool::new(PoolConfig::new(database_url).with_max_size(settings.pool_max_size()))
        .await
        .wrap_err("failed to create database pool")?;
    Ok(config.with_db_pool(pool))
}

/// Resolve on Ctrl-C, or on SIGTERM where the platform has it.
async fn shutdown_signal() -> std::io::Result<()> {
    #[cfg(unix)]
    {
        use tokio::signal::unix::{SignalKind, signal};

        let mut terminate = signal(SignalKind::terminate())?;
        tokio::select! {
            interrupted = tokio::signal::ctrl_c() => interrupted,
            _ = terminate.recv() => Ok(()),
        }
    }
    #[cfg(not(unix))]
    tokio::signal::ctrl_c().await
}

/// Application bootstrap.
#[actix_web::main]
async fn main() -> Result<()> {
    color_eyre::install()?;
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let settings = ServerSettings::load().wrap_err("failed to load server settings")?;
    let config = server_config(&settings).await?;
    let bind_addr = config.bind_addr;

    let health_state = web::Data::new(HealthState::new());
    let server = create_server(health_state.clone(), config)
        .wrap_err_with(|| format!("failed to bind {bind_addr}"))?;
    let handle = server.handle();
    actix_web::rt::spawn(async move {
        match shutdown_signal().await {
            Ok(()) => drain(health_state, handle).await,
            Err(error) => warn!(%error, "cannot listen for shutdown signals"),
        }
    });
    info!(%bind_addr, "catalogue server listening");
    server.await.wrap_err("server terminated abnormally")
}
