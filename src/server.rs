//! HTTP server initialization and runtime setup.
//!
//! Handles the database pool, migrations, collaborator wiring and the Axum
//! server lifecycle.

use crate::application::services::GeoService;
use crate::config::Config;
use crate::infrastructure::persistence::{self, MIGRATOR, SqliteLocationRepository};
use crate::infrastructure::provider::IpstackProvider;
use crate::infrastructure::resolver::DnsResolver;
use crate::routes::app_router;
use crate::state::AppState;

use anyhow::{Context, Result};
use axum::ServiceExt;
use axum::extract::Request;
use std::net::SocketAddr;
use std::sync::Arc;

/// Runs the HTTP server with the given configuration.
///
/// Initializes:
/// - SQLite connection pool
/// - Schema migrations
/// - DNS resolver and ipstack client
/// - Axum HTTP server with graceful shutdown on Ctrl+C
///
/// # Errors
///
/// Returns an error if:
/// - Database connection or migration fails
/// - Server bind fails
/// - Server runtime error occurs
pub async fn run(config: Config) -> Result<()> {
    let pool = persistence::connect_pool(
        &config.database_url,
        config.db_max_connections,
        config.db_connect_timeout(),
    )
    .await
    .context("Failed to connect to database")?;
    tracing::info!("Connected to database");

    MIGRATOR
        .run(&pool)
        .await
        .context("Failed to apply migrations")?;

    let pool = Arc::new(pool);
    let geo_service = Arc::new(GeoService::new(
        Arc::new(SqliteLocationRepository::new(pool.clone())),
        Arc::new(DnsResolver::new(config.resolver_timeout())),
        Arc::new(
            IpstackProvider::new(
                config.ipstack_base_url.clone(),
                config.ipstack_access_key.clone(),
                config.provider_timeout(),
            )
            .context("Failed to build provider client")?,
        ),
    ));

    let state = AppState::new(geo_service, pool);

    let app = app_router(state, &config)?;

    let addr: SocketAddr = config.listen_addr.parse()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("Listening on http://{addr}");

    axum::serve(
        listener,
        ServiceExt::<Request>::into_make_service_with_connect_info::<SocketAddr>(app),
    )
    .with_graceful_shutdown(shutdown_signal())
    .await?;

    tracing::info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}
