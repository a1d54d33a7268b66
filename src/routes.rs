//! Top-level router configuration.
//!
//! # Route Structure
//!
//! - `GET    /health` - Health check (database)
//! - `GET    /geo`    - Read a cached geolocation record
//! - `POST   /geo`    - Fetch and cache a geolocation record
//! - `DELETE /geo`    - Remove a cached geolocation record
//!
//! # Middleware
//!
//! - **Tracing** - Structured request/response logging
//! - **Rate limiting** - Per-IP token bucket on `/geo`
//! - **Path normalization** - Trailing slash handling

use crate::api;
use crate::api::handlers::health_handler;
use crate::api::middleware::{rate_limit, tracing};
use crate::config::Config;
use crate::state::AppState;
use anyhow::Result;
use axum::Router;
use axum::routing::get;
use tower::Layer;
use tower_http::normalize_path::{NormalizePath, NormalizePathLayer};

/// Constructs the application router with all routes and middleware.
///
/// # Errors
///
/// Returns an error if the rate limit settings in `config` are invalid.
pub fn app_router(state: AppState, config: &Config) -> Result<NormalizePath<Router>> {
    let geo_router = api::routes::geo_routes().layer(rate_limit::layer(
        config.rate_limit_per_second,
        config.rate_limit_burst,
    )?);

    let router = Router::new()
        .route("/health", get(health_handler))
        .merge(geo_router)
        .with_state(state)
        .layer(tracing::layer());

    Ok(NormalizePathLayer::trim_trailing_slash().layer(router))
}
