//! Shared state injected into request handlers.

use sqlx::SqlitePool;
use std::sync::Arc;

use crate::application::services::GeoService;

#[derive(Clone)]
pub struct AppState {
    pub geo_service: Arc<GeoService>,
    /// Pool used by the health check.
    pub db: Arc<SqlitePool>,
}

impl AppState {
    pub fn new(geo_service: Arc<GeoService>, db: Arc<SqlitePool>) -> Self {
        Self { geo_service, db }
    }
}
