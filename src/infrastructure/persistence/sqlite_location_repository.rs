//! SQLite implementation of the location repository.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde_json::Value;
use sqlx::SqlitePool;
use sqlx::types::Json;
use std::sync::Arc;

use crate::domain::entities::{GeoLocation, NewGeoLocation};
use crate::domain::repositories::LocationRepository;
use crate::error::AppError;
use crate::utils::db_error::is_unique_violation;

/// SQLite repository for geolocation records.
///
/// The `geo_locations_ip_key` unique index is what decides concurrent inserts
/// for the same IP; a losing insert is reported as [`AppError::AlreadyExists`].
pub struct SqliteLocationRepository {
    pool: Arc<SqlitePool>,
}

impl SqliteLocationRepository {
    /// Creates a new repository with a database connection pool.
    pub fn new(pool: Arc<SqlitePool>) -> Self {
        Self { pool }
    }
}

#[derive(sqlx::FromRow)]
struct GeoLocationRow {
    id: i64,
    ip: String,
    provider_response: Json<Value>,
    created_at: DateTime<Utc>,
}

impl From<GeoLocationRow> for GeoLocation {
    fn from(row: GeoLocationRow) -> Self {
        GeoLocation::new(row.id, row.ip, row.provider_response.0, row.created_at)
    }
}

#[async_trait]
impl LocationRepository for SqliteLocationRepository {
    async fn find_by_ip(&self, ip: &str) -> Result<Option<GeoLocation>, AppError> {
        let row = sqlx::query_as::<_, GeoLocationRow>(
            r#"
            SELECT id, ip, provider_response, created_at
            FROM geo_locations
            WHERE ip = ?
            "#,
        )
        .bind(ip)
        .fetch_optional(self.pool.as_ref())
        .await?;

        Ok(row.map(GeoLocation::from))
    }

    async fn insert(&self, new_location: NewGeoLocation) -> Result<GeoLocation, AppError> {
        let row = sqlx::query_as::<_, GeoLocationRow>(
            r#"
            INSERT INTO geo_locations (ip, provider_response, created_at)
            VALUES (?, ?, ?)
            RETURNING id, ip, provider_response, created_at
            "#,
        )
        .bind(&new_location.ip)
        .bind(Json(&new_location.provider_response))
        .bind(Utc::now())
        .fetch_one(self.pool.as_ref())
        .await
        .map_err(|e| {
            if is_unique_violation(&e) {
                AppError::AlreadyExists
            } else {
                AppError::Database(e)
            }
        })?;

        Ok(row.into())
    }

    async fn delete_by_ip(&self, ip: &str) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM geo_locations WHERE ip = ?")
            .bind(ip)
            .execute(self.pool.as_ref())
            .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn list(&self, page: i64, page_size: i64) -> Result<Vec<GeoLocation>, AppError> {
        if page < 1 || page_size < 1 {
            return Err(AppError::BadRequest(
                "page and page size must be at least 1".to_string(),
            ));
        }
        let offset = (page - 1)
            .checked_mul(page_size)
            .ok_or_else(|| AppError::BadRequest("page is out of range".to_string()))?;

        let rows = sqlx::query_as::<_, GeoLocationRow>(
            r#"
            SELECT id, ip, provider_response, created_at
            FROM geo_locations
            ORDER BY created_at DESC, id DESC
            LIMIT ? OFFSET ?
            "#,
        )
        .bind(page_size)
        .bind(offset)
        .fetch_all(self.pool.as_ref())
        .await?;

        Ok(rows.into_iter().map(GeoLocation::from).collect())
    }

    async fn count(&self) -> Result<i64, AppError> {
        let count = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM geo_locations")
            .fetch_one(self.pool.as_ref())
            .await?;

        Ok(count)
    }
}
