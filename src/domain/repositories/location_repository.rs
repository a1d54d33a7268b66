//! Repository trait for cached geolocation records.

use crate::domain::entities::{GeoLocation, NewGeoLocation};
use crate::error::AppError;
use async_trait::async_trait;

/// Repository interface for geolocation records keyed by canonical IP.
///
/// Each operation is atomic for a single IP. Uniqueness of `ip` is enforced by
/// the storage itself, so concurrent inserts for the same IP never both succeed.
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::SqliteLocationRepository`] - SQLite implementation
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait LocationRepository: Send + Sync {
    /// Finds the record stored for `ip`.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Database`] on database errors.
    async fn find_by_ip(&self, ip: &str) -> Result<Option<GeoLocation>, AppError>;

    /// Inserts a new record.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::AlreadyExists`] if a record for the IP already exists.
    /// Returns [`AppError::Database`] on other database errors.
    async fn insert(&self, new_location: NewGeoLocation) -> Result<GeoLocation, AppError>;

    /// Deletes the record stored for `ip`.
    ///
    /// Returns `Ok(true)` if a record was removed, `Ok(false)` if none existed.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Database`] on database errors.
    async fn delete_by_ip(&self, ip: &str) -> Result<bool, AppError>;

    /// Lists records newest first.
    ///
    /// # Arguments
    ///
    /// - `page` - Page number (1-indexed)
    /// - `page_size` - Number of items per page
    ///
    /// # Errors
    ///
    /// - [`AppError::BadRequest`] if `page` or `page_size` is below 1, or the
    ///   page offset does not fit in an `i64`
    /// - [`AppError::Database`] on database errors
    async fn list(&self, page: i64, page_size: i64) -> Result<Vec<GeoLocation>, AppError>;

    /// Counts stored records.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Database`] on database errors.
    async fn count(&self) -> Result<i64, AppError>;
}
