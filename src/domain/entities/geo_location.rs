//! Geolocation entity representing a cached provider response.

use chrono::{DateTime, Utc};
use serde_json::Value;

/// A provider response stored under its canonical IP address.
///
/// `provider_response` is kept exactly as the provider returned it. Records are
/// never updated in place: they are either inserted or deleted.
#[derive(Debug, Clone, PartialEq)]
pub struct GeoLocation {
    pub id: i64,
    pub ip: String,
    pub provider_response: Value,
    pub created_at: DateTime<Utc>,
}

impl GeoLocation {
    /// Creates a new GeoLocation instance.
    pub fn new(id: i64, ip: String, provider_response: Value, created_at: DateTime<Utc>) -> Self {
        Self {
            id,
            ip,
            provider_response,
            created_at,
        }
    }
}

/// Input data for inserting a new geolocation record.
#[derive(Debug, Clone, PartialEq)]
pub struct NewGeoLocation {
    pub ip: String,
    pub provider_response: Value,
}
