//! Geolocation provider trait and error types.

use async_trait::async_trait;
use serde_json::Value;

/// Failures talking to the geolocation provider.
///
/// "No data for this IP" is not an error; it is reported as `Ok(None)` by
/// [`GeoProvider::lookup`].
#[derive(Debug, thiserror::Error)]
pub enum ProviderError {
    #[error("request to provider failed: {0}")]
    Transport(reqwest::Error),

    #[error("provider responded with HTTP {status}")]
    Status { status: u16 },

    #[error("provider error {code}: {info}")]
    Api { code: i64, info: String },

    #[error("unexpected provider response: {0}")]
    InvalidResponse(String),
}

/// Result type for provider operations.
pub type ProviderResult<T> = Result<T, ProviderError>;

/// Looks up geolocation data for an IP address.
///
/// # Implementations
///
/// - [`crate::infrastructure::provider::IpstackProvider`] - ipstack.com HTTP API
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait GeoProvider: Send + Sync {
    /// Fetches the provider record for `ip`.
    ///
    /// # Returns
    ///
    /// - `Ok(Some(record))` with the provider's document, untouched
    /// - `Ok(None)` if the provider has no data for the address
    ///
    /// # Errors
    ///
    /// Returns [`ProviderError`] on transport, authentication or quota failures.
    async fn lookup(&self, ip: &str) -> ProviderResult<Option<Value>>;
}
