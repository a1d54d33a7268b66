//! Geolocation lookup, caching and removal.

use serde_json::Value;
use std::sync::Arc;
use tracing::{debug, info, warn};

use crate::domain::entities::NewGeoLocation;
use crate::domain::identifier::RequestIdentifier;
use crate::domain::repositories::LocationRepository;
use crate::error::AppError;
use crate::infrastructure::provider::GeoProvider;
use crate::infrastructure::resolver::AddressResolver;

/// Service driving the resolve, cache check, provider lookup and store steps.
///
/// Every operation is a single pass with no retries:
///
/// 1. Resolve the identifier to a canonical IP (no store access on failure)
/// 2. Consult the store
/// 3. For creates only: ask the provider, then insert
///
/// Conflicting creates are decided by the store's uniqueness check, so the
/// service holds no locks and keeps no state between requests.
pub struct GeoService {
    location_repository: Arc<dyn LocationRepository>,
    resolver: Arc<dyn AddressResolver>,
    provider: Arc<dyn GeoProvider>,
}

impl GeoService {
    /// Creates a new geolocation service.
    pub fn new(
        location_repository: Arc<dyn LocationRepository>,
        resolver: Arc<dyn AddressResolver>,
        provider: Arc<dyn GeoProvider>,
    ) -> Self {
        Self {
            location_repository,
            resolver,
            provider,
        }
    }

    /// Returns the cached provider record for the identifier.
    ///
    /// # Errors
    ///
    /// - [`AppError::UnresolvableIdentifier`] if the hostname does not resolve
    /// - [`AppError::NotFound`] if nothing is stored for the IP
    /// - [`AppError::Database`] on database errors
    pub async fn get_location(&self, identifier: &RequestIdentifier) -> Result<Value, AppError> {
        let ip = self.resolve(identifier).await?;

        match self.location_repository.find_by_ip(&ip).await? {
            Some(location) => {
                metrics::counter!("geo_cache_lookups_total", "outcome" => "hit").increment(1);
                debug!(%ip, "Serving cached location");
                Ok(location.provider_response)
            }
            None => {
                metrics::counter!("geo_cache_lookups_total", "outcome" => "miss").increment(1);
                Err(AppError::NotFound)
            }
        }
    }

    /// Fetches the provider record for the identifier and stores it.
    ///
    /// Never overwrites: if a record already exists for the IP, the provider is
    /// not called. A concurrent create that wins the insert race makes this one
    /// fail with [`AppError::AlreadyExists`] as well.
    ///
    /// # Errors
    ///
    /// - [`AppError::UnresolvableIdentifier`] if the hostname does not resolve
    /// - [`AppError::AlreadyExists`] if a record exists for the IP
    /// - [`AppError::ProviderDataUnavailable`] if the provider has no data
    /// - [`AppError::Provider`] on provider failures
    /// - [`AppError::Database`] on database errors
    pub async fn create_location(
        &self,
        identifier: &RequestIdentifier,
    ) -> Result<Value, AppError> {
        let ip = self.resolve(identifier).await?;

        if self.location_repository.find_by_ip(&ip).await?.is_some() {
            return Err(AppError::AlreadyExists);
        }

        metrics::counter!("geo_provider_lookups_total").increment(1);
        let provider_response = self
            .provider
            .lookup(&ip)
            .await?
            .ok_or(AppError::ProviderDataUnavailable)?;

        let new_location = NewGeoLocation {
            ip: ip.clone(),
            provider_response,
        };

        match self.location_repository.insert(new_location).await {
            Ok(location) => {
                info!(%ip, "Stored location");
                Ok(location.provider_response)
            }
            Err(AppError::AlreadyExists) => {
                warn!(%ip, "Location was stored by a concurrent request");
                Err(AppError::AlreadyExists)
            }
            Err(e) => Err(e),
        }
    }

    /// Removes the stored record for the identifier.
    ///
    /// # Errors
    ///
    /// - [`AppError::UnresolvableIdentifier`] if the hostname does not resolve
    /// - [`AppError::NotFound`] if nothing was stored for the IP
    /// - [`AppError::Database`] on database errors
    pub async fn delete_location(&self, identifier: &RequestIdentifier) -> Result<(), AppError> {
        let ip = self.resolve(identifier).await?;

        if !self.location_repository.delete_by_ip(&ip).await? {
            return Err(AppError::NotFound);
        }

        info!(%ip, "Deleted location");
        Ok(())
    }

    async fn resolve(&self, identifier: &RequestIdentifier) -> Result<String, AppError> {
        self.resolver
            .resolve_to_ip(identifier)
            .await
            .ok_or_else(|| {
                debug!(%identifier, "Could not resolve identifier");
                AppError::UnresolvableIdentifier
            })
    }
}
