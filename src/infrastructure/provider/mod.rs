//! Upstream geolocation provider.
//!
//! Provides a [`GeoProvider`] trait with one implementation, [`IpstackProvider`].

mod ipstack;
mod service;

pub use ipstack::IpstackProvider;
pub use service::{GeoProvider, ProviderError, ProviderResult};

#[cfg(test)]
pub use service::MockGeoProvider;
