//! Domain layer containing business entities and data access contracts.
//!
//! # Architecture
//!
//! - [`entities`] - Persisted geolocation records
//! - [`identifier`] - The validated `ip` / `url` request identifier
//! - [`repositories`] - Data access trait definitions
//!
//! The domain layer has no dependencies on HTTP or storage details. Repository
//! traits are implemented in [`crate::infrastructure::persistence`] and driven
//! by [`crate::application::services::GeoService`].

pub mod entities;
pub mod identifier;
pub mod repositories;
