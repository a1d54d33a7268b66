//! Application layer services implementing business logic.
//!
//! Services consume repository and infrastructure traits and provide a clean
//! API for HTTP handlers and the admin CLI.
//!
//! # Available Services
//!
//! - [`services::geo_service::GeoService`] - Resolve, cache and delete geolocation records

pub mod services;
