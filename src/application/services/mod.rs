//! Business logic services for the application layer.

pub mod geo_service;

pub use geo_service::GeoService;
