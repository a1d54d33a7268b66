//! Core domain entities.
//!
//! - [`GeoLocation`] - A cached provider response for one IP address
//! - [`NewGeoLocation`] - Input for inserting a new record

pub mod geo_location;

pub use geo_location::{GeoLocation, NewGeoLocation};
