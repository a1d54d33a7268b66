//! HTTP request handlers for API endpoints.
//!
//! Each handler module corresponds to a logical grouping of endpoints.

pub mod geo;
pub mod health;

pub use geo::{create_location_handler, delete_location_handler, get_location_handler};
pub use health::health_handler;
