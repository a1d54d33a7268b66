//! Data Transfer Objects for API requests and responses.
//!
//! All DTOs use Serde for JSON / query string deserialization and validator
//! for input validation.

pub mod geo;
pub mod health;
