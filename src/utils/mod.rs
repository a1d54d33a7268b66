//! Helpers shared across layers.
//!
//! - [`host`] - Host extraction from IP literals, hostnames and URLs
//! - [`db_error`] - Database error classification

pub mod db_error;
pub mod host;
