//! Infrastructure layer for external integrations.
//!
//! This layer implements interfaces used by the application layer, providing
//! concrete implementations for persistence, name resolution and the upstream
//! geolocation provider.
//!
//! # Modules
//!
//! - [`persistence`] - SQLite repository implementations
//! - [`provider`] - ipstack geolocation client
//! - [`resolver`] - Hostname to IP resolution

pub mod persistence;
pub mod provider;
pub mod resolver;
