//! # Geo Locator
//!
//! An IP geolocation service built with Axum and SQLite. Given an IP address
//! or a hostname it resolves the hostname if needed, fetches the location from
//! ipstack, and caches the provider's record per IP so later reads are served
//! locally.
//!
//! ## Architecture
//!
//! - **Domain Layer** ([`domain`]) - Entities, the request identifier and repository traits
//! - **Application Layer** ([`application`]) - The resolve / cache / fetch workflow
//! - **Infrastructure Layer** ([`infrastructure`]) - SQLite, DNS and ipstack integrations
//! - **API Layer** ([`api`]) - REST handlers, DTOs and middleware
//!
//! ## Quick Start
//!
//! ```bash
//! export IPSTACK_ACCESS_KEY="your-access-key"
//! export DATABASE_URL="sqlite://geolocation.db?mode=rwc"  # Optional
//!
//! cargo run
//!
//! curl -X POST localhost:3000/geo -H 'content-type: application/json' -d '{"url": "google.com"}'
//! curl 'localhost:3000/geo?url=google.com'
//! curl -X DELETE 'localhost:3000/geo?url=google.com'
//! ```
//!
//! ## Configuration
//!
//! Service configuration is loaded from environment variables via [`config::Config`].
//! See [`config`] module for available options.

pub mod api;
pub mod application;
pub mod domain;
pub mod error;
pub mod infrastructure;
pub mod state;
pub mod utils;

pub mod config;
pub mod server;

pub mod routes;

pub use error::AppError;
pub use state::AppState;

/// Commonly used types for external consumers.
///
/// Re-exports frequently used types to simplify imports for library users
/// and integration tests.
pub mod prelude {
    pub use crate::application::services::GeoService;
    pub use crate::domain::entities::{GeoLocation, NewGeoLocation};
    pub use crate::domain::identifier::RequestIdentifier;
    pub use crate::error::AppError;
    pub use crate::state::AppState;
}
