//! REST API layer for HTTP request/response handling.
//!
//! # Modules
//!
//! - [`dto`] - Request parameters and response bodies
//! - [`handlers`] - HTTP request handlers
//! - [`middleware`] - Rate limiting and request tracing
//! - [`routes`] - Route configuration

pub mod dto;
pub mod handlers;
pub mod middleware;
pub mod routes;
