//! Rate limiting middleware using token bucket algorithm.

use anyhow::{Context, Result};
use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use governor::clock::QuantaInstant;
use governor::middleware::NoOpMiddleware;
use std::sync::Arc;
use tower_governor::{
    GovernorError, GovernorLayer, governor::GovernorConfigBuilder,
    key_extractor::PeerIpKeyExtractor,
};

use crate::error::{ErrorBody, GENERIC_ERROR_MESSAGE};

/// Message returned with `429 Too Many Requests`.
pub const TOO_MANY_REQUESTS_MESSAGE: &str = "Too many requests, try again later.";

/// Creates a per-client rate limiter for the `/geo` resource.
///
/// Each client IP (taken from the socket peer address) gets a bucket refilled
/// with one token every `1 / per_second` seconds, holding at most
/// `burst_size` tokens. Requests exceeding the limit receive
/// `429 Too Many Requests` with the usual `{"message"}` error body and the
/// limiter's `retry-after` / `x-ratelimit-*` headers.
///
/// The router must be served with
/// `into_make_service_with_connect_info::<SocketAddr>()` so the peer address is
/// available.
///
/// # Errors
///
/// Returns an error if `per_second` or `burst_size` is zero.
pub fn layer(
    per_second: u64,
    burst_size: u32,
) -> Result<GovernorLayer<PeerIpKeyExtractor, NoOpMiddleware<QuantaInstant>, axum::body::Body>> {
    let governor_conf = Arc::new(
        GovernorConfigBuilder::default()
            .per_second(per_second)
            .burst_size(burst_size)
            .finish()
            .context("Rate limit period and burst size must be greater than zero")?,
    );

    Ok(GovernorLayer::new(governor_conf).error_handler(error_response))
}

/// Renders limiter rejections as JSON error bodies, keeping status and headers.
fn error_response(error: GovernorError) -> Response {
    let (parts, text) = error.into_response().into_parts();

    let message = if parts.status == StatusCode::TOO_MANY_REQUESTS {
        TOO_MANY_REQUESTS_MESSAGE.to_string()
    } else if parts.status.is_server_error() {
        tracing::error!(status = parts.status.as_u16(), "Rate limiter failed: {}", text);
        GENERIC_ERROR_MESSAGE.to_string()
    } else {
        text
    };

    let mut response = (parts.status, Json(ErrorBody { message })).into_response();
    response.headers_mut().extend(parts.headers);
    response
}
