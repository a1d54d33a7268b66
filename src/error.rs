//! Application error type and its HTTP rendering.
//!
//! Every failure the service can produce is a variant of [`AppError`]. Business
//! outcomes map to 4xx responses carrying their exact message; infrastructure
//! failures are logged in full and reported to the caller as a generic 5xx
//! message so no internal detail leaks.
//!
//! All error bodies have the same shape:
//!
//! ```json
//! { "message": "Location for given ip/url not found" }
//! ```

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;

use crate::infrastructure::provider::ProviderError;

/// Message returned for every 5xx response.
pub const GENERIC_ERROR_MESSAGE: &str = "Unexpected error occurred, try again later.";

/// JSON body of an error response.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub message: String,
}

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Provide either ip or url (not both)")]
    AmbiguousIdentifier,

    #[error("Ip or url has to be provided")]
    MissingIdentifier,

    #[error("Invalid IP address")]
    InvalidIpAddress,

    #[error("Could not resolve URL to IP")]
    UnresolvableIdentifier,

    #[error("Location for given ip/url not found")]
    NotFound,

    #[error("Geo location already exist")]
    AlreadyExists,

    #[error("Could not find data for given address")]
    ProviderDataUnavailable,

    /// Malformed request body or query string.
    #[error("{0}")]
    BadRequest(String),

    #[error("geolocation provider failure: {0}")]
    Provider(#[from] ProviderError),

    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
}

impl AppError {
    /// HTTP status the error is rendered with.
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::AmbiguousIdentifier
            | AppError::MissingIdentifier
            | AppError::InvalidIpAddress
            | AppError::UnresolvableIdentifier
            | AppError::ProviderDataUnavailable
            | AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::NotFound => StatusCode::NOT_FOUND,
            AppError::AlreadyExists => StatusCode::CONFLICT,
            AppError::Provider(_) => StatusCode::BAD_GATEWAY,
            AppError::Database(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Message safe to show to the caller.
    pub fn public_message(&self) -> String {
        if self.status_code().is_server_error() {
            GENERIC_ERROR_MESSAGE.to_string()
        } else {
            self.to_string()
        }
    }
}

impl From<validator::ValidationErrors> for AppError {
    fn from(errors: validator::ValidationErrors) -> Self {
        let field_errors = errors.field_errors();
        let fields: Vec<&str> = field_errors.keys().map(|k| k.as_ref()).collect();
        AppError::BadRequest(format!("Invalid value for: {}", fields.join(", ")))
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        if status.is_server_error() {
            tracing::error!(error = ?self, status = status.as_u16(), "Request failed: {}", self);
        } else {
            tracing::debug!(status = status.as_u16(), "Request rejected: {}", self);
        }

        let body = ErrorBody {
            message: self.public_message(),
        };

        (status, Json(body)).into_response()
    }
}
