//! Handlers for the `/geo` resource (read, create, delete).

use axum::{
    Json,
    extract::{
        Query, State,
        rejection::{JsonRejection, QueryRejection},
    },
    http::StatusCode,
};
use serde_json::Value;

use crate::api::dto::geo::LocationParams;
use crate::error::AppError;
use crate::state::AppState;

/// Returns the cached geolocation record for an IP or hostname.
///
/// # Endpoint
///
/// `GET /geo?ip=142.251.98.139` or `GET /geo?url=google.com`
///
/// # Response
///
/// `200 OK` with the provider record exactly as it was stored.
///
/// # Errors
///
/// - 400 if both or neither of `ip` / `url` are given, the IP is invalid, or
///   the hostname does not resolve
/// - 404 if no record is stored for the resolved IP
pub async fn get_location_handler(
    State(state): State<AppState>,
    query: Result<Query<LocationParams>, QueryRejection>,
) -> Result<Json<Value>, AppError> {
    let Query(params) = query.map_err(|e| AppError::BadRequest(e.body_text()))?;
    let identifier = params.identifier()?;

    let record = state.geo_service.get_location(&identifier).await?;

    Ok(Json(record))
}

/// Looks up an IP or hostname at the provider and stores the result.
///
/// # Endpoint
///
/// `POST /geo`
///
/// # Request Body
///
/// ```json
/// { "ip": "142.251.98.139" }
/// ```
///
/// or `{ "url": "google.com" }`.
///
/// # Response
///
/// `201 Created` with the stored provider record.
///
/// # Errors
///
/// - 400 if the body is malformed, both or neither fields are given, the IP is
///   invalid, the hostname does not resolve, or the provider has no data
/// - 409 if a record for the resolved IP already exists
pub async fn create_location_handler(
    State(state): State<AppState>,
    payload: Result<Json<LocationParams>, JsonRejection>,
) -> Result<(StatusCode, Json<Value>), AppError> {
    let Json(params) = payload.map_err(|e| AppError::BadRequest(e.body_text()))?;
    let identifier = params.identifier()?;

    let record = state.geo_service.create_location(&identifier).await?;

    Ok((StatusCode::CREATED, Json(record)))
}

/// Removes the stored record for an IP or hostname.
///
/// # Endpoint
///
/// `DELETE /geo?ip=142.251.98.139` or `DELETE /geo?url=google.com`
///
/// # Response
///
/// `204 No Content`.
///
/// # Errors
///
/// - 400 if both or neither of `ip` / `url` are given, the IP is invalid, or
///   the hostname does not resolve
/// - 404 if no record is stored for the resolved IP
pub async fn delete_location_handler(
    State(state): State<AppState>,
    query: Result<Query<LocationParams>, QueryRejection>,
) -> Result<StatusCode, AppError> {
    let Query(params) = query.map_err(|e| AppError::BadRequest(e.body_text()))?;
    let identifier = params.identifier()?;

    state.geo_service.delete_location(&identifier).await?;

    Ok(StatusCode::NO_CONTENT)
}
