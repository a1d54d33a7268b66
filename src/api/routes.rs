//! API route configuration.

use crate::api::handlers::{
    create_location_handler, delete_location_handler, get_location_handler,
};
use crate::state::AppState;
use axum::{Router, routing::get};

/// Routes of the `/geo` resource.
///
/// # Endpoints
///
/// - `GET    /geo` - Read a cached record (`?ip=` or `?url=`)
/// - `POST   /geo` - Fetch from the provider and store (`{"ip"}` or `{"url"}`)
/// - `DELETE /geo` - Remove a cached record (`?ip=` or `?url=`)
pub fn geo_routes() -> Router<AppState> {
    Router::new().route(
        "/geo",
        get(get_location_handler)
            .post(create_location_handler)
            .delete(delete_location_handler),
    )
}
