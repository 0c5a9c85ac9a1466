use std::sync::Arc;

use axum::{
    routing::{get, put},
    Router,
};

use crate::features::requests::handlers;
use crate::features::requests::services::RequestService;

/// Where access-denied detail views are redirected to
pub const REQUEST_LIST_PATH: &str = "/api/requests";

/// Create routes for the requests feature
///
/// Note: Listing and creation are open to any authenticated user; the
/// status update route is additionally admin-gated in its handler.
pub fn routes(service: Arc<RequestService>) -> Router {
    Router::new()
        .route(
            "/api/requests",
            get(handlers::list_requests).post(handlers::create_request),
        )
        .route("/api/requests/{id}", get(handlers::get_request))
        .route(
            "/api/requests/{id}/status",
            put(handlers::update_request_status),
        )
        .with_state(service)
}
