use std::sync::Arc;

use axum::{routing::get, Router};

use crate::features::dashboard::handlers;
use crate::features::dashboard::services::DashboardService;

/// Create routes for the dashboard feature
///
/// Note: These routes are public; they are mounted outside the
/// authentication middleware.
pub fn routes(service: Arc<DashboardService>) -> Router {
    Router::new()
        .route(
            "/api/dashboard/resolved-count",
            get(handlers::get_resolved_count),
        )
        .with_state(service)
}
