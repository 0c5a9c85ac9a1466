use std::sync::Arc;

use axum::{extract::State, Json};

use crate::core::error::Result;
use crate::features::dashboard::dtos::ResolvedCountDto;
use crate::features::dashboard::services::DashboardService;

/// Count of resolved requests
///
/// Public endpoint for dashboard widgets. Returns the raw object,
/// not the standard response envelope.
#[utoipa::path(
    get,
    path = "/api/dashboard/resolved-count",
    responses(
        (status = 200, description = "Number of resolved requests", body = ResolvedCountDto)
    ),
    tag = "dashboard"
)]
pub async fn get_resolved_count(
    State(service): State<Arc<DashboardService>>,
) -> Result<Json<ResolvedCountDto>> {
    let count = service.get_resolved_count().await?;
    Ok(Json(count))
}
