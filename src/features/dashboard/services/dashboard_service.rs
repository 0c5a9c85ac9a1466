use std::sync::Arc;

use crate::core::error::Result;
use crate::features::dashboard::dtos::ResolvedCountDto;
use crate::features::requests::models::RequestStatus;
use crate::features::requests::stores::RequestStore;

/// Aggregations for dashboard widgets
pub struct DashboardService {
    requests: Arc<dyn RequestStore>,
}

impl DashboardService {
    pub fn new(requests: Arc<dyn RequestStore>) -> Self {
        Self { requests }
    }

    /// Count requests currently in the resolved status.
    ///
    /// Only the live status counts; a request that was resolved and later
    /// reopened is not included.
    pub async fn get_resolved_count(&self) -> Result<ResolvedCountDto> {
        let resolved_count = self.requests.count_by_status(RequestStatus::Resolved).await?;

        Ok(ResolvedCountDto { resolved_count })
    }
}
