use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Payload of the resolved-count widget.
///
/// Served without the standard response envelope; dashboard widgets
/// consume the raw object.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ResolvedCountDto {
    pub resolved_count: i64,
}
