use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, Type};
use utoipa::ToSchema;
use uuid::Uuid;

/// Request status enum matching database enum
///
/// The domain is deliberately flat: status changes are admin-only and any
/// status may move to any other, so a resolved request can be reopened.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Type, ToSchema)]
#[sqlx(type_name = "request_status", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum RequestStatus {
    New,
    InProgress,
    Resolved,
    Closed,
}

impl RequestStatus {
    /// Initial status assigned to every freshly created request
    pub fn initial() -> Self {
        RequestStatus::New
    }
}

impl std::fmt::Display for RequestStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RequestStatus::New => write!(f, "new"),
            RequestStatus::InProgress => write!(f, "in_progress"),
            RequestStatus::Resolved => write!(f, "resolved"),
            RequestStatus::Closed => write!(f, "closed"),
        }
    }
}

/// Database model for request
#[derive(Debug, Clone, FromRow)]
pub struct Request {
    pub id: Uuid,
    /// Identifier of the user who created the request; fixed at creation
    pub owner_id: String,
    pub category_id: Uuid,
    pub title: String,
    pub description: String,
    pub attachment_url: Option<String>,
    pub status: RequestStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Fields required to persist a new request
#[derive(Debug, Clone)]
pub struct NewRequest {
    pub owner_id: String,
    pub category_id: Uuid,
    pub title: String,
    pub description: String,
    pub attachment_url: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_serializes_in_snake_case() {
        assert_eq!(
            serde_json::to_string(&RequestStatus::InProgress).unwrap(),
            "\"in_progress\""
        );
        assert_eq!(
            serde_json::to_string(&RequestStatus::Resolved).unwrap(),
            "\"resolved\""
        );
    }

    #[test]
    fn unknown_status_fails_to_deserialize() {
        assert!(serde_json::from_str::<RequestStatus>("\"escalated\"").is_err());
    }

    #[test]
    fn display_matches_wire_format() {
        assert_eq!(RequestStatus::InProgress.to_string(), "in_progress");
        assert_eq!(RequestStatus::initial().to_string(), "new");
    }
}
