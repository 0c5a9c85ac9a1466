use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::features::requests::models::{Request, RequestStatus};

/// Response DTO for request
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct RequestResponseDto {
    pub id: Uuid,
    pub owner_id: String,
    pub category_id: Uuid,
    pub title: String,
    pub description: String,
    pub attachment_url: Option<String>,
    pub status: RequestStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Request> for RequestResponseDto {
    fn from(r: Request) -> Self {
        Self {
            id: r.id,
            owner_id: r.owner_id,
            category_id: r.category_id,
            title: r.title,
            description: r.description,
            attachment_url: r.attachment_url,
            status: r.status,
            created_at: r.created_at,
            updated_at: r.updated_at,
        }
    }
}

/// DTO for creating a request.
///
/// The owner is never part of the form; it always comes from the
/// authenticated user.
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct CreateRequestDto {
    #[validate(length(min = 1, message = "title is required"))]
    pub title: String,
    #[validate(length(min = 1, message = "description is required"))]
    pub description: String,
    pub category_id: Uuid,
}

/// DTO for the admin status form
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct UpdateRequestStatusDto {
    pub status: RequestStatus,
}

/// An attachment file lifted out of the multipart form
#[derive(Debug, Clone)]
pub struct AttachmentUpload {
    pub data: Vec<u8>,
    pub file_name: String,
    pub content_type: String,
}
