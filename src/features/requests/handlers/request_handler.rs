use std::sync::Arc;

use axum::{
    extract::{Multipart, Path, State},
    http::StatusCode,
    Json,
};
use tracing::debug;
use uuid::Uuid;
use validator::Validate;

use crate::core::error::{AppError, Result};
use crate::core::extractor::AppJson;
use crate::features::auth::guards::RequireAdmin;
use crate::features::auth::model::AuthenticatedUser;
use crate::features::requests::dtos::{
    AttachmentUpload, CreateRequestDto, RequestResponseDto, UpdateRequestStatusDto,
};
use crate::features::requests::services::RequestService;
use crate::shared::types::ApiResponse;

/// List requests
///
/// Administrators see every request; other users only their own.
#[utoipa::path(
    get,
    path = "/api/requests",
    responses(
        (status = 200, description = "List of visible requests", body = ApiResponse<Vec<RequestResponseDto>>),
        (status = 401, description = "Authentication required")
    ),
    security(("bearer_auth" = [])),
    tag = "requests"
)]
pub async fn list_requests(
    user: AuthenticatedUser,
    State(service): State<Arc<RequestService>>,
) -> Result<Json<ApiResponse<Vec<RequestResponseDto>>>> {
    let requests = service.list_for(&user).await?;
    Ok(Json(ApiResponse::success(Some(requests), None, None)))
}

/// Submit a new request
///
/// Accepts multipart/form-data with:
/// - `title`: Short summary (required)
/// - `description`: Full description (required)
/// - `category_id`: UUID of an existing category (required)
/// - `attachment`: Optional file
#[utoipa::path(
    post,
    path = "/api/requests",
    request_body(
        content = CreateRequestDto,
        content_type = "multipart/form-data",
        description = "Request form with an optional attachment field",
    ),
    responses(
        (status = 201, description = "Request created", body = ApiResponse<RequestResponseDto>),
        (status = 400, description = "Missing field or unknown category"),
        (status = 401, description = "Authentication required")
    ),
    security(("bearer_auth" = [])),
    tag = "requests"
)]
pub async fn create_request(
    user: AuthenticatedUser,
    State(service): State<Arc<RequestService>>,
    mut multipart: Multipart,
) -> Result<(StatusCode, Json<ApiResponse<RequestResponseDto>>)> {
    let mut title = String::new();
    let mut description = String::new();
    let mut category_id: Option<Uuid> = None;
    let mut attachment: Option<AttachmentUpload> = None;

    while let Some(field) = multipart.next_field().await.map_err(|e| {
        debug!("Failed to read multipart field: {}", e);
        AppError::BadRequest(format!("Failed to read multipart data: {}", e))
    })? {
        let field_name = field.name().unwrap_or("").to_string();

        match field_name.as_str() {
            "title" => {
                title = field.text().await.map_err(|e| {
                    AppError::BadRequest(format!("Failed to read title field: {}", e))
                })?;
            }
            "description" => {
                description = field.text().await.map_err(|e| {
                    AppError::BadRequest(format!("Failed to read description field: {}", e))
                })?;
            }
            "category_id" => {
                let text = field.text().await.map_err(|e| {
                    AppError::BadRequest(format!("Failed to read category_id field: {}", e))
                })?;
                let id = Uuid::parse_str(text.trim()).map_err(|_| {
                    AppError::Validation(format!("'{}' is not a valid category id", text))
                })?;
                category_id = Some(id);
            }
            "attachment" => {
                let content_type = field
                    .content_type()
                    .map(|s| s.to_string())
                    .unwrap_or_else(|| "application/octet-stream".to_string());
                let file_name = field
                    .file_name()
                    .map(|s| s.to_string())
                    .unwrap_or_else(|| "unnamed".to_string());

                let data = field.bytes().await.map_err(|e| {
                    debug!("Failed to read attachment bytes: {}", e);
                    AppError::BadRequest(format!("Failed to read attachment data: {}", e))
                })?;

                // An empty file input is treated as no attachment
                if !data.is_empty() {
                    attachment = Some(AttachmentUpload {
                        data: data.to_vec(),
                        file_name,
                        content_type,
                    });
                }
            }
            _ => {
                debug!("Ignoring unknown field: {}", field_name);
            }
        }
    }

    let category_id =
        category_id.ok_or_else(|| AppError::Validation("category_id is required".to_string()))?;

    let dto = CreateRequestDto {
        title,
        description,
        category_id,
    };
    dto.validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    let request = service.create(&user, dto, attachment).await?;

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success(
            Some(request),
            Some("Request created successfully".to_string()),
            None,
        )),
    ))
}

/// Get a request's detail
///
/// Owners and administrators get the request. A non-owner is redirected
/// back to the request list with an error notification. An unknown id is
/// a 404 for every caller.
#[utoipa::path(
    get,
    path = "/api/requests/{id}",
    params(
        ("id" = Uuid, Path, description = "Request id")
    ),
    responses(
        (status = 200, description = "Request detail", body = ApiResponse<RequestResponseDto>),
        (status = 303, description = "Not the owner, redirected to the request list"),
        (status = 404, description = "Request not found"),
        (status = 401, description = "Authentication required")
    ),
    security(("bearer_auth" = [])),
    tag = "requests"
)]
pub async fn get_request(
    user: AuthenticatedUser,
    State(service): State<Arc<RequestService>>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<RequestResponseDto>>> {
    let request = service.detail(&user, id).await?;
    Ok(Json(ApiResponse::success(Some(request), None, None)))
}

/// Update a request's status
///
/// Admin only. Any status can be set from any other status.
#[utoipa::path(
    put,
    path = "/api/requests/{id}/status",
    params(
        ("id" = Uuid, Path, description = "Request id")
    ),
    request_body = UpdateRequestStatusDto,
    responses(
        (status = 200, description = "Status updated", body = ApiResponse<RequestResponseDto>),
        (status = 400, description = "Unknown status value"),
        (status = 403, description = "Admin access required"),
        (status = 404, description = "Request not found")
    ),
    security(("bearer_auth" = [])),
    tag = "requests"
)]
pub async fn update_request_status(
    RequireAdmin(_user): RequireAdmin,
    State(service): State<Arc<RequestService>>,
    Path(id): Path<Uuid>,
    AppJson(dto): AppJson<UpdateRequestStatusDto>,
) -> Result<Json<ApiResponse<RequestResponseDto>>> {
    let request = service.update_status(id, dto.status).await?;
    Ok(Json(ApiResponse::success(
        Some(request),
        Some("Request status updated".to_string()),
        None,
    )))
}
