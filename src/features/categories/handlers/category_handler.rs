use std::sync::Arc;

use axum::{extract::State, http::StatusCode, Json};

use crate::core::error::Result;
use crate::core::extractor::AppJson;
use crate::features::auth::guards::RequireAdmin;
use crate::features::categories::dtos::{CategoryResponseDto, CreateCategoryDto};
use crate::features::categories::services::CategoryService;
use crate::shared::types::ApiResponse;

/// List all categories
///
/// Admin only. Returns the flat category list in creation order.
#[utoipa::path(
    get,
    path = "/api/categories",
    responses(
        (status = 200, description = "List of categories", body = ApiResponse<Vec<CategoryResponseDto>>),
        (status = 403, description = "Admin access required")
    ),
    security(("bearer_auth" = [])),
    tag = "categories"
)]
pub async fn list_categories(
    RequireAdmin(_user): RequireAdmin,
    State(service): State<Arc<CategoryService>>,
) -> Result<Json<ApiResponse<Vec<CategoryResponseDto>>>> {
    let categories = service.list().await?;
    Ok(Json(ApiResponse::success(Some(categories), None, None)))
}

/// Create a category
///
/// Admin only. A blank name creates nothing and is not an error; the
/// response message says whether a category was created.
#[utoipa::path(
    post,
    path = "/api/categories",
    request_body = CreateCategoryDto,
    responses(
        (status = 201, description = "Category created", body = ApiResponse<CategoryResponseDto>),
        (status = 200, description = "Blank name, nothing created"),
        (status = 403, description = "Admin access required")
    ),
    security(("bearer_auth" = [])),
    tag = "categories"
)]
pub async fn create_category(
    RequireAdmin(_user): RequireAdmin,
    State(service): State<Arc<CategoryService>>,
    AppJson(dto): AppJson<CreateCategoryDto>,
) -> Result<(StatusCode, Json<ApiResponse<CategoryResponseDto>>)> {
    match service.create(&dto.name).await? {
        Some(category) => Ok((
            StatusCode::CREATED,
            Json(ApiResponse::success(
                Some(category),
                Some("Category created".to_string()),
                None,
            )),
        )),
        None => Ok((
            StatusCode::OK,
            Json(ApiResponse::success(
                None,
                Some("No category created: name was empty".to_string()),
                None,
            )),
        )),
    }
}

#[cfg(test)]
mod tests {
    use axum_test::TestServer;
    use serde_json::json;

    use crate::features::auth::model::AuthenticatedUser;
    use crate::features::categories::routes;
    use crate::features::categories::stores::CategoryStore;
    use crate::shared::test_helpers::{
        admin_user, regular_user, with_auth, InMemoryCategoryStore,
    };

    use super::*;

    fn server_as(user: AuthenticatedUser) -> TestServer {
        let store = Arc::new(InMemoryCategoryStore::default());
        let service = Arc::new(CategoryService::new(store as Arc<dyn CategoryStore>));
        TestServer::new(with_auth(routes::routes(service), user)).unwrap()
    }

    #[tokio::test]
    async fn category_routes_are_admin_only() {
        let server = server_as(regular_user("alice"));

        let response = server.get("/api/categories").await;
        assert_eq!(response.status_code(), StatusCode::FORBIDDEN);

        let response = server
            .post("/api/categories")
            .json(&json!({"name": "Hardware"}))
            .await;
        assert_eq!(response.status_code(), StatusCode::FORBIDDEN);
    }

    #[tokio::test]
    async fn admin_creates_and_lists_categories() {
        let server = server_as(admin_user());

        let response = server
            .post("/api/categories")
            .json(&json!({"name": "Hardware"}))
            .await;
        assert_eq!(response.status_code(), StatusCode::CREATED);
        let body: ApiResponse<CategoryResponseDto> = response.json();
        assert_eq!(body.message.as_deref(), Some("Category created"));

        let body: ApiResponse<Vec<CategoryResponseDto>> =
            server.get("/api/categories").await.json();
        let categories = body.data.unwrap();
        assert_eq!(categories.len(), 1);
        assert_eq!(categories[0].name, "Hardware");
    }

    #[tokio::test]
    async fn blank_name_creates_nothing_without_an_error() {
        let server = server_as(admin_user());

        let response = server
            .post("/api/categories")
            .json(&json!({"name": "   "}))
            .await;
        assert_eq!(response.status_code(), StatusCode::OK);
        let body: ApiResponse<CategoryResponseDto> = response.json();
        assert!(body.data.is_none());
        assert_eq!(
            body.message.as_deref(),
            Some("No category created: name was empty")
        );

        let body: ApiResponse<Vec<CategoryResponseDto>> =
            server.get("/api/categories").await.json();
        assert!(body.data.unwrap().is_empty());
    }
}
