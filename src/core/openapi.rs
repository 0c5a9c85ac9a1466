use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::features::auth;
use crate::features::categories::{dtos as categories_dtos, handlers as categories_handlers};
use crate::features::dashboard::{dtos as dashboard_dtos, handlers as dashboard_handlers};
use crate::features::requests::{
    dtos as requests_dtos, handlers as requests_handlers, models as requests_models,
};
use crate::shared::types::{ApiResponse, Meta};

#[derive(OpenApi)]
#[openapi(
    paths(
        // Requests
        requests_handlers::list_requests,
        requests_handlers::create_request,
        requests_handlers::get_request,
        requests_handlers::update_request_status,
        // Categories (admin)
        categories_handlers::list_categories,
        categories_handlers::create_category,
        // Dashboard (public)
        dashboard_handlers::get_resolved_count,
    ),
    components(
        schemas(
            // Shared
            Meta,
            auth::model::AuthenticatedUser,
            // Requests
            requests_models::RequestStatus,
            requests_dtos::RequestResponseDto,
            requests_dtos::CreateRequestDto,
            requests_dtos::UpdateRequestStatusDto,
            ApiResponse<Vec<requests_dtos::RequestResponseDto>>,
            ApiResponse<requests_dtos::RequestResponseDto>,
            // Categories
            categories_dtos::CategoryResponseDto,
            categories_dtos::CreateCategoryDto,
            ApiResponse<Vec<categories_dtos::CategoryResponseDto>>,
            ApiResponse<categories_dtos::CategoryResponseDto>,
            // Dashboard
            dashboard_dtos::ResolvedCountDto,
        )
    ),
    tags(
        (name = "requests", description = "Request submission and review"),
        (name = "categories", description = "Request categories (admin only)"),
        (name = "dashboard", description = "Public dashboard widgets"),
    ),
    modifiers(&SecurityAddon),
    info(
        title = "Requestdesk API",
        version = "0.1.0",
        description = "API documentation for Requestdesk",
    )
)]
pub struct ApiDoc;

/// Adds Bearer JWT security scheme to OpenAPI spec
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .build(),
                ),
            );
        }
    }
}

/// Modifier to override OpenAPI info from config
pub struct SwaggerInfoModifier {
    pub title: String,
    pub version: String,
    pub description: String,
}

impl Modify for SwaggerInfoModifier {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        openapi.info.title = self.title.clone();
        openapi.info.version = self.version.clone();
        openapi.info.description = Some(self.description.clone());
    }
}
