use std::sync::Arc;

use uuid::Uuid;

use crate::core::error::{AppError, Result};
use crate::features::auth::model::AuthenticatedUser;
use crate::features::categories::stores::CategoryStore;
use crate::features::requests::dtos::{AttachmentUpload, CreateRequestDto, RequestResponseDto};
use crate::features::requests::models::{NewRequest, RequestStatus};
use crate::features::requests::routes::REQUEST_LIST_PATH;
use crate::features::requests::stores::RequestStore;
use crate::modules::storage::AttachmentStorage;

/// Service orchestrating the request lifecycle: creation, detail access
/// and admin status updates.
pub struct RequestService {
    store: Arc<dyn RequestStore>,
    categories: Arc<dyn CategoryStore>,
    storage: Arc<dyn AttachmentStorage>,
}

impl RequestService {
    pub fn new(
        store: Arc<dyn RequestStore>,
        categories: Arc<dyn CategoryStore>,
        storage: Arc<dyn AttachmentStorage>,
    ) -> Self {
        Self {
            store,
            categories,
            storage,
        }
    }

    /// List requests visible to the acting user.
    ///
    /// Administrators see every request; everyone else only their own.
    pub async fn list_for(&self, user: &AuthenticatedUser) -> Result<Vec<RequestResponseDto>> {
        let requests = if user.is_admin() {
            self.store.list_all().await?
        } else {
            self.store.list_by_owner(&user.sub).await?
        };

        Ok(requests.into_iter().map(|r| r.into()).collect())
    }

    /// Create a request owned by the acting user.
    ///
    /// The owner always comes from the authenticated identity, never from
    /// the submitted form. The request starts in the initial status.
    pub async fn create(
        &self,
        user: &AuthenticatedUser,
        dto: CreateRequestDto,
        attachment: Option<AttachmentUpload>,
    ) -> Result<RequestResponseDto> {
        self.categories
            .get(dto.category_id)
            .await?
            .ok_or_else(|| {
                AppError::Validation(format!("Unknown category '{}'", dto.category_id))
            })?;

        let attachment_url = match attachment {
            Some(upload) => Some(self.store_attachment(&user.sub, upload).await?),
            None => None,
        };

        let request = self
            .store
            .insert(NewRequest {
                owner_id: user.sub.clone(),
                category_id: dto.category_id,
                title: dto.title,
                description: dto.description,
                attachment_url,
            })
            .await?;

        tracing::info!(
            "Request created: id={}, owner={}, category={}",
            request.id,
            request.owner_id,
            request.category_id
        );

        Ok(request.into())
    }

    /// Fetch a request for the detail view.
    ///
    /// Missing ids are a 404 for every caller, admin or not. A non-owner
    /// without admin rights is sent back to the request list with an error
    /// notification instead of a hard failure.
    pub async fn detail(&self, user: &AuthenticatedUser, id: Uuid) -> Result<RequestResponseDto> {
        let request = self
            .store
            .get(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Request '{}' not found", id)))?;

        if !user.is_admin() && request.owner_id != user.sub {
            return Err(AppError::AccessDenied {
                message: "You do not have access to this request".to_string(),
                location: REQUEST_LIST_PATH.to_string(),
            });
        }

        Ok(request.into())
    }

    /// Update a request's status.
    ///
    /// Admin gating happens at the route boundary. Any status may move to
    /// any other status; a resolved request can be reopened.
    pub async fn update_status(&self, id: Uuid, status: RequestStatus) -> Result<RequestResponseDto> {
        let request = self
            .store
            .update_status(id, status)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Request '{}' not found", id)))?;

        tracing::info!("Request status updated: id={}, status={}", request.id, request.status);

        Ok(request.into())
    }

    async fn store_attachment(&self, owner_id: &str, upload: AttachmentUpload) -> Result<String> {
        let extension = sanitized_extension(&upload.file_name);
        let key = format!("requests/{}/{}.{}", owner_id, Uuid::new_v4(), extension);

        self.storage
            .upload(&key, upload.data, &upload.content_type)
            .await?;

        Ok(self.storage.file_url(&key))
    }
}

/// Object-key extension taken from the uploaded filename.
///
/// Only ASCII alphanumerics survive; filenames without a dot (or whose
/// extension sanitizes away entirely) fall back to "bin" so the key stays
/// a single flat segment.
fn sanitized_extension(file_name: &str) -> String {
    let extension: String = match file_name.rsplit_once('.') {
        Some((_, ext)) => ext.chars().filter(|c| c.is_ascii_alphanumeric()).collect(),
        None => String::new(),
    };

    if extension.is_empty() {
        "bin".to_string()
    } else {
        extension
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::test_helpers::{
        admin_user, regular_user, InMemoryCategoryStore, InMemoryRequestStore, InMemoryStorage,
    };

    struct Fixture {
        service: RequestService,
        categories: Arc<InMemoryCategoryStore>,
        storage: Arc<InMemoryStorage>,
    }

    fn fixture() -> Fixture {
        let categories = Arc::new(InMemoryCategoryStore::default());
        let storage = Arc::new(InMemoryStorage::default());
        let service = RequestService::new(
            Arc::new(InMemoryRequestStore::default()),
            Arc::clone(&categories) as Arc<dyn CategoryStore>,
            Arc::clone(&storage) as Arc<dyn AttachmentStorage>,
        );
        Fixture {
            service,
            categories,
            storage,
        }
    }

    async fn seed_category(fixture: &Fixture) -> Uuid {
        fixture.categories.insert("Hardware").await.unwrap().id
    }

    fn dto(category_id: Uuid, title: &str) -> CreateRequestDto {
        CreateRequestDto {
            title: title.to_string(),
            description: "Something is broken".to_string(),
            category_id,
        }
    }

    #[tokio::test]
    async fn owner_comes_from_the_acting_user() {
        let fx = fixture();
        let category_id = seed_category(&fx).await;
        let user = regular_user("alice");

        let created = fx
            .service
            .create(&user, dto(category_id, "Broken printer"), None)
            .await
            .unwrap();

        assert_eq!(created.owner_id, "alice");
        assert_eq!(created.status, RequestStatus::New);
        assert!(created.attachment_url.is_none());
        assert!(fx.storage.uploads().is_empty());
    }

    #[tokio::test]
    async fn attachment_is_uploaded_and_linked_on_the_request() {
        let fx = fixture();
        let category_id = seed_category(&fx).await;

        let created = fx
            .service
            .create(
                &regular_user("alice"),
                dto(category_id, "Broken printer"),
                Some(AttachmentUpload {
                    data: b"fake image bytes".to_vec(),
                    file_name: "photo.png".to_string(),
                    content_type: "image/png".to_string(),
                }),
            )
            .await
            .unwrap();

        let uploads = fx.storage.uploads();
        assert_eq!(uploads.len(), 1);
        assert!(uploads[0].key.starts_with("requests/alice/"));
        assert!(uploads[0].key.ends_with(".png"));
        assert_eq!(uploads[0].content_type, "image/png");
        assert_eq!(uploads[0].size, 16);
        assert_eq!(
            created.attachment_url.as_deref(),
            Some(fx.storage.file_url(&uploads[0].key).as_str())
        );
    }

    #[test]
    fn extension_falls_back_when_filename_has_no_dot() {
        assert_eq!(sanitized_extension("README"), "bin");
        assert_eq!(sanitized_extension("trailing."), "bin");
        assert_eq!(sanitized_extension("archive.tar.gz"), "gz");
    }

    #[test]
    fn extension_is_stripped_to_alphanumerics() {
        assert_eq!(sanitized_extension("evil.p/ng"), "png");
        assert_eq!(sanitized_extension("report.../.."), "bin");
        assert_eq!(sanitized_extension("notes.tx t"), "txt");
    }

    #[tokio::test]
    async fn create_rejects_unknown_category() {
        let fx = fixture();
        let user = regular_user("alice");

        let err = fx
            .service
            .create(&user, dto(Uuid::new_v4(), "Broken printer"), None)
            .await
            .unwrap_err();

        assert!(matches!(err, AppError::Validation(_)));
        assert!(fx.service.list_for(&admin_user()).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn non_admin_only_sees_own_requests() {
        let fx = fixture();
        let category_id = seed_category(&fx).await;
        let alice = regular_user("alice");
        let bob = regular_user("bob");

        fx.service
            .create(&alice, dto(category_id, "Alice one"), None)
            .await
            .unwrap();
        fx.service
            .create(&bob, dto(category_id, "Bob one"), None)
            .await
            .unwrap();
        fx.service
            .create(&alice, dto(category_id, "Alice two"), None)
            .await
            .unwrap();

        let visible = fx.service.list_for(&alice).await.unwrap();
        assert_eq!(visible.len(), 2);
        assert!(visible.iter().all(|r| r.owner_id == "alice"));

        let titles: Vec<_> = visible.iter().map(|r| r.title.as_str()).collect();
        assert_eq!(titles, vec!["Alice one", "Alice two"]);
    }

    #[tokio::test]
    async fn admin_sees_all_requests() {
        let fx = fixture();
        let category_id = seed_category(&fx).await;

        fx.service
            .create(&regular_user("alice"), dto(category_id, "Alice one"), None)
            .await
            .unwrap();
        fx.service
            .create(&regular_user("bob"), dto(category_id, "Bob one"), None)
            .await
            .unwrap();

        let visible = fx.service.list_for(&admin_user()).await.unwrap();
        assert_eq!(visible.len(), 2);
    }

    #[tokio::test]
    async fn detail_of_missing_request_is_not_found_for_everyone() {
        let fx = fixture();
        let id = Uuid::new_v4();

        for user in [regular_user("alice"), admin_user()] {
            let err = fx.service.detail(&user, id).await.unwrap_err();
            assert!(matches!(err, AppError::NotFound(_)));
        }
    }

    #[tokio::test]
    async fn non_owner_is_redirected_away_from_detail() {
        let fx = fixture();
        let category_id = seed_category(&fx).await;

        let created = fx
            .service
            .create(&regular_user("alice"), dto(category_id, "Alice one"), None)
            .await
            .unwrap();

        let err = fx
            .service
            .detail(&regular_user("bob"), created.id)
            .await
            .unwrap_err();

        match err {
            AppError::AccessDenied { location, .. } => {
                assert_eq!(location, REQUEST_LIST_PATH);
            }
            other => panic!("expected AccessDenied, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn owner_and_admin_can_view_detail() {
        let fx = fixture();
        let category_id = seed_category(&fx).await;
        let alice = regular_user("alice");

        let created = fx
            .service
            .create(&alice, dto(category_id, "Alice one"), None)
            .await
            .unwrap();

        assert_eq!(
            fx.service.detail(&alice, created.id).await.unwrap().id,
            created.id
        );
        assert_eq!(
            fx.service
                .detail(&admin_user(), created.id)
                .await
                .unwrap()
                .id,
            created.id
        );
    }

    #[tokio::test]
    async fn status_can_move_freely_between_values() {
        let fx = fixture();
        let category_id = seed_category(&fx).await;

        let created = fx
            .service
            .create(&regular_user("alice"), dto(category_id, "Alice one"), None)
            .await
            .unwrap();

        let resolved = fx
            .service
            .update_status(created.id, RequestStatus::Resolved)
            .await
            .unwrap();
        assert_eq!(resolved.status, RequestStatus::Resolved);

        // No terminal-state enforcement: a resolved request can be reopened
        let reopened = fx
            .service
            .update_status(created.id, RequestStatus::InProgress)
            .await
            .unwrap();
        assert_eq!(reopened.status, RequestStatus::InProgress);
    }

    #[tokio::test]
    async fn status_update_of_missing_request_is_not_found() {
        let fx = fixture();

        let err = fx
            .service
            .update_status(Uuid::new_v4(), RequestStatus::Resolved)
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
    }
}
