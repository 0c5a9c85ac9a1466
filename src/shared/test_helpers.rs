//! In-memory stores and fixtures for service and handler tests.
//!
//! The in-memory stores mirror the Postgres implementations closely
//! enough for lifecycle tests: rows keep insertion order and status
//! updates are last-write-wins.

use std::sync::Arc;
use std::sync::Mutex;

use async_trait::async_trait;
use axum::{extract::Request, middleware::Next, Router};
use chrono::Utc;
use uuid::Uuid;

use crate::core::error::Result;
use crate::features::auth::model::AuthenticatedUser;
use crate::features::categories::models::Category;
use crate::features::categories::stores::CategoryStore;
use crate::features::requests::models::{NewRequest, Request as TicketRequest, RequestStatus};
use crate::features::requests::stores::RequestStore;
use crate::modules::storage::AttachmentStorage;

pub fn admin_user() -> AuthenticatedUser {
    AuthenticatedUser {
        sub: "admin".to_string(),
        username: Some("admin".to_string()),
        is_superuser: false,
        is_staff: true,
    }
}

pub fn regular_user(sub: &str) -> AuthenticatedUser {
    AuthenticatedUser {
        sub: sub.to_string(),
        username: Some(sub.to_string()),
        is_superuser: false,
        is_staff: false,
    }
}

/// Upload recorded by [`InMemoryStorage`]
#[derive(Debug, Clone)]
pub struct StoredAttachment {
    pub key: String,
    pub content_type: String,
    pub size: usize,
}

/// Object store that records uploads instead of talking to MinIO
#[derive(Default)]
pub struct InMemoryStorage {
    uploads: Mutex<Vec<StoredAttachment>>,
}

impl InMemoryStorage {
    pub fn uploads(&self) -> Vec<StoredAttachment> {
        self.uploads.lock().unwrap().clone()
    }
}

#[async_trait]
impl AttachmentStorage for InMemoryStorage {
    async fn upload(&self, key: &str, data: Vec<u8>, content_type: &str) -> Result<()> {
        self.uploads.lock().unwrap().push(StoredAttachment {
            key: key.to_string(),
            content_type: content_type.to_string(),
            size: data.len(),
        });
        Ok(())
    }

    fn file_url(&self, key: &str) -> String {
        format!("http://storage.local/attachments/{}", key)
    }
}

/// Inject a fixed authenticated user into every request.
///
/// Stands in for the JWT middleware in handler tests.
pub fn with_auth(router: Router, user: AuthenticatedUser) -> Router {
    router.layer(axum::middleware::from_fn(
        move |mut req: Request, next: Next| {
            let user = user.clone();
            async move {
                req.extensions_mut().insert(user);
                next.run(req).await
            }
        },
    ))
}

#[derive(Default)]
pub struct InMemoryCategoryStore {
    categories: Mutex<Vec<Category>>,
}

#[async_trait]
impl CategoryStore for InMemoryCategoryStore {
    async fn insert(&self, name: &str) -> Result<Category> {
        let category = Category {
            id: Uuid::new_v4(),
            name: name.to_string(),
            created_at: Utc::now(),
        };
        self.categories.lock().unwrap().push(category.clone());
        Ok(category)
    }

    async fn list(&self) -> Result<Vec<Category>> {
        Ok(self.categories.lock().unwrap().clone())
    }

    async fn get(&self, id: Uuid) -> Result<Option<Category>> {
        Ok(self
            .categories
            .lock()
            .unwrap()
            .iter()
            .find(|c| c.id == id)
            .cloned())
    }
}

#[derive(Default)]
pub struct InMemoryRequestStore {
    requests: Mutex<Vec<TicketRequest>>,
}

#[async_trait]
impl RequestStore for InMemoryRequestStore {
    async fn insert(&self, new: NewRequest) -> Result<TicketRequest> {
        let now = Utc::now();
        let request = TicketRequest {
            id: Uuid::new_v4(),
            owner_id: new.owner_id,
            category_id: new.category_id,
            title: new.title,
            description: new.description,
            attachment_url: new.attachment_url,
            status: RequestStatus::initial(),
            created_at: now,
            updated_at: now,
        };
        self.requests.lock().unwrap().push(request.clone());
        Ok(request)
    }

    async fn get(&self, id: Uuid) -> Result<Option<TicketRequest>> {
        Ok(self
            .requests
            .lock()
            .unwrap()
            .iter()
            .find(|r| r.id == id)
            .cloned())
    }

    async fn list_all(&self) -> Result<Vec<TicketRequest>> {
        Ok(self.requests.lock().unwrap().clone())
    }

    async fn list_by_owner(&self, owner_id: &str) -> Result<Vec<TicketRequest>> {
        Ok(self
            .requests
            .lock()
            .unwrap()
            .iter()
            .filter(|r| r.owner_id == owner_id)
            .cloned()
            .collect())
    }

    async fn update_status(&self, id: Uuid, status: RequestStatus) -> Result<Option<TicketRequest>> {
        let mut requests = self.requests.lock().unwrap();
        let Some(request) = requests.iter_mut().find(|r| r.id == id) else {
            return Ok(None);
        };
        request.status = status;
        request.updated_at = Utc::now();
        Ok(Some(request.clone()))
    }

    async fn count_by_status(&self, status: RequestStatus) -> Result<i64> {
        Ok(self
            .requests
            .lock()
            .unwrap()
            .iter()
            .filter(|r| r.status == status)
            .count() as i64)
    }
}
