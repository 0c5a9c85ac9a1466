use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use crate::core::error::{AppError, Result};
use crate::features::requests::models::{NewRequest, Request, RequestStatus};

/// Persistence seam for requests.
///
/// List methods return rows in creation order, with the id as a
/// deterministic tiebreaker for equal timestamps. Status updates are
/// last-write-wins; there is no version column or conflict detection.
#[async_trait]
pub trait RequestStore: Send + Sync {
    async fn insert(&self, new: NewRequest) -> Result<Request>;
    async fn get(&self, id: Uuid) -> Result<Option<Request>>;
    async fn list_all(&self) -> Result<Vec<Request>>;
    async fn list_by_owner(&self, owner_id: &str) -> Result<Vec<Request>>;
    /// Returns the updated row, or `None` when no request has that id
    async fn update_status(&self, id: Uuid, status: RequestStatus) -> Result<Option<Request>>;
    async fn count_by_status(&self, status: RequestStatus) -> Result<i64>;
}

const REQUEST_COLUMNS: &str = "id, owner_id, category_id, title, description, \
                               attachment_url, status, created_at, updated_at";

/// Postgres-backed request store
pub struct PgRequestStore {
    pool: PgPool,
}

impl PgRequestStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl RequestStore for PgRequestStore {
    async fn insert(&self, new: NewRequest) -> Result<Request> {
        let request = sqlx::query_as::<_, Request>(&format!(
            r#"
            INSERT INTO requests (owner_id, category_id, title, description, attachment_url, status)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING {REQUEST_COLUMNS}
            "#,
        ))
        .bind(&new.owner_id)
        .bind(new.category_id)
        .bind(&new.title)
        .bind(&new.description)
        .bind(&new.attachment_url)
        .bind(RequestStatus::initial())
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to insert request: {:?}", e);
            AppError::Database(e)
        })?;

        Ok(request)
    }

    async fn get(&self, id: Uuid) -> Result<Option<Request>> {
        let request = sqlx::query_as::<_, Request>(&format!(
            r#"
            SELECT {REQUEST_COLUMNS}
            FROM requests
            WHERE id = $1
            "#,
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to get request by ID: {:?}", e);
            AppError::Database(e)
        })?;

        Ok(request)
    }

    async fn list_all(&self) -> Result<Vec<Request>> {
        let requests = sqlx::query_as::<_, Request>(&format!(
            r#"
            SELECT {REQUEST_COLUMNS}
            FROM requests
            ORDER BY created_at, id
            "#,
        ))
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to list requests: {:?}", e);
            AppError::Database(e)
        })?;

        Ok(requests)
    }

    async fn list_by_owner(&self, owner_id: &str) -> Result<Vec<Request>> {
        let requests = sqlx::query_as::<_, Request>(&format!(
            r#"
            SELECT {REQUEST_COLUMNS}
            FROM requests
            WHERE owner_id = $1
            ORDER BY created_at, id
            "#,
        ))
        .bind(owner_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to list requests by owner: {:?}", e);
            AppError::Database(e)
        })?;

        Ok(requests)
    }

    async fn update_status(&self, id: Uuid, status: RequestStatus) -> Result<Option<Request>> {
        let request = sqlx::query_as::<_, Request>(&format!(
            r#"
            UPDATE requests
            SET status = $2, updated_at = NOW()
            WHERE id = $1
            RETURNING {REQUEST_COLUMNS}
            "#,
        ))
        .bind(id)
        .bind(status)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to update request status: {:?}", e);
            AppError::Database(e)
        })?;

        Ok(request)
    }

    async fn count_by_status(&self, status: RequestStatus) -> Result<i64> {
        let count = sqlx::query_scalar::<_, i64>(
            r#"
            SELECT COUNT(*)
            FROM requests
            WHERE status = $1
            "#,
        )
        .bind(status)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to count requests by status: {:?}", e);
            AppError::Database(e)
        })?;

        Ok(count)
    }
}
