//! Storage module for request attachments
//!
//! Provides a MinIO/S3-compatible storage client for attachment uploads.

use async_trait::async_trait;

use crate::core::error::Result;

mod minio_client;

pub use minio_client::MinIOClient;

/// Seam between request handling and the object store.
///
/// Services depend on this trait rather than on the MinIO client so the
/// attachment flow stays testable without a running object store.
#[async_trait]
pub trait AttachmentStorage: Send + Sync {
    /// Store an object under `key` with the given MIME type
    async fn upload(&self, key: &str, data: Vec<u8>, content_type: &str) -> Result<()>;

    /// Publicly reachable URL for a stored object
    fn file_url(&self, key: &str) -> String;
}
