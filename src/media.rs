//! Attachment upload abstraction.
//!
//! Customers may attach photos or audio clips to a diagnostic request.
//! Storage itself is an external collaborator; this module defines the
//! contract and the concurrent, failure-isolated upload helper.

use crate::error::Result;
use async_trait::async_trait;
use futures::stream::{self, StreamExt};
use tracing::warn;

/// Maximum concurrent attachment uploads.
const MAX_CONCURRENT_UPLOADS: usize = 4;

/// A file attached to a diagnostic request.
#[derive(Debug, Clone)]
pub struct Attachment {
    /// Original file name.
    pub name: String,
    /// Raw file contents.
    pub data: Vec<u8>,
}

/// Trait for media storage backends.
#[async_trait]
pub trait MediaStore: Send + Sync {
    /// Store a file and return its access URL.
    async fn store(&self, name: &str, data: &[u8]) -> Result<String>;
}

/// Upload attachments concurrently.
///
/// Each upload is independent: a failed file is logged and skipped, never
/// blocking the others or failing the request. Returns the URLs of the
/// uploads that succeeded, in input order.
pub async fn upload_all(store: &dyn MediaStore, attachments: &[Attachment]) -> Vec<String> {
    let results: Vec<Option<String>> = stream::iter(attachments)
        .map(|attachment| async move {
            match store.store(&attachment.name, &attachment.data).await {
                Ok(url) => Some(url),
                Err(e) => {
                    warn!("Upload failed for {}: {}", attachment.name, e);
                    None
                }
            }
        })
        .buffered(MAX_CONCURRENT_UPLOADS)
        .collect()
        .await;

    results.into_iter().flatten().collect()
}
