use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::domain::error::StoreError;
use crate::domain::post::Post;

#[derive(Debug, Clone)]
pub(crate) struct NewPost {
    pub(crate) id: Uuid,
    pub(crate) title: String,
    pub(crate) content: String,
    pub(crate) image: Option<String>,
    pub(crate) user_id: Uuid,
    pub(crate) created_at: DateTime<Utc>,
    pub(crate) updated_at: DateTime<Utc>,
}

/// Partial update. `None` content fields are left untouched; owner and
/// `updated_at` are always written.
#[derive(Debug, Clone)]
pub(crate) struct PostPatch {
    pub(crate) title: Option<String>,
    pub(crate) content: Option<String>,
    pub(crate) image: Option<String>,
    pub(crate) user_id: Uuid,
    pub(crate) updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Pagination {
    pub(crate) offset: i64,
    pub(crate) limit: i64,
}

#[async_trait]
pub(crate) trait PostRepository: Send + Sync {
    async fn create_post(&self, input: NewPost) -> Result<Post, StoreError>;
    async fn get_post(&self, id: Uuid) -> Result<Option<Post>, StoreError>;
    /// Newest first (`created_at DESC, id DESC`), stable across pages.
    async fn list_posts(&self, pagination: Pagination) -> Result<Vec<Post>, StoreError>;
    async fn update_post(&self, id: Uuid, patch: PostPatch) -> Result<Option<Post>, StoreError>;
    /// Returns the number of rows removed.
    async fn delete_post(&self, id: Uuid) -> Result<u64, StoreError>;
}

pub(crate) type DynPostRepository = Arc<dyn PostRepository>;

#[async_trait]
impl<R: PostRepository + ?Sized> PostRepository for Arc<R> {
    async fn create_post(&self, input: NewPost) -> Result<Post, StoreError> {
        (**self).create_post(input).await
    }

    async fn get_post(&self, id: Uuid) -> Result<Option<Post>, StoreError> {
        (**self).get_post(id).await
    }

    async fn list_posts(&self, pagination: Pagination) -> Result<Vec<Post>, StoreError> {
        (**self).list_posts(pagination).await
    }

    async fn update_post(&self, id: Uuid, patch: PostPatch) -> Result<Option<Post>, StoreError> {
        (**self).update_post(id, patch).await
    }

    async fn delete_post(&self, id: Uuid) -> Result<u64, StoreError> {
        (**self).delete_post(id).await
    }
}
