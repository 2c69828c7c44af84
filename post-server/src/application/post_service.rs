use chrono::Utc;
use tracing::info;
use uuid::Uuid;

use crate::data::post_repository::{NewPost, Pagination, PostPatch, PostRepository};
use crate::domain::error::{DomainError, StoreError};
use crate::domain::pagination::PageRequest;
use crate::domain::post::{CreatePostRequest, Post, UpdatePostRequest};

pub(crate) struct PostService<R: PostRepository> {
    repo: R,
    owner_check: bool,
}

impl<R: PostRepository> PostService<R> {
    pub(crate) fn new(repo: R) -> Self {
        Self {
            repo,
            owner_check: false,
        }
    }

    /// When enabled, only the current owner may update a post. Disabled by default:
    /// any authenticated caller may update a post and becomes its owner.
    pub(crate) fn with_owner_check(mut self, enabled: bool) -> Self {
        self.owner_check = enabled;
        self
    }

    pub(crate) async fn create_post(
        &self,
        caller_id: Uuid,
        req: CreatePostRequest,
    ) -> Result<Post, DomainError> {
        let now = Utc::now();
        let new_post = NewPost {
            id: Uuid::new_v4(),
            title: req.title,
            content: req.content,
            image: req.image,
            user_id: caller_id,
            created_at: now,
            updated_at: now,
        };

        let post = self
            .repo
            .create_post(new_post)
            .await
            .map_err(map_write_error("failed to create post"))?;

        info!(post_id = %post.id, user_id = %caller_id, "post created");
        Ok(post)
    }

    /// Returns the row as written by the store, so `updated_at` reflects this update.
    pub(crate) async fn update_post(
        &self,
        caller_id: Uuid,
        post_id: Uuid,
        req: UpdatePostRequest,
    ) -> Result<Post, DomainError> {
        let existing = self.find_existing(post_id).await?;

        if self.owner_check && existing.user_id != caller_id {
            return Err(DomainError::Forbidden);
        }

        let patch = PostPatch {
            title: req.title,
            content: req.content,
            image: req.image,
            user_id: caller_id,
            updated_at: Utc::now(),
        };

        let post = self
            .repo
            .update_post(post_id, patch)
            .await
            .map_err(map_write_error("failed to update post"))?
            // deleted between the existence check and the write
            .ok_or_else(DomainError::post_not_found)?;

        if existing.user_id != caller_id {
            info!(
                post_id = %post_id,
                previous_owner = %existing.user_id,
                new_owner = %caller_id,
                "post ownership reassigned by update"
            );
        }
        info!(post_id = %post_id, user_id = %caller_id, "post updated");
        Ok(post)
    }

    pub(crate) async fn get_post(&self, post_id: Uuid) -> Result<Post, DomainError> {
        self.find_existing(post_id).await
    }

    pub(crate) async fn list_posts(
        &self,
        page: Option<&str>,
        limit: Option<&str>,
    ) -> Result<Vec<Post>, DomainError> {
        let page = PageRequest::from_raw(page, limit);
        let pagination = Pagination {
            offset: page.offset(),
            limit: page.limit,
        };

        self.repo
            .list_posts(pagination)
            .await
            .map_err(DomainError::internal("failed to fetch posts"))
    }

    pub(crate) async fn delete_post(&self, post_id: Uuid) -> Result<(), DomainError> {
        let removed = self
            .repo
            .delete_post(post_id)
            .await
            .map_err(DomainError::internal("failed to delete post"))?;

        if removed == 0 {
            return Err(DomainError::post_not_found());
        }

        info!(post_id = %post_id, "post deleted");
        Ok(())
    }

    async fn find_existing(&self, post_id: Uuid) -> Result<Post, DomainError> {
        self.repo
            .get_post(post_id)
            .await
            .map_err(DomainError::internal("failed to fetch post"))?
            .ok_or_else(DomainError::post_not_found)
    }
}

fn map_write_error(context: &'static str) -> impl FnOnce(StoreError) -> DomainError {
    move |err| match err {
        StoreError::DuplicateKey { .. } => DomainError::Conflict(DomainError::DUPLICATE_TITLE),
        other => DomainError::internal(context)(other),
    }
}
