use std::sync::Mutex;

use async_trait::async_trait;
use uuid::Uuid;

use crate::data::post_repository::{NewPost, Pagination, PostPatch, PostRepository};
use crate::domain::error::StoreError;
use crate::domain::post::Post;

const TITLE_CONSTRAINT: &str = "posts_title_key";

/// Store double with the same uniqueness and ordering rules as the `posts` table.
#[derive(Debug, Default)]
pub(crate) struct InMemoryPostRepository {
    posts: Mutex<Vec<Post>>,
}

impl InMemoryPostRepository {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn len(&self) -> usize {
        self.posts.lock().expect("posts mutex poisoned").len()
    }
}

#[async_trait]
impl PostRepository for InMemoryPostRepository {
    async fn create_post(&self, input: NewPost) -> Result<Post, StoreError> {
        let mut posts = self.posts.lock().expect("posts mutex poisoned");
        if posts.iter().any(|post| post.title == input.title) {
            return Err(StoreError::DuplicateKey {
                constraint: TITLE_CONSTRAINT.to_string(),
            });
        }
        if posts.iter().any(|post| post.id == input.id) {
            return Err(StoreError::DuplicateKey {
                constraint: "posts_pkey".to_string(),
            });
        }

        let post = Post::new(
            input.id,
            input.title,
            input.content,
            input.image,
            input.user_id,
            input.created_at,
            input.updated_at,
        )
        .map_err(StoreError::Corrupt)?;
        posts.push(post.clone());
        Ok(post)
    }

    async fn get_post(&self, id: Uuid) -> Result<Option<Post>, StoreError> {
        let posts = self.posts.lock().expect("posts mutex poisoned");
        Ok(posts.iter().find(|post| post.id == id).cloned())
    }

    async fn list_posts(&self, pagination: Pagination) -> Result<Vec<Post>, StoreError> {
        let mut posts = self.posts.lock().expect("posts mutex poisoned").clone();
        posts.sort_by(|a, b| {
            b.created_at
                .cmp(&a.created_at)
                .then_with(|| b.id.cmp(&a.id))
        });

        let offset = usize::try_from(pagination.offset).unwrap_or(usize::MAX);
        let limit = usize::try_from(pagination.limit).unwrap_or(usize::MAX);
        Ok(posts.into_iter().skip(offset).take(limit).collect())
    }

    async fn update_post(&self, id: Uuid, patch: PostPatch) -> Result<Option<Post>, StoreError> {
        let mut posts = self.posts.lock().expect("posts mutex poisoned");
        if let Some(title) = &patch.title
            && posts.iter().any(|post| post.id != id && &post.title == title)
        {
            return Err(StoreError::DuplicateKey {
                constraint: TITLE_CONSTRAINT.to_string(),
            });
        }

        let Some(post) = posts.iter_mut().find(|post| post.id == id) else {
            return Ok(None);
        };
        if let Some(title) = patch.title {
            post.title = title;
        }
        if let Some(content) = patch.content {
            post.content = content;
        }
        if let Some(image) = patch.image {
            post.image = Some(image);
        }
        post.user_id = patch.user_id;
        post.updated_at = patch.updated_at.max(post.created_at);
        Ok(Some(post.clone()))
    }

    async fn delete_post(&self, id: Uuid) -> Result<u64, StoreError> {
        let mut posts = self.posts.lock().expect("posts mutex poisoned");
        let before = posts.len();
        posts.retain(|post| post.id != id);
        Ok((before - posts.len()) as u64)
    }
}
