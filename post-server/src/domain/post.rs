use chrono::{DateTime, Utc};
use uuid::Uuid;

use super::error::DomainError;

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Post {
    pub(crate) id: Uuid,
    pub(crate) title: String,
    pub(crate) content: String,
    pub(crate) image: Option<String>,
    pub(crate) user_id: Uuid,
    pub(crate) created_at: DateTime<Utc>,
    pub(crate) updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub(crate) struct CreatePostRequest {
    pub(crate) title: String,
    pub(crate) content: String,
    pub(crate) image: Option<String>,
}

/// Fields left as `None` keep their stored value.
#[derive(Debug, Clone, Default)]
pub(crate) struct UpdatePostRequest {
    pub(crate) title: Option<String>,
    pub(crate) content: Option<String>,
    pub(crate) image: Option<String>,
}

impl Post {
    pub(crate) fn new(
        id: Uuid,
        title: impl Into<String>,
        content: impl Into<String>,
        image: Option<String>,
        user_id: Uuid,
        created_at: DateTime<Utc>,
        updated_at: DateTime<Utc>,
    ) -> Result<Self, String> {
        if updated_at < created_at {
            return Err(format!(
                "post {id}: updated_at {updated_at} is before created_at {created_at}"
            ));
        }

        Ok(Self {
            id,
            title: title.into(),
            content: content.into(),
            image,
            user_id,
            created_at,
            updated_at,
        })
    }
}

/// Post ids arrive as raw path segments. Anything that is not a UUID cannot name a
/// stored post, so it is reported the same way as a missing one.
pub(crate) fn parse_post_id(raw: &str) -> Result<Uuid, DomainError> {
    Uuid::parse_str(raw.trim()).map_err(|_| DomainError::post_not_found())
}
