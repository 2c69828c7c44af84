use thiserror::Error;

/// Failures reported by a post store adapter.
#[derive(Debug, Error)]
pub(crate) enum StoreError {
    #[error("unique constraint violated: {constraint}")]
    DuplicateKey { constraint: String },

    #[error("stored row is malformed: {0}")]
    Corrupt(String),

    #[error("database error")]
    Database(#[from] sqlx::Error),
}

#[derive(Debug, Error)]
pub(crate) enum DomainError {
    #[error("{0}")]
    NotFound(&'static str),

    #[error("{0}")]
    Conflict(&'static str),

    #[error("not allowed to modify this post")]
    Forbidden,

    #[error("{context}")]
    Internal {
        context: &'static str,
        #[source]
        source: StoreError,
    },
}

impl DomainError {
    pub(crate) const POST_NOT_FOUND: &'static str = "post not found";
    pub(crate) const DUPLICATE_TITLE: &'static str = "post with that title already exists";

    pub(crate) fn post_not_found() -> Self {
        Self::NotFound(Self::POST_NOT_FOUND)
    }

    pub(crate) fn internal(context: &'static str) -> impl FnOnce(StoreError) -> Self {
        move |source| Self::Internal { context, source }
    }
}
