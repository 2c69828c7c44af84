use axum::{
    Json,
    extract::{
        Path, Query, State,
        rejection::{JsonRejection, QueryRejection},
    },
    http::StatusCode,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;
use validator::Validate;

use crate::domain::post::{CreatePostRequest, Post, UpdatePostRequest, parse_post_id};
use crate::presentation::AppState;
use crate::presentation::http::app_error::{AppResult, ErrorBody};
use crate::presentation::http::middleware::auth::AuthenticatedUser;

const SUCCESS: &str = "success";

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub(crate) struct CreatePostDto {
    #[validate(length(min = 1, max = 255))]
    pub(crate) title: String,
    #[validate(length(min = 1))]
    pub(crate) content: String,
    pub(crate) image: Option<String>,
}

/// Omitted fields keep their current value.
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub(crate) struct UpdatePostDto {
    #[validate(length(min = 1, max = 255))]
    pub(crate) title: Option<String>,
    #[validate(length(min = 1))]
    pub(crate) content: Option<String>,
    pub(crate) image: Option<String>,
}

/// Kept as raw strings: malformed values fall back to defaults instead of a 400.
#[derive(Debug, Default, PartialEq, Eq, IntoParams)]
#[into_params(parameter_in = Query)]
pub(crate) struct PageQuery {
    /// 1-based page number, defaults to 1
    pub(crate) page: Option<String>,
    /// Page size, defaults to 10
    pub(crate) limit: Option<String>,
}

impl PageQuery {
    /// First occurrence wins when a key is repeated.
    pub(crate) fn from_pairs(pairs: Vec<(String, String)>) -> Self {
        let mut query = Self::default();
        for (key, value) in pairs {
            match key.as_str() {
                "page" if query.page.is_none() => query.page = Some(value),
                "limit" if query.limit.is_none() => query.limit = Some(value),
                _ => {}
            }
        }
        query
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub(crate) struct PostDto {
    pub(crate) id: Uuid,
    pub(crate) title: String,
    pub(crate) content: String,
    pub(crate) image: Option<String>,
    pub(crate) user_id: Uuid,
    pub(crate) created_at: DateTime<Utc>,
    pub(crate) updated_at: DateTime<Utc>,
}

#[derive(Debug, Serialize, ToSchema)]
pub(crate) struct PostResponseDto {
    pub(crate) status: String,
    pub(crate) data: PostDto,
}

#[derive(Debug, Serialize, ToSchema)]
pub(crate) struct PostListResponseDto {
    pub(crate) status: String,
    pub(crate) results: usize,
    pub(crate) data: Vec<PostDto>,
}

impl From<Post> for PostDto {
    fn from(post: Post) -> Self {
        Self {
            id: post.id,
            title: post.title,
            content: post.content,
            image: post.image,
            user_id: post.user_id,
            created_at: post.created_at,
            updated_at: post.updated_at,
        }
    }
}

impl From<Post> for PostResponseDto {
    fn from(post: Post) -> Self {
        Self {
            status: SUCCESS.to_string(),
            data: PostDto::from(post),
        }
    }
}

impl From<Vec<Post>> for PostListResponseDto {
    fn from(posts: Vec<Post>) -> Self {
        Self {
            status: SUCCESS.to_string(),
            results: posts.len(),
            data: posts.into_iter().map(PostDto::from).collect(),
        }
    }
}

#[utoipa::path(
    get,
    path = "/api/posts",
    tag = "posts",
    security(
        ("bearer_auth" = [])
    ),
    params(PageQuery),
    responses(
        (status = 200, description = "Posts listed", body = PostListResponseDto),
        (status = 401, description = "Unauthorized", body = ErrorBody),
        (status = 502, description = "Storage failure", body = ErrorBody)
    )
)]
pub(crate) async fn list_posts(
    State(state): State<AppState>,
    _auth: AuthenticatedUser,
    raw_query: Result<Query<Vec<(String, String)>>, QueryRejection>,
) -> AppResult<(StatusCode, Json<PostListResponseDto>)> {
    let query = raw_query
        .map(|Query(pairs)| PageQuery::from_pairs(pairs))
        .unwrap_or_default();
    let posts = state
        .post_service
        .list_posts(query.page.as_deref(), query.limit.as_deref())
        .await?;

    Ok((StatusCode::OK, Json(PostListResponseDto::from(posts))))
}

#[utoipa::path(
    get,
    path = "/api/posts/{postId}",
    tag = "posts",
    security(
        ("bearer_auth" = [])
    ),
    params(
        ("postId" = String, Path, description = "Post id (UUID)")
    ),
    responses(
        (status = 200, description = "Post found", body = PostResponseDto),
        (status = 401, description = "Unauthorized", body = ErrorBody),
        (status = 404, description = "Post not found", body = ErrorBody),
        (status = 502, description = "Storage failure", body = ErrorBody)
    )
)]
pub(crate) async fn get_post(
    State(state): State<AppState>,
    _auth: AuthenticatedUser,
    Path(post_id): Path<String>,
) -> AppResult<(StatusCode, Json<PostResponseDto>)> {
    let post_id = parse_post_id(&post_id)?;
    let post = state.post_service.get_post(post_id).await?;

    Ok((StatusCode::OK, Json(PostResponseDto::from(post))))
}

#[utoipa::path(
    post,
    path = "/api/posts",
    tag = "posts",
    security(
        ("bearer_auth" = [])
    ),
    request_body = CreatePostDto,
    responses(
        (status = 201, description = "Post created", body = PostResponseDto),
        (status = 400, description = "Validation error", body = ErrorBody),
        (status = 401, description = "Unauthorized", body = ErrorBody),
        (status = 409, description = "Title already taken", body = ErrorBody),
        (status = 502, description = "Storage failure", body = ErrorBody)
    )
)]
pub(crate) async fn create_post(
    State(state): State<AppState>,
    auth: AuthenticatedUser,
    payload: Result<Json<CreatePostDto>, JsonRejection>,
) -> AppResult<(StatusCode, Json<PostResponseDto>)> {
    let Json(dto) = payload?;
    dto.validate()?;
    let req = CreatePostRequest {
        title: dto.title,
        content: dto.content,
        image: dto.image,
    };

    let post = state.post_service.create_post(auth.user_id, req).await?;
    Ok((StatusCode::CREATED, Json(PostResponseDto::from(post))))
}

#[utoipa::path(
    put,
    path = "/api/posts/{postId}",
    tag = "posts",
    security(
        ("bearer_auth" = [])
    ),
    params(
        ("postId" = String, Path, description = "Post id (UUID)")
    ),
    request_body = UpdatePostDto,
    responses(
        (status = 200, description = "Post updated", body = PostResponseDto),
        (status = 400, description = "Validation error", body = ErrorBody),
        (status = 401, description = "Unauthorized", body = ErrorBody),
        (status = 403, description = "Caller does not own the post (owner check enabled)", body = ErrorBody),
        (status = 404, description = "Post not found", body = ErrorBody),
        (status = 409, description = "Title already taken", body = ErrorBody),
        (status = 502, description = "Storage failure", body = ErrorBody)
    )
)]
pub(crate) async fn update_post(
    State(state): State<AppState>,
    auth: AuthenticatedUser,
    Path(post_id): Path<String>,
    payload: Result<Json<UpdatePostDto>, JsonRejection>,
) -> AppResult<(StatusCode, Json<PostResponseDto>)> {
    let Json(dto) = payload?;
    dto.validate()?;
    let post_id = parse_post_id(&post_id)?;
    let req = UpdatePostRequest {
        title: dto.title,
        content: dto.content,
        image: dto.image,
    };

    let post = state
        .post_service
        .update_post(auth.user_id, post_id, req)
        .await?;
    Ok((StatusCode::OK, Json(PostResponseDto::from(post))))
}

#[utoipa::path(
    delete,
    path = "/api/posts/{postId}",
    tag = "posts",
    security(
        ("bearer_auth" = [])
    ),
    params(
        ("postId" = String, Path, description = "Post id (UUID)")
    ),
    responses(
        (status = 204, description = "Post deleted"),
        (status = 401, description = "Unauthorized", body = ErrorBody),
        (status = 404, description = "Post not found", body = ErrorBody),
        (status = 502, description = "Storage failure", body = ErrorBody)
    )
)]
pub(crate) async fn delete_post(
    State(state): State<AppState>,
    _auth: AuthenticatedUser,
    Path(post_id): Path<String>,
) -> AppResult<StatusCode> {
    let post_id = parse_post_id(&post_id)?;
    state.post_service.delete_post(post_id).await?;
    Ok(StatusCode::NO_CONTENT)
}
