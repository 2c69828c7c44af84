use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use crate::data::post_repository::{NewPost, Pagination, PostPatch, PostRepository};
use crate::domain::error::StoreError;
use crate::domain::post::Post;

#[derive(Debug, Clone)]
pub(crate) struct PostgresPostRepository {
    pool: PgPool,
}

impl PostgresPostRepository {
    pub(crate) fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(sqlx::FromRow)]
struct PostRow {
    id: Uuid,
    title: String,
    content: String,
    image: Option<String>,
    user_id: Uuid,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

#[async_trait]
impl PostRepository for PostgresPostRepository {
    async fn create_post(&self, input: NewPost) -> Result<Post, StoreError> {
        let row = sqlx::query_as::<_, PostRow>(
            r#"
            INSERT INTO posts (id, title, content, image, user_id, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING id, title, content, image, user_id, created_at, updated_at
            "#,
        )
        .bind(input.id)
        .bind(input.title)
        .bind(input.content)
        .bind(input.image)
        .bind(input.user_id)
        .bind(input.created_at)
        .bind(input.updated_at)
        .fetch_one(&self.pool)
        .await
        .map_err(map_post_db_error)?;

        map_row_to_post(row)
    }

    async fn get_post(&self, id: Uuid) -> Result<Option<Post>, StoreError> {
        let row = sqlx::query_as::<_, PostRow>(
            r#"
            SELECT
            id,
            title,
            content,
            image,
            user_id,
            created_at,
            updated_at
            FROM posts
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_post_db_error)?;

        row.map(map_row_to_post).transpose()
    }

    async fn list_posts(&self, pagination: Pagination) -> Result<Vec<Post>, StoreError> {
        let rows = sqlx::query_as::<_, PostRow>(
            r#"
            SELECT
                id,
                title,
                content,
                image,
                user_id,
                created_at,
                updated_at
            FROM posts
            ORDER BY created_at DESC, id DESC
            LIMIT $1
            OFFSET $2
            "#,
        )
        .bind(pagination.limit)
        .bind(pagination.offset)
        .fetch_all(&self.pool)
        .await
        .map_err(map_post_db_error)?;

        rows.into_iter().map(map_row_to_post).collect()
    }

    async fn update_post(&self, id: Uuid, patch: PostPatch) -> Result<Option<Post>, StoreError> {
        let row = sqlx::query_as::<_, PostRow>(
            r#"
            UPDATE posts
            SET title = COALESCE($2, title),
                content = COALESCE($3, content),
                image = COALESCE($4, image),
                user_id = $5,
                updated_at = GREATEST($6, created_at)
            WHERE id = $1
            RETURNING id, title, content, image, user_id, created_at, updated_at
            "#,
        )
        .bind(id)
        .bind(patch.title)
        .bind(patch.content)
        .bind(patch.image)
        .bind(patch.user_id)
        .bind(patch.updated_at)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_post_db_error)?;

        row.map(map_row_to_post).transpose()
    }

    async fn delete_post(&self, id: Uuid) -> Result<u64, StoreError> {
        let result = sqlx::query(
            r#"
            DELETE FROM posts
            WHERE id = $1
            "#,
        )
        .bind(id)
        .execute(&self.pool)
        .await
        .map_err(map_post_db_error)?;

        Ok(result.rows_affected())
    }
}

fn map_row_to_post(row: PostRow) -> Result<Post, StoreError> {
    Post::new(
        row.id,
        row.title,
        row.content,
        row.image,
        row.user_id,
        row.created_at,
        row.updated_at,
    )
    .map_err(StoreError::Corrupt)
}

fn map_post_db_error(err: sqlx::Error) -> StoreError {
    if let sqlx::Error::Database(db_err) = &err
        && db_err.is_unique_violation()
    {
        let constraint = db_err.constraint().unwrap_or("posts").to_string();
        return StoreError::DuplicateKey { constraint };
    }
    StoreError::Database(err)
}

#[cfg(test)]
mod tests {
    use chrono::Utc;
    use sqlx::postgres::PgPoolOptions;
    use uuid::Uuid;

    use super::PostgresPostRepository;
    use crate::data::post_repository::{NewPost, Pagination, PostPatch, PostRepository};
    use crate::domain::error::StoreError;
    use crate::infrastructure::database::run_migrations;

    fn new_post(title: &str) -> NewPost {
        let now = Utc::now();
        NewPost {
            id: Uuid::new_v4(),
            title: title.to_string(),
            content: "content".to_string(),
            image: None,
            user_id: Uuid::new_v4(),
            created_at: now,
            updated_at: now,
        }
    }

    #[tokio::test]
    #[ignore = "requires running PostgreSQL, set DATABASE_URL"]
    async fn postgres_adapter_contract() {
        let url = std::env::var("DATABASE_URL").expect("DATABASE_URL must be set");
        let pool = PgPoolOptions::new()
            .max_connections(2)
            .connect(&url)
            .await
            .expect("database must be reachable");
        run_migrations(&pool).await.expect("migrations must apply");
        let repo = PostgresPostRepository::new(pool);

        let title = format!("pg title {}", Uuid::new_v4());
        let created = repo
            .create_post(new_post(&title))
            .await
            .expect("insert must succeed");

        let err = repo
            .create_post(new_post(&title))
            .await
            .expect_err("duplicate title must fail");
        match err {
            StoreError::DuplicateKey { constraint } => assert_eq!(constraint, "posts_title_key"),
            other => panic!("expected DuplicateKey, got {other:?}"),
        }

        let fetched = repo
            .get_post(created.id)
            .await
            .expect("select must succeed")
            .expect("row must exist");
        assert_eq!(fetched, created);

        let patch = PostPatch {
            title: None,
            content: Some("changed".to_string()),
            image: None,
            user_id: Uuid::new_v4(),
            updated_at: Utc::now(),
        };
        let updated = repo
            .update_post(created.id, patch.clone())
            .await
            .expect("update must succeed")
            .expect("row must exist");
        assert_eq!(updated.title, title);
        assert_eq!(updated.content, "changed");
        assert_eq!(updated.user_id, patch.user_id);
        assert_eq!(updated.created_at, created.created_at);

        let page = repo
            .list_posts(Pagination { offset: 0, limit: 1 })
            .await
            .expect("list must succeed");
        assert!(page.len() <= 1);

        assert_eq!(repo.delete_post(created.id).await.expect("delete"), 1);
        assert_eq!(repo.delete_post(created.id).await.expect("delete"), 0);
        assert!(repo.get_post(created.id).await.expect("select").is_none());
    }
}
