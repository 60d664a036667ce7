use crate::domain::error::DomainError;
use crate::domain::post::{Author, BlogPost, PostPatch};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use tracing::{error, info};
use uuid::Uuid;

/// Storage port for the posts collection. Each method is one atomic
/// read-modify-write; there are no cross-record transactions.
#[async_trait]
pub trait PostRepository: Send + Sync {
    async fn insert(&self, post: BlogPost) -> Result<BlogPost, DomainError>;
    async fn find_by_id(&self, id: Uuid) -> Result<Option<BlogPost>, DomainError>;
    /// All records in insertion order.
    async fn list(&self) -> Result<Vec<BlogPost>, DomainError>;
    /// Applies the patch to the record with the given id, leaving `id` and
    /// `created` untouched. Returns `None` when the id is unknown.
    async fn update(&self, id: Uuid, patch: PostPatch) -> Result<Option<BlogPost>, DomainError>;
    /// Returns whether a record was removed.
    async fn delete(&self, id: Uuid) -> Result<bool, DomainError>;
}

#[derive(Clone)]
pub struct PostgresPostRepository {
    pool: PgPool,
}

impl PostgresPostRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(sqlx::FromRow)]
struct PostRow {
    id: Uuid,
    author_first_name: String,
    author_last_name: String,
    title: String,
    content: String,
    created: DateTime<Utc>,
}

impl From<PostRow> for BlogPost {
    fn from(row: PostRow) -> Self {
        BlogPost {
            id: row.id,
            author: Author {
                first_name: row.author_first_name,
                last_name: row.author_last_name,
            },
            title: row.title,
            content: row.content,
            created: row.created,
        }
    }
}

#[async_trait]
impl PostRepository for PostgresPostRepository {
    async fn insert(&self, post: BlogPost) -> Result<BlogPost, DomainError> {
        sqlx::query(
            r#"
            INSERT INTO posts (id, author_first_name, author_last_name, title, content, created)
            VALUES ($1, $2, $3, $4, $5, $6)
            "#,
        )
        .bind(post.id)
        .bind(&post.author.first_name)
        .bind(&post.author.last_name)
        .bind(&post.title)
        .bind(&post.content)
        .bind(post.created)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            error!("failed to insert post: {}", e);
            DomainError::from(e)
        })?;

        info!(post_id = %post.id, "post created");
        Ok(post)
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<BlogPost>, DomainError> {
        let row = sqlx::query_as::<_, PostRow>(
            r#"
            SELECT id, author_first_name, author_last_name, title, content, created
            FROM posts WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            error!("db error find_by_id {}: {}", id, e);
            DomainError::from(e)
        })?;

        Ok(row.map(BlogPost::from))
    }

    async fn list(&self) -> Result<Vec<BlogPost>, DomainError> {
        // seq is a serial column used only to preserve insertion order.
        let rows = sqlx::query_as::<_, PostRow>(
            r#"
            SELECT id, author_first_name, author_last_name, title, content, created
            FROM posts
            ORDER BY seq
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            error!("db error while fetching posts: {}", e);
            DomainError::from(e)
        })?;

        Ok(rows.into_iter().map(BlogPost::from).collect())
    }

    async fn update(&self, id: Uuid, patch: PostPatch) -> Result<Option<BlogPost>, DomainError> {
        let (first_name, last_name) = match patch.author {
            Some(author) => (Some(author.first_name), Some(author.last_name)),
            None => (None, None),
        };

        // Single statement so concurrent patches to the same id serialize
        // in the store. `id` and `created` are never touched.
        let row = sqlx::query_as::<_, PostRow>(
            r#"
            UPDATE posts
            SET
                author_first_name = COALESCE($1, author_first_name),
                author_last_name = COALESCE($2, author_last_name),
                title = COALESCE($3, title),
                content = COALESCE($4, content)
            WHERE id = $5
            RETURNING id, author_first_name, author_last_name, title, content, created
            "#,
        )
        .bind(first_name)
        .bind(last_name)
        .bind(patch.title)
        .bind(patch.content)
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            error!("failed to update post {}: {}", id, e);
            DomainError::from(e)
        })?;

        if row.is_some() {
            info!(post_id = %id, "post updated");
        }

        Ok(row.map(BlogPost::from))
    }

    async fn delete(&self, id: Uuid) -> Result<bool, DomainError> {
        let deleted = sqlx::query("DELETE FROM posts WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(DomainError::from)?;

        let removed = deleted.rows_affected() > 0;
        if removed {
            info!(post_id = %id, "post deleted");
        }
        Ok(removed)
    }
}
