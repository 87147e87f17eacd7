//! PostgreSQL implementation of BlogRepository

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::instrument;

use blog_core::entities::Blog;
use blog_core::error::DomainError;
use blog_core::traits::{BlogPage, BlogQuery, BlogRepository, BlogSort, RepoResult};
use blog_core::value_objects::BlogId;

use crate::mappers::{BlogInsert, BlogUpdate};
use crate::models::BlogModel;

use super::error::{map_db_error, map_unique_violation};

/// PostgreSQL implementation of BlogRepository
#[derive(Clone)]
pub struct PgBlogRepository {
    pool: PgPool,
}

impl PgBlogRepository {
    /// Create a new PgBlogRepository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

/// Leading ORDER BY key for a popularity sort
fn order_prefix(sort: BlogSort) -> &'static str {
    match sort {
        BlogSort::Newest => "",
        BlogSort::Views => "view_count DESC, ",
        BlogSort::Comments => "comment_count DESC, ",
        BlogSort::Likes => "like_count DESC, ",
        BlogSort::Dislikes => "dislike_count DESC, ",
    }
}

#[async_trait]
impl BlogRepository for PgBlogRepository {
    #[instrument(skip(self))]
    async fn find_by_id(&self, id: BlogId) -> RepoResult<Option<Blog>> {
        let result = sqlx::query_as::<_, BlogModel>(
            r#"
            SELECT id, author_id, title, content, images, tags,
                   like_count, dislike_count, view_count, comment_count,
                   created_at, updated_at
            FROM blogs
            WHERE id = $1
            "#,
        )
        .bind(id.into_uuid())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.map(Blog::from))
    }

    #[instrument(skip(self))]
    async fn list(&self, query: &BlogQuery) -> RepoResult<BlogPage> {
        let total = sqlx::query_scalar::<_, i64>(
            r#"
            SELECT COUNT(*) FROM blogs
            WHERE ($1::text IS NULL OR strpos(lower(title), lower($1)) > 0)
            "#,
        )
        .bind(query.title.as_deref())
        .fetch_one(&self.pool)
        .await
        .map_err(map_db_error)?;

        let Some(offset) = query.offset() else {
            return Ok(BlogPage {
                blogs: Vec::new(),
                total,
            });
        };

        let sql = format!(
            r#"
            SELECT id, author_id, title, content, images, tags,
                   like_count, dislike_count, view_count, comment_count,
                   created_at, updated_at
            FROM blogs
            WHERE ($1::text IS NULL OR strpos(lower(title), lower($1)) > 0)
            ORDER BY {}created_at DESC, id
            LIMIT $2 OFFSET $3
            "#,
            order_prefix(query.sort)
        );

        let rows = sqlx::query_as::<_, BlogModel>(&sql)
            .bind(query.title.as_deref())
            .bind(query.limit())
            .bind(offset)
            .fetch_all(&self.pool)
            .await
            .map_err(map_db_error)?;

        Ok(BlogPage {
            blogs: rows.into_iter().map(Blog::from).collect(),
            total,
        })
    }

    #[instrument(skip(self, blog), fields(blog_id = %blog.id))]
    async fn create(&self, blog: &Blog) -> RepoResult<()> {
        let insert = BlogInsert::new(blog);

        sqlx::query(
            r#"
            INSERT INTO blogs (id, author_id, title, content, images, tags, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            "#,
        )
        .bind(insert.id)
        .bind(insert.author_id)
        .bind(insert.title)
        .bind(insert.content)
        .bind(insert.images)
        .bind(insert.tags)
        .bind(blog.created_at)
        .bind(blog.updated_at)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            map_unique_violation(e, || {
                DomainError::ValidationError(format!("blog {} already exists", blog.id))
            })
        })?;

        Ok(())
    }

    #[instrument(skip(self, blog), fields(blog_id = %blog.id))]
    async fn update(&self, blog: &Blog) -> RepoResult<()> {
        let update = BlogUpdate::new(blog);

        let result = sqlx::query(
            r#"
            UPDATE blogs
            SET title = $2, content = $3, images = $4, tags = $5, updated_at = $6
            WHERE id = $1
            "#,
        )
        .bind(blog.id.into_uuid())
        .bind(update.title)
        .bind(update.content)
        .bind(update.images)
        .bind(update.tags)
        .bind(blog.updated_at)
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        if result.rows_affected() == 0 {
            return Err(DomainError::BlogNotFound(blog.id));
        }

        Ok(())
    }

    #[instrument(skip(self))]
    async fn delete(&self, id: BlogId) -> RepoResult<()> {
        // comments, reactions and view marks go with it via ON DELETE CASCADE
        let result = sqlx::query("DELETE FROM blogs WHERE id = $1")
            .bind(id.into_uuid())
            .execute(&self.pool)
            .await
            .map_err(map_db_error)?;

        if result.rows_affected() == 0 {
            return Err(DomainError::BlogNotFound(id));
        }

        Ok(())
    }
}
