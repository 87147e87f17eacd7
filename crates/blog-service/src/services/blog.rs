//! Blog service
//!
//! Blog creation, listing, search and editing. None of these touch the engagement
//! counters; reading a single blog also records the caller's view.

use blog_core::entities::Blog;
use blog_core::traits::BlogQuery;
use blog_core::value_objects::{Actor, BlogId, UserId};
use blog_core::DomainError;
use tracing::{info, instrument};
use validator::Validate;

use crate::dto::{
    BlogFilter, BlogResponse, CreateBlogRequest, PaginatedResponse, UpdateBlogRequest,
};

use super::context::ServiceContext;
use super::error::ServiceResult;
use super::view::ViewService;

/// Page size used when none is requested
pub const DEFAULT_PAGE_LIMIT: i64 = 20;
/// Largest accepted page size
pub const MAX_PAGE_LIMIT: i64 = 100;

/// Blog service
pub struct BlogService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> BlogService<'a> {
    /// Create a new BlogService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Create a new blog authored by `actor`. Counters start at zero.
    #[instrument(skip(self, request))]
    pub async fn create_blog(
        &self,
        actor: Actor,
        request: CreateBlogRequest,
    ) -> ServiceResult<BlogResponse> {
        request.validate()?;

        let blog = Blog::new(actor.user_id, request.title, request.content)
            .with_images(request.images)
            .with_tags(request.tags);

        self.ctx.blog_repo().create(&blog).await?;

        info!(blog_id = %blog.id, author_id = %blog.author_id, "Blog created");

        Ok(BlogResponse::from(&blog))
    }

    /// Fetch a blog, counting `viewer` as a reader first
    #[instrument(skip(self))]
    pub async fn get_blog(&self, blog_id: BlogId, viewer: UserId) -> ServiceResult<BlogResponse> {
        ViewService::new(self.ctx).record_view(blog_id, viewer).await?;

        let blog = self.find(blog_id).await?;
        Ok(BlogResponse::from(blog))
    }

    /// List blogs in `filter` order, optionally narrowed by title.
    /// `page` is 1-based; `limit` is clamped to 1..=100.
    #[instrument(skip(self))]
    pub async fn list_blogs(
        &self,
        page: Option<i64>,
        limit: Option<i64>,
        filter: BlogFilter,
    ) -> ServiceResult<PaginatedResponse<BlogResponse>> {
        filter.validate()?;

        let page = page.unwrap_or(1).max(1);
        let limit = limit.unwrap_or(DEFAULT_PAGE_LIMIT).clamp(1, MAX_PAGE_LIMIT);

        let mut query = BlogQuery::new(page, limit).sorted_by(filter.sort);
        if let Some(title) = filter.title {
            query = query.with_title(title);
        }

        let result = self.ctx.blog_repo().list(&query).await?;
        let blogs = result.blogs.iter().map(BlogResponse::from).collect();

        Ok(PaginatedResponse::new(blogs, page, limit, result.total))
    }

    /// Edit a blog's content. Author or admin only.
    #[instrument(skip(self, request))]
    pub async fn update_blog(
        &self,
        blog_id: BlogId,
        actor: Actor,
        request: UpdateBlogRequest,
    ) -> ServiceResult<BlogResponse> {
        request.validate()?;

        let mut blog = self.find(blog_id).await?;
        if !actor.may_act_for(blog.author_id) {
            return Err(DomainError::NotAuthor("blog").into());
        }

        if request.is_empty() {
            return Ok(BlogResponse::from(blog));
        }

        if let Some(title) = request.title {
            blog.title = title;
        }
        if let Some(content) = request.content {
            blog.content = content;
        }
        if let Some(images) = request.images {
            blog.images = images;
        }
        if let Some(tags) = request.tags {
            blog.tags = tags;
        }
        blog.touch();

        self.ctx.blog_repo().update(&blog).await?;

        info!(blog_id = %blog_id, editor = %actor.user_id, "Blog updated");

        // counters may have moved since the read; return what is stored now
        let stored = self.find(blog_id).await?;
        Ok(BlogResponse::from(stored))
    }

    /// Delete a blog with its comments, reactions and views. Author or admin only.
    #[instrument(skip(self))]
    pub async fn delete_blog(&self, blog_id: BlogId, actor: Actor) -> ServiceResult<()> {
        let blog = self.find(blog_id).await?;
        if !actor.may_act_for(blog.author_id) {
            return Err(DomainError::NotAuthor("blog").into());
        }

        self.ctx.blog_repo().delete(blog_id).await?;

        info!(blog_id = %blog_id, deleted_by = %actor.user_id, "Blog deleted");

        Ok(())
    }

    async fn find(&self, blog_id: BlogId) -> ServiceResult<Blog> {
        self.ctx
            .blog_repo()
            .find_by_id(blog_id)
            .await?
            .ok_or_else(|| DomainError::BlogNotFound(blog_id).into())
    }
}
