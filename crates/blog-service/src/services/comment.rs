//! Comment service
//!
//! Adding and removing a comment moves the parent blog's `comment_count` in
//! the same unit of work as the comment row itself.

use blog_core::entities::Comment;
use blog_core::traits::{CommentStore, CounterStore, UnitOfWork};
use blog_core::value_objects::{Actor, BlogId, CommentId};
use blog_core::DomainError;
use tracing::{info, instrument};
use validator::Validate;

use crate::dto::{CommentResponse, CreateCommentRequest, UpdateCommentRequest};

use super::context::ServiceContext;
use super::error::ServiceResult;

/// Comment service
pub struct CommentService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> CommentService<'a> {
    /// Create a new CommentService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Add a comment to a blog
    #[instrument(skip(self, request))]
    pub async fn add_comment(
        &self,
        blog_id: BlogId,
        actor: Actor,
        request: CreateCommentRequest,
    ) -> ServiceResult<CommentResponse> {
        request.validate()?;
        if self.ctx.blog_repo().find_by_id(blog_id).await?.is_none() {
            return Err(DomainError::BlogNotFound(blog_id).into());
        }

        let comment = Comment::new(blog_id, actor.user_id, request.content);
        let comment_count = self
            .ctx
            .transactions()
            .run("add_comment", |uow| {
                let comment = comment.clone();
                Box::pin(insert_comment(uow, comment))
            })
            .await?;

        info!(
            comment_id = %comment.id,
            blog_id = %blog_id,
            author_id = %actor.user_id,
            comment_count,
            "Comment added"
        );

        Ok(CommentResponse::from(&comment))
    }

    /// List a blog's comments, oldest first
    #[instrument(skip(self))]
    pub async fn list_comments(&self, blog_id: BlogId) -> ServiceResult<Vec<CommentResponse>> {
        if self.ctx.blog_repo().find_by_id(blog_id).await?.is_none() {
            return Err(DomainError::BlogNotFound(blog_id).into());
        }

        let comments = self.ctx.comment_repo().find_by_blog(blog_id).await?;
        Ok(comments.iter().map(CommentResponse::from).collect())
    }

    /// Edit a comment. Author or admin only.
    #[instrument(skip(self, request))]
    pub async fn update_comment(
        &self,
        comment_id: CommentId,
        actor: Actor,
        request: UpdateCommentRequest,
    ) -> ServiceResult<CommentResponse> {
        request.validate()?;

        let mut comment = self.find(comment_id).await?;
        if !actor.may_act_for(comment.author_id) {
            return Err(DomainError::NotAuthor("comment").into());
        }

        comment.edit(request.content);
        self.ctx.comment_repo().update(&comment).await?;

        info!(comment_id = %comment_id, editor = %actor.user_id, "Comment updated");

        let stored = self.find(comment_id).await?;
        Ok(CommentResponse::from(stored))
    }

    /// Remove a comment and its reactions. Author or admin only.
    #[instrument(skip(self))]
    pub async fn remove_comment(&self, comment_id: CommentId, actor: Actor) -> ServiceResult<()> {
        let comment = self.find(comment_id).await?;
        if !actor.may_act_for(comment.author_id) {
            return Err(DomainError::NotAuthor("comment").into());
        }

        let comment_count = self
            .ctx
            .transactions()
            .run("remove_comment", move |uow| Box::pin(delete_comment(uow, comment_id)))
            .await?;

        info!(
            comment_id = %comment_id,
            blog_id = %comment.blog_id,
            removed_by = %actor.user_id,
            comment_count,
            "Comment removed"
        );

        Ok(())
    }

    async fn find(&self, comment_id: CommentId) -> ServiceResult<Comment> {
        self.ctx
            .comment_repo()
            .find_by_id(comment_id)
            .await?
            .ok_or_else(|| DomainError::CommentNotFound(comment_id).into())
    }
}

async fn insert_comment(uow: &mut dyn UnitOfWork, comment: Comment) -> ServiceResult<i64> {
    uow.insert_comment(&comment).await?;
    Ok(uow.adjust_comment_count(comment.blog_id, 1).await?)
}

async fn delete_comment(uow: &mut dyn UnitOfWork, comment_id: CommentId) -> ServiceResult<i64> {
    let removed = uow
        .delete_comment(comment_id)
        .await?
        .ok_or(DomainError::CommentNotFound(comment_id))?;
    Ok(uow.adjust_comment_count(removed.blog_id, -1).await?)
}
