//! Entity to DTO mappers
//!
//! Implements `From` conversions from domain entities to response DTOs.

use blog_core::entities::{Blog, Comment, ReactionState, Subject};
use blog_core::value_objects::UserId;

use super::responses::{BlogResponse, CommentResponse, UserReactionResponse};

// ============================================================================
// Blog Mappers
// ============================================================================

impl From<&Blog> for BlogResponse {
    fn from(blog: &Blog) -> Self {
        Self {
            id: blog.id.to_string(),
            author_id: blog.author_id.to_string(),
            title: blog.title.clone(),
            content: blog.content.clone(),
            images: blog.images.clone(),
            tags: blog.tags.clone(),
            like_count: blog.counters.reactions.like_count,
            dislike_count: blog.counters.reactions.dislike_count,
            view_count: blog.counters.view_count,
            comment_count: blog.counters.comment_count,
            created_at: blog.created_at,
            updated_at: blog.updated_at,
        }
    }
}

impl From<Blog> for BlogResponse {
    fn from(blog: Blog) -> Self {
        Self::from(&blog)
    }
}

// ============================================================================
// Comment Mappers
// ============================================================================

impl From<&Comment> for CommentResponse {
    fn from(comment: &Comment) -> Self {
        Self {
            id: comment.id.to_string(),
            blog_id: comment.blog_id.to_string(),
            author_id: comment.author_id.to_string(),
            content: comment.content.clone(),
            like_count: comment.reactions.like_count,
            dislike_count: comment.reactions.dislike_count,
            created_at: comment.created_at,
            updated_at: comment.updated_at,
        }
    }
}

impl From<Comment> for CommentResponse {
    fn from(comment: Comment) -> Self {
        Self::from(&comment)
    }
}

// ============================================================================
// Reaction Mappers
// ============================================================================

impl UserReactionResponse {
    pub fn new(subject: Subject, user_id: UserId, state: ReactionState) -> Self {
        Self {
            subject_type: subject.kind(),
            subject_id: subject.uuid().to_string(),
            user_id: user_id.to_string(),
            state,
        }
    }
}
