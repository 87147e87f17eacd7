//! Comment entity <-> model mapper

use blog_core::entities::{Comment, ReactionCounts};
use blog_core::value_objects::{BlogId, CommentId, UserId};
use uuid::Uuid;

use crate::models::CommentModel;

impl From<CommentModel> for Comment {
    fn from(model: CommentModel) -> Self {
        Comment {
            id: CommentId::from_uuid(model.id),
            blog_id: BlogId::from_uuid(model.blog_id),
            author_id: UserId::from_uuid(model.author_id),
            content: model.content,
            reactions: ReactionCounts::new(model.like_count, model.dislike_count),
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}

/// Column values for inserting a comment
pub struct CommentInsert<'a> {
    pub id: Uuid,
    pub blog_id: Uuid,
    pub author_id: Uuid,
    pub content: &'a str,
}

impl<'a> CommentInsert<'a> {
    pub fn new(comment: &'a Comment) -> Self {
        Self {
            id: comment.id.into_uuid(),
            blog_id: comment.blog_id.into_uuid(),
            author_id: comment.author_id.into_uuid(),
            content: &comment.content,
        }
    }
}
