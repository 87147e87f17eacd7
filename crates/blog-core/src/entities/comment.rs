//! Comment entity

use chrono::{DateTime, Utc};

use super::counters::ReactionCounts;
use crate::value_objects::{BlogId, CommentId, UserId};

/// Comment on a blog post
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Comment {
    pub id: CommentId,
    pub blog_id: BlogId,
    pub author_id: UserId,
    pub content: String,
    pub reactions: ReactionCounts,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Comment {
    pub fn new(blog_id: BlogId, author_id: UserId, content: String) -> Self {
        let now = Utc::now();
        Self {
            id: CommentId::new(),
            blog_id,
            author_id,
            content,
            reactions: ReactionCounts::default(),
            created_at: now,
            updated_at: now,
        }
    }

    #[inline]
    pub fn is_authored_by(&self, user_id: UserId) -> bool {
        self.author_id == user_id
    }

    /// Replace the content and bump `updated_at`
    pub fn edit(&mut self, content: String) {
        self.content = content;
        self.updated_at = Utc::now();
    }
}
