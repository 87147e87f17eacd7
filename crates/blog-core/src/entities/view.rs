//! View ledger entries

use chrono::{DateTime, Utc};

use crate::value_objects::{BlogId, UserId};

/// Proof that a user has been counted as a viewer of a blog.
/// Unique per (blog, user); never updated or deleted by the engine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewMark {
    pub blog_id: BlogId,
    pub user_id: UserId,
    pub viewed_at: DateTime<Utc>,
}

impl ViewMark {
    pub fn new(blog_id: BlogId, user_id: UserId) -> Self {
        Self {
            blog_id,
            user_id,
            viewed_at: Utc::now(),
        }
    }
}

/// Result of inserting a view mark
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewInsert {
    Inserted,
    AlreadyExists,
}

impl ViewInsert {
    #[inline]
    pub fn is_inserted(&self) -> bool {
        matches!(self, Self::Inserted)
    }
}
