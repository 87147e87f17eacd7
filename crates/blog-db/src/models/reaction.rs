//! Reaction database models

use chrono::{DateTime, Utc};
use sqlx::FromRow;
use uuid::Uuid;

/// Row of `blog_reactions` or `comment_reactions`
#[derive(Debug, Clone, FromRow)]
pub struct ReactionModel {
    pub subject_id: Uuid,
    pub user_id: Uuid,
    pub state: i16,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Aggregated reaction count per stance (from query)
#[derive(Debug, Clone, FromRow)]
pub struct ReactionTallyModel {
    pub likes: i64,
    pub dislikes: i64,
}

/// Like/dislike counter columns of a subject row
#[derive(Debug, Clone, FromRow)]
pub struct ReactionCountsModel {
    pub like_count: i64,
    pub dislike_count: i64,
}
