//! Repository traits (ports) - pool-level reads and content CRUD
//!
//! The domain layer defines what it needs, and the infrastructure layer
//! provides the implementation. None of these write the engagement counters;
//! those only change through a [`UnitOfWork`](super::UnitOfWork).

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::entities::{Blog, Comment, Reaction, Subject};
use crate::error::DomainError;
use crate::value_objects::{BlogId, CommentId, UserId};

/// Result type for repository operations
pub type RepoResult<T> = Result<T, DomainError>;

// ============================================================================
// Blog Repository
// ============================================================================

/// One page of blogs plus the total number available
#[derive(Debug, Clone, Default)]
pub struct BlogPage {
    pub blogs: Vec<Blog>,
    pub total: i64,
}

/// Listing order. Every popularity order is descending, ties newest first.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BlogSort {
    #[default]
    Newest,
    Views,
    Comments,
    Likes,
    Dislikes,
}

impl BlogSort {
    /// Counter the order is keyed on, `None` for plain recency
    pub fn counter(self, blog: &Blog) -> Option<i64> {
        let counters = &blog.counters;
        match self {
            Self::Newest => None,
            Self::Views => Some(counters.view_count),
            Self::Comments => Some(counters.comment_count),
            Self::Likes => Some(counters.reactions.like_count),
            Self::Dislikes => Some(counters.reactions.dislike_count),
        }
    }
}

/// Blog listing query: paging, order and an optional title filter
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BlogQuery {
    /// 1-based page number
    pub page: i64,
    /// Page size, clamped to 1..=100 by [`BlogQuery::limit`]
    pub limit: i64,
    pub sort: BlogSort,
    /// Case-insensitive substring the title must contain
    pub title: Option<String>,
}

impl BlogQuery {
    pub fn new(page: i64, limit: i64) -> Self {
        Self {
            page,
            limit,
            sort: BlogSort::default(),
            title: None,
        }
    }

    pub fn sorted_by(mut self, sort: BlogSort) -> Self {
        self.sort = sort;
        self
    }

    /// Filter by title; blank input means no filter
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        let title = title.into();
        let trimmed = title.trim();
        self.title = (!trimmed.is_empty()).then(|| trimmed.to_string());
        self
    }

    pub fn limit(&self) -> i64 {
        self.limit.clamp(1, 100)
    }

    /// Rows to skip, or `None` when the page lies past any addressable row
    pub fn offset(&self) -> Option<i64> {
        self.page.max(1).saturating_sub(1).checked_mul(self.limit())
    }

    /// Whether `blog` passes the title filter
    pub fn matches(&self, blog: &Blog) -> bool {
        match self.title.as_deref() {
            Some(needle) => blog.title.to_lowercase().contains(&needle.to_lowercase()),
            None => true,
        }
    }
}

#[async_trait]
pub trait BlogRepository: Send + Sync {
    /// Find blog by ID
    async fn find_by_id(&self, id: BlogId) -> RepoResult<Option<Blog>>;

    /// List blogs matching `query`. A page past the end is empty, not an error.
    async fn list(&self, query: &BlogQuery) -> RepoResult<BlogPage>;

    /// Create a new blog (counters are always stored as zero)
    async fn create(&self, blog: &Blog) -> RepoResult<()>;

    /// Update title, content, images and tags
    async fn update(&self, blog: &Blog) -> RepoResult<()>;

    /// Delete a blog together with its comments, reactions and view marks
    async fn delete(&self, id: BlogId) -> RepoResult<()>;
}

// ============================================================================
// Comment Repository
// ============================================================================

#[async_trait]
pub trait CommentRepository: Send + Sync {
    /// Find comment by ID
    async fn find_by_id(&self, id: CommentId) -> RepoResult<Option<Comment>>;

    /// List comments of a blog, oldest first
    async fn find_by_blog(&self, blog_id: BlogId) -> RepoResult<Vec<Comment>>;

    /// Update comment content
    async fn update(&self, comment: &Comment) -> RepoResult<()>;
}

// ============================================================================
// Reaction Repository
// ============================================================================

#[async_trait]
pub trait ReactionRepository: Send + Sync {
    /// Read a user's reaction outside of any transaction
    async fn find(&self, subject: Subject, user_id: UserId) -> RepoResult<Option<Reaction>>;
}

// ============================================================================
// Health
// ============================================================================

#[async_trait]
pub trait StoreHealth: Send + Sync {
    /// Verify the backing store is reachable
    async fn ping(&self) -> RepoResult<()>;
}
