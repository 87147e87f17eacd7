//! Transactional store traits
//!
//! A [`UnitOfWork`] is one open transaction. Every store call made through it
//! shares that transaction; nothing becomes visible until [`UnitOfWork::commit`]
//! succeeds, and dropping it without committing rolls everything back.

use async_trait::async_trait;

use crate::entities::{
    Comment, CounterDelta, Reaction, ReactionCounts, ReactionTally, Stance, Subject, ViewInsert,
    ViewMark,
};
use crate::value_objects::{BlogId, CommentId, UserId};

use super::repositories::RepoResult;

// ============================================================================
// Reaction Store
// ============================================================================

#[async_trait]
pub trait ReactionStore: Send {
    /// Read the reaction of `user_id` on `subject`, locking it for the rest
    /// of the transaction when present
    async fn find_reaction(&mut self, subject: Subject, user_id: UserId)
        -> RepoResult<Option<Reaction>>;

    /// Insert a new reaction. A concurrent insert of the same pair is
    /// reported as `DomainError::WriteConflict`.
    async fn insert_reaction(&mut self, reaction: &Reaction) -> RepoResult<()>;

    /// Change the stance of an existing reaction
    async fn update_reaction(&mut self, subject: Subject, user_id: UserId, stance: Stance)
        -> RepoResult<()>;

    /// Delete an existing reaction
    async fn delete_reaction(&mut self, subject: Subject, user_id: UserId) -> RepoResult<()>;

    /// Count stored reactions per stance
    async fn count_reactions(&mut self, subject: Subject) -> RepoResult<ReactionTally>;
}

// ============================================================================
// Counter Store
// ============================================================================

#[async_trait]
pub trait CounterStore: Send {
    /// Lock the subject row for this transaction. Returns false if it does not exist.
    async fn lock_subject(&mut self, subject: Subject) -> RepoResult<bool>;

    /// Current like/dislike counters
    async fn reaction_counts(&mut self, subject: Subject) -> RepoResult<ReactionCounts>;

    /// Apply a signed delta to both counters in a single atomic update
    async fn apply_reaction_delta(&mut self, subject: Subject, delta: CounterDelta)
        -> RepoResult<ReactionCounts>;

    /// Overwrite both counters with a fresh tally
    async fn overwrite_reaction_counts(&mut self, subject: Subject, tally: ReactionTally)
        -> RepoResult<ReactionCounts>;

    /// Increment `view_count` by one and return the new value
    async fn increment_view_count(&mut self, blog_id: BlogId) -> RepoResult<i64>;

    /// Add `delta` to `comment_count` and return the new value
    async fn adjust_comment_count(&mut self, blog_id: BlogId, delta: i64) -> RepoResult<i64>;
}

// ============================================================================
// View Ledger
// ============================================================================

#[async_trait]
pub trait ViewLedger: Send {
    /// Insert the mark unless one already exists for the (blog, user) pair.
    /// The uniqueness constraint decides; there is no separate pre-check.
    async fn insert_view_if_absent(&mut self, mark: &ViewMark) -> RepoResult<ViewInsert>;

    /// Number of view marks recorded for a blog
    async fn count_views(&mut self, blog_id: BlogId) -> RepoResult<i64>;
}

// ============================================================================
// Comment Store
// ============================================================================

#[async_trait]
pub trait CommentStore: Send {
    /// Insert a comment (its counters are stored as zero)
    async fn insert_comment(&mut self, comment: &Comment) -> RepoResult<()>;

    /// Delete a comment and its reactions, returning the removed row
    async fn delete_comment(&mut self, id: CommentId) -> RepoResult<Option<Comment>>;
}

// ============================================================================
// Unit of Work
// ============================================================================

#[async_trait]
pub trait UnitOfWork: ReactionStore + CounterStore + ViewLedger + CommentStore + Send {
    /// Make every change visible atomically
    async fn commit(self: Box<Self>) -> RepoResult<()>;

    /// Discard every change
    async fn rollback(self: Box<Self>) -> RepoResult<()>;
}

#[async_trait]
pub trait TransactionManager: Send + Sync {
    /// Open a new unit of work
    async fn begin(&self) -> RepoResult<Box<dyn UnitOfWork>>;
}
