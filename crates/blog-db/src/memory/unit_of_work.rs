//! In-memory unit of work
//!
//! Holds the store lock for its whole lifetime and works on a private copy
//! of the tables. Commit swaps the copy in; drop or rollback discards it.

use async_trait::async_trait;
use tokio::sync::OwnedMutexGuard;
use tracing::debug;

use blog_core::entities::{
    Blog, Comment, CounterDelta, Reaction, ReactionCounts, ReactionTally, Stance, Subject,
    ViewInsert, ViewMark,
};
use blog_core::error::DomainError;
use blog_core::traits::{
    CommentStore, CounterStore, ReactionStore, RepoResult, UnitOfWork, ViewLedger,
};
use blog_core::value_objects::{BlogId, CommentId, UserId};

use super::state::MemoryState;

pub struct MemoryUnitOfWork {
    committed: OwnedMutexGuard<MemoryState>,
    working: MemoryState,
}

impl MemoryUnitOfWork {
    pub(crate) fn new(committed: OwnedMutexGuard<MemoryState>) -> Self {
        let working = committed.clone();
        Self { committed, working }
    }

    fn blog_mut(&mut self, id: BlogId) -> RepoResult<&mut Blog> {
        self.working
            .blogs
            .get_mut(&id)
            .ok_or(DomainError::BlogNotFound(id))
    }
}

#[async_trait]
impl ReactionStore for MemoryUnitOfWork {
    async fn find_reaction(
        &mut self,
        subject: Subject,
        user_id: UserId,
    ) -> RepoResult<Option<Reaction>> {
        Ok(self.working.reactions.get(&(subject, user_id)).cloned())
    }

    async fn insert_reaction(&mut self, reaction: &Reaction) -> RepoResult<()> {
        if !self.working.subject_exists(reaction.subject) {
            return Err(reaction.subject.not_found());
        }
        let key = (reaction.subject, reaction.user_id);
        if self.working.reactions.contains_key(&key) {
            return Err(DomainError::WriteConflict);
        }
        self.working.reactions.insert(key, reaction.clone());
        Ok(())
    }

    async fn update_reaction(
        &mut self,
        subject: Subject,
        user_id: UserId,
        stance: Stance,
    ) -> RepoResult<()> {
        let reaction = self
            .working
            .reactions
            .get_mut(&(subject, user_id))
            .ok_or(DomainError::WriteConflict)?;
        reaction.stance = stance;
        reaction.updated_at = chrono::Utc::now();
        Ok(())
    }

    async fn delete_reaction(&mut self, subject: Subject, user_id: UserId) -> RepoResult<()> {
        self.working
            .reactions
            .remove(&(subject, user_id))
            .map(|_| ())
            .ok_or(DomainError::WriteConflict)
    }

    async fn count_reactions(&mut self, subject: Subject) -> RepoResult<ReactionTally> {
        Ok(self.working.tally(subject))
    }
}

#[async_trait]
impl CounterStore for MemoryUnitOfWork {
    async fn lock_subject(&mut self, subject: Subject) -> RepoResult<bool> {
        // the whole store is already held by this unit of work
        Ok(self.working.subject_exists(subject))
    }

    async fn reaction_counts(&mut self, subject: Subject) -> RepoResult<ReactionCounts> {
        self.working
            .reaction_counts(subject)
            .ok_or_else(|| subject.not_found())
    }

    async fn apply_reaction_delta(
        &mut self,
        subject: Subject,
        delta: CounterDelta,
    ) -> RepoResult<ReactionCounts> {
        let counts = self
            .working
            .reaction_counts_mut(subject)
            .ok_or_else(|| subject.not_found())?;
        *counts = counts
            .checked_apply(delta)
            .ok_or(DomainError::CounterUnderflow("like_count/dislike_count"))?;
        Ok(*counts)
    }

    async fn overwrite_reaction_counts(
        &mut self,
        subject: Subject,
        tally: ReactionTally,
    ) -> RepoResult<ReactionCounts> {
        let counts = self
            .working
            .reaction_counts_mut(subject)
            .ok_or_else(|| subject.not_found())?;
        *counts = ReactionCounts::from(tally);
        Ok(*counts)
    }

    async fn increment_view_count(&mut self, blog_id: BlogId) -> RepoResult<i64> {
        let blog = self.blog_mut(blog_id)?;
        blog.counters.view_count += 1;
        Ok(blog.counters.view_count)
    }

    async fn adjust_comment_count(&mut self, blog_id: BlogId, delta: i64) -> RepoResult<i64> {
        let blog = self.blog_mut(blog_id)?;
        let next = blog.counters.comment_count + delta;
        if next < 0 {
            return Err(DomainError::CounterUnderflow("comment_count"));
        }
        blog.counters.comment_count = next;
        Ok(next)
    }
}

#[async_trait]
impl ViewLedger for MemoryUnitOfWork {
    async fn insert_view_if_absent(&mut self, mark: &ViewMark) -> RepoResult<ViewInsert> {
        if !self.working.blogs.contains_key(&mark.blog_id) {
            return Err(DomainError::BlogNotFound(mark.blog_id));
        }
        let key = (mark.blog_id, mark.user_id);
        if self.working.views.contains_key(&key) {
            return Ok(ViewInsert::AlreadyExists);
        }
        self.working.views.insert(key, mark.clone());
        Ok(ViewInsert::Inserted)
    }

    async fn count_views(&mut self, blog_id: BlogId) -> RepoResult<i64> {
        let marks = self
            .working
            .views
            .keys()
            .filter(|(id, _)| *id == blog_id)
            .count();
        Ok(marks as i64)
    }
}

#[async_trait]
impl CommentStore for MemoryUnitOfWork {
    async fn insert_comment(&mut self, comment: &Comment) -> RepoResult<()> {
        if !self.working.blogs.contains_key(&comment.blog_id) {
            return Err(DomainError::BlogNotFound(comment.blog_id));
        }
        if self.working.comments.contains_key(&comment.id) {
            return Err(DomainError::ValidationError(format!(
                "comment {} already exists",
                comment.id
            )));
        }
        let stored = Comment {
            reactions: ReactionCounts::default(),
            ..comment.clone()
        };
        self.working.comments.insert(comment.id, stored);
        Ok(())
    }

    async fn delete_comment(&mut self, id: CommentId) -> RepoResult<Option<Comment>> {
        Ok(self.working.remove_comment(id))
    }
}

#[async_trait]
impl UnitOfWork for MemoryUnitOfWork {
    async fn commit(self: Box<Self>) -> RepoResult<()> {
        let Self {
            mut committed,
            working,
        } = *self;
        *committed = working;
        debug!("In-memory transaction committed");
        Ok(())
    }

    async fn rollback(self: Box<Self>) -> RepoResult<()> {
        debug!("In-memory transaction rolled back");
        Ok(())
    }
}
