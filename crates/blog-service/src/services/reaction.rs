//! Reaction service
//!
//! Moves a user's reaction on a blog or comment between the three states
//! (none, liked, disliked) and keeps the subject's like/dislike counters in
//! step, all inside one unit of work.

use blog_core::entities::{
    CounterDelta, Reaction, ReactionAction, ReactionCounts, ReactionState, Stance, Subject,
};
use blog_core::traits::{CounterStore, ReactionStore, UnitOfWork};
use blog_core::value_objects::{Actor, CounterStrategy, UserId};
use blog_core::DomainError;
use tracing::{debug, info, instrument};

use crate::dto::{ReactionResponse, UserReactionResponse};

use super::context::ServiceContext;
use super::error::ServiceResult;

/// Reaction service
pub struct ReactionService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> ReactionService<'a> {
    /// Create a new ReactionService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Like a subject. Liking twice is a no-op; liking a disliked subject
    /// switches both counters in one write.
    #[instrument(skip(self))]
    pub async fn like(&self, subject: Subject, actor: Actor) -> ServiceResult<ReactionResponse> {
        self.apply(subject, actor.user_id, Intent::Set(Stance::Like)).await
    }

    /// Dislike a subject
    #[instrument(skip(self))]
    pub async fn dislike(&self, subject: Subject, actor: Actor) -> ServiceResult<ReactionResponse> {
        self.apply(subject, actor.user_id, Intent::Set(Stance::Dislike)).await
    }

    /// Withdraw a like. Any other state is left alone.
    #[instrument(skip(self))]
    pub async fn unlike(&self, subject: Subject, actor: Actor) -> ServiceResult<ReactionResponse> {
        self.apply(subject, actor.user_id, Intent::ClearIf(Stance::Like)).await
    }

    /// Withdraw a dislike. Any other state is left alone.
    #[instrument(skip(self))]
    pub async fn undislike(
        &self,
        subject: Subject,
        actor: Actor,
    ) -> ServiceResult<ReactionResponse> {
        self.apply(subject, actor.user_id, Intent::ClearIf(Stance::Dislike)).await
    }

    /// Remove `target`'s reaction, whatever it is.
    ///
    /// Only the reaction's owner or an elevated actor may do this. Removing a
    /// missing reaction of one's own is a no-op; an elevated actor removing
    /// someone else's missing reaction gets `ReactionNotFound`.
    #[instrument(skip(self))]
    pub async fn remove_reaction(
        &self,
        subject: Subject,
        target: UserId,
        actor: Actor,
    ) -> ServiceResult<ReactionResponse> {
        if !actor.may_act_for(target) {
            return Err(DomainError::NotReactionOwner.into());
        }

        let intent = if actor.user_id == target {
            Intent::Clear
        } else {
            Intent::ClearExisting
        };
        self.apply(subject, target, intent).await
    }

    /// Apply a wire-encoded action: 1 likes, 0 removes, -1 dislikes
    #[instrument(skip(self))]
    pub async fn react(
        &self,
        subject: Subject,
        actor: Actor,
        action: i64,
    ) -> ServiceResult<ReactionResponse> {
        let action = i8::try_from(action)
            .map_err(|_| DomainError::InvalidReactionAction(action))
            .and_then(ReactionAction::try_from)?;

        let intent = match action {
            ReactionAction::Like => Intent::Set(Stance::Like),
            ReactionAction::Dislike => Intent::Set(Stance::Dislike),
            ReactionAction::Remove => Intent::Clear,
        };
        self.apply(subject, actor.user_id, intent).await
    }

    /// Current reaction of `user_id` on a subject. Read-only.
    #[instrument(skip(self))]
    pub async fn get_user_reaction(
        &self,
        subject: Subject,
        user_id: UserId,
    ) -> ServiceResult<UserReactionResponse> {
        validate_ids(subject, user_id)?;
        self.ensure_subject_exists(subject).await?;

        let state = self
            .ctx
            .reaction_repo()
            .find(subject, user_id)
            .await?
            .map_or(ReactionState::None, |r| r.state());

        Ok(UserReactionResponse::new(subject, user_id, state))
    }

    async fn apply(
        &self,
        subject: Subject,
        user_id: UserId,
        intent: Intent,
    ) -> ServiceResult<ReactionResponse> {
        validate_ids(subject, user_id)?;

        let strategy = self.ctx.counter_strategy();
        let transactions = self.ctx.transactions();
        let outcome = transactions
            .bounded("reaction", async {
                self.ensure_subject_exists(subject).await?;
                transactions
                    .run("reaction", move |uow| {
                        Box::pin(transition(uow, subject, user_id, intent, strategy))
                    })
                    .await
            })
            .await?;

        if outcome.changed() {
            info!(
                subject = %subject,
                user_id = %user_id,
                from = %outcome.previous,
                to = %outcome.current,
                like_count = outcome.counts.like_count,
                dislike_count = outcome.counts.dislike_count,
                "Reaction changed"
            );
        } else {
            debug!(
                subject = %subject,
                user_id = %user_id,
                state = %outcome.current,
                "Reaction unchanged"
            );
        }

        Ok(ReactionResponse {
            subject_type: subject.kind(),
            subject_id: subject.uuid().to_string(),
            user_id: user_id.to_string(),
            state: outcome.current,
            previous_state: outcome.previous,
            like_count: outcome.counts.like_count,
            dislike_count: outcome.counts.dislike_count,
            changed: outcome.changed(),
        })
    }

    async fn ensure_subject_exists(&self, subject: Subject) -> ServiceResult<()> {
        let exists = match subject {
            Subject::Blog(id) => self.ctx.blog_repo().find_by_id(id).await?.is_some(),
            Subject::Comment(id) => self.ctx.comment_repo().find_by_id(id).await?.is_some(),
        };

        if exists {
            Ok(())
        } else {
            Err(subject.not_found().into())
        }
    }
}

fn validate_ids(subject: Subject, user_id: UserId) -> Result<(), DomainError> {
    if subject.is_nil() {
        return Err(DomainError::InvalidIdentifier(format!(
            "{} id must not be nil",
            subject.kind().as_str()
        )));
    }
    if user_id.is_nil() {
        return Err(DomainError::InvalidIdentifier("user id must not be nil".to_string()));
    }
    Ok(())
}

// ============================================================================
// State transition
// ============================================================================

/// What the caller wants the reaction to become
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Intent {
    Set(Stance),
    Clear,
    /// Clear only if currently in the given stance
    ClearIf(Stance),
    /// Clear, failing when there is nothing to clear
    ClearExisting,
}

impl Intent {
    fn resolve(
        self,
        current: ReactionState,
        user_id: UserId,
    ) -> Result<ReactionState, DomainError> {
        match self {
            Self::Set(stance) => Ok(stance.into()),
            Self::Clear => Ok(ReactionState::None),
            Self::ClearIf(stance) if current == ReactionState::from(stance) => {
                Ok(ReactionState::None)
            }
            Self::ClearIf(_) => Ok(current),
            Self::ClearExisting if current == ReactionState::None => {
                Err(DomainError::ReactionNotFound(user_id))
            }
            Self::ClearExisting => Ok(ReactionState::None),
        }
    }
}

#[derive(Debug, Clone, Copy)]
struct Transition {
    previous: ReactionState,
    current: ReactionState,
    counts: ReactionCounts,
}

impl Transition {
    fn changed(&self) -> bool {
        self.previous != self.current
    }
}

async fn transition(
    uow: &mut dyn UnitOfWork,
    subject: Subject,
    user_id: UserId,
    intent: Intent,
    strategy: CounterStrategy,
) -> ServiceResult<Transition> {
    // serializes every writer of this subject's counters
    if !uow.lock_subject(subject).await? {
        return Err(subject.not_found().into());
    }

    let previous = uow
        .find_reaction(subject, user_id)
        .await?
        .map_or(ReactionState::None, |r| r.state());
    let current = intent.resolve(previous, user_id)?;

    if current == previous {
        let counts = uow.reaction_counts(subject).await?;
        return Ok(Transition {
            previous,
            current,
            counts,
        });
    }

    match (previous.stance(), current.stance()) {
        (None, Some(stance)) => {
            uow.insert_reaction(&Reaction::new(subject, user_id, stance))
                .await?;
        }
        (Some(_), Some(stance)) => uow.update_reaction(subject, user_id, stance).await?,
        (Some(_), None) => uow.delete_reaction(subject, user_id).await?,
        (None, None) => {}
    }

    let counts = match strategy {
        CounterStrategy::Incremental => {
            uow.apply_reaction_delta(subject, CounterDelta::between(previous, current))
                .await?
        }
        CounterStrategy::Recompute => {
            let tally = uow.count_reactions(subject).await?;
            uow.overwrite_reaction_counts(subject, tally).await?
        }
    };

    Ok(Transition {
        previous,
        current,
        counts,
    })
}
