//! Denormalized aggregate counters and the arithmetic between reaction states

use serde::{Deserialize, Serialize};

use super::reaction::ReactionState;

/// Like/dislike counters carried by every reactable subject
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ReactionCounts {
    pub like_count: i64,
    pub dislike_count: i64,
}

impl ReactionCounts {
    pub const fn new(like_count: i64, dislike_count: i64) -> Self {
        Self {
            like_count,
            dislike_count,
        }
    }

    /// Apply a delta, refusing to go below zero
    pub fn checked_apply(self, delta: CounterDelta) -> Option<Self> {
        let like_count = self.like_count.checked_add(delta.like)?;
        let dislike_count = self.dislike_count.checked_add(delta.dislike)?;
        if like_count < 0 || dislike_count < 0 {
            return None;
        }
        Some(Self::new(like_count, dislike_count))
    }
}

impl From<ReactionTally> for ReactionCounts {
    fn from(tally: ReactionTally) -> Self {
        Self::new(tally.likes, tally.dislikes)
    }
}

/// Full counter set of a blog post
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct CounterSet {
    #[serde(flatten)]
    pub reactions: ReactionCounts,
    pub view_count: i64,
    pub comment_count: i64,
}

/// Signed change to the like/dislike counters
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CounterDelta {
    pub like: i64,
    pub dislike: i64,
}

impl CounterDelta {
    pub const ZERO: Self = Self { like: 0, dislike: 0 };

    /// Delta produced by moving a single reaction from `from` to `to`.
    ///
    /// A switch between liked and disliked yields both components at once,
    /// so it is always applied as one write.
    pub fn between(from: ReactionState, to: ReactionState) -> Self {
        let weight = |state: ReactionState| match state {
            ReactionState::None => (0, 0),
            ReactionState::Liked => (1, 0),
            ReactionState::Disliked => (0, 1),
        };
        let (from_like, from_dislike) = weight(from);
        let (to_like, to_dislike) = weight(to);
        Self {
            like: to_like - from_like,
            dislike: to_dislike - from_dislike,
        }
    }

    #[inline]
    pub fn is_zero(&self) -> bool {
        *self == Self::ZERO
    }
}

/// Number of stored reactions per stance for one subject
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ReactionTally {
    pub likes: i64,
    pub dislikes: i64,
}
