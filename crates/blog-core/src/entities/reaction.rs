//! Reaction entity - a user's like/dislike stance on a blog or comment

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::DomainError;
use crate::value_objects::{BlogId, CommentId, UserId};

/// Kind of entity that can be reacted to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SubjectKind {
    Blog,
    Comment,
}

impl SubjectKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Blog => "blog",
            Self::Comment => "comment",
        }
    }
}

/// Something a reaction points at
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Subject {
    Blog(BlogId),
    Comment(CommentId),
}

impl Subject {
    #[inline]
    pub fn kind(&self) -> SubjectKind {
        match self {
            Self::Blog(_) => SubjectKind::Blog,
            Self::Comment(_) => SubjectKind::Comment,
        }
    }

    #[inline]
    pub fn uuid(&self) -> Uuid {
        match self {
            Self::Blog(id) => id.into_uuid(),
            Self::Comment(id) => id.into_uuid(),
        }
    }

    pub fn is_nil(&self) -> bool {
        self.uuid().is_nil()
    }

    /// The not-found error for this subject
    pub fn not_found(&self) -> DomainError {
        match *self {
            Self::Blog(id) => DomainError::BlogNotFound(id),
            Self::Comment(id) => DomainError::CommentNotFound(id),
        }
    }
}

impl fmt::Display for Subject {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.kind().as_str(), self.uuid())
    }
}

/// A stored stance. Only these two values are ever persisted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Stance {
    Like,
    Dislike,
}

impl Stance {
    /// Storage encoding: 1 for like, -1 for dislike
    #[inline]
    pub const fn as_i16(self) -> i16 {
        match self {
            Self::Like => 1,
            Self::Dislike => -1,
        }
    }

    pub fn from_i16(value: i16) -> Result<Self, DomainError> {
        match value {
            1 => Ok(Self::Like),
            -1 => Ok(Self::Dislike),
            other => Err(DomainError::InternalError(format!(
                "stored reaction has invalid state {other}"
            ))),
        }
    }
}

/// Tri-state reaction as seen by callers. `None` means no stored record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReactionState {
    #[default]
    None,
    Liked,
    Disliked,
}

impl ReactionState {
    /// The stance that would be stored for this state
    #[inline]
    pub fn stance(self) -> Option<Stance> {
        match self {
            Self::None => None,
            Self::Liked => Some(Stance::Like),
            Self::Disliked => Some(Stance::Dislike),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::None => "none",
            Self::Liked => "liked",
            Self::Disliked => "disliked",
        }
    }
}

impl From<Stance> for ReactionState {
    fn from(stance: Stance) -> Self {
        match stance {
            Stance::Like => Self::Liked,
            Stance::Dislike => Self::Disliked,
        }
    }
}

impl From<Option<Stance>> for ReactionState {
    fn from(stance: Option<Stance>) -> Self {
        stance.map_or(Self::None, Self::from)
    }
}

impl fmt::Display for ReactionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Requested reaction change, encoded on the wire as 1 / 0 / -1
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReactionAction {
    Like,
    Remove,
    Dislike,
}

impl TryFrom<i8> for ReactionAction {
    type Error = DomainError;

    fn try_from(value: i8) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(Self::Like),
            0 => Ok(Self::Remove),
            -1 => Ok(Self::Dislike),
            other => Err(DomainError::InvalidReactionAction(i64::from(other))),
        }
    }
}

/// Persisted reaction record
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reaction {
    pub subject: Subject,
    pub user_id: UserId,
    pub stance: Stance,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Reaction {
    pub fn new(subject: Subject, user_id: UserId, stance: Stance) -> Self {
        let now = Utc::now();
        Self {
            subject,
            user_id,
            stance,
            created_at: now,
            updated_at: now,
        }
    }

    #[inline]
    pub fn state(&self) -> ReactionState {
        self.stance.into()
    }
}
