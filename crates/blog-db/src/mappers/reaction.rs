//! Reaction entity <-> model mapper

use blog_core::entities::{Reaction, Stance, Subject, SubjectKind};
use blog_core::error::DomainError;
use blog_core::value_objects::UserId;

use crate::models::ReactionModel;

/// Tables backing one kind of reactable subject
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SubjectTables {
    /// Table holding the subject row and its like/dislike counters
    pub subject: &'static str,
    /// Table holding per-user reactions, keyed by (subject_id, user_id)
    pub reactions: &'static str,
}

impl SubjectTables {
    pub const fn of(kind: SubjectKind) -> Self {
        match kind {
            SubjectKind::Blog => Self {
                subject: "blogs",
                reactions: "blog_reactions",
            },
            SubjectKind::Comment => Self {
                subject: "comments",
                reactions: "comment_reactions",
            },
        }
    }

    pub fn for_subject(subject: Subject) -> Self {
        Self::of(subject.kind())
    }
}

/// Rebuild a reaction from its row. The subject is supplied by the caller
/// because the row only carries the raw id.
pub fn reaction_from_model(
    subject: Subject,
    model: ReactionModel,
) -> Result<Reaction, DomainError> {
    Ok(Reaction {
        subject,
        user_id: UserId::from_uuid(model.user_id),
        stance: Stance::from_i16(model.state)?,
        created_at: model.created_at,
        updated_at: model.updated_at,
    })
}
