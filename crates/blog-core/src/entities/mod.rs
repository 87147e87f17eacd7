//! Domain entities - core business objects

mod blog;
mod comment;
mod counters;
mod reaction;
mod view;

pub use blog::Blog;
pub use comment::Comment;
pub use counters::{CounterDelta, CounterSet, ReactionCounts, ReactionTally};
pub use reaction::{Reaction, ReactionAction, ReactionState, Stance, Subject, SubjectKind};
pub use view::{ViewInsert, ViewMark};
