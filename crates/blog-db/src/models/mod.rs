//! Database models - SQLx-compatible structs for PostgreSQL tables

mod blog;
mod comment;
mod reaction;

pub use blog::BlogModel;
pub use comment::CommentModel;
pub use reaction::{ReactionCountsModel, ReactionModel, ReactionTallyModel};
