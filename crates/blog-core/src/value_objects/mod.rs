//! Value objects - immutable types that represent domain concepts

mod counter_strategy;
mod ids;
mod role;

pub use counter_strategy::CounterStrategy;
pub use ids::{BlogId, CommentId, IdParseError, UserId};
pub use role::{Actor, Role};
