//! # blog-core
//!
//! Domain layer for the blog engagement backend: identifiers, entities, the
//! tri-state reaction model with its counter arithmetic, and the store traits
//! that infrastructure crates implement.
//! This crate has zero dependencies on infrastructure (database, web framework, etc.).

pub mod entities;
pub mod error;
pub mod traits;
pub mod value_objects;

// Re-export commonly used types at crate root
pub use entities::{
    Blog, Comment, CounterDelta, CounterSet, Reaction, ReactionAction, ReactionCounts,
    ReactionState, ReactionTally, Stance, Subject, SubjectKind, ViewInsert, ViewMark,
};
pub use error::DomainError;
pub use traits::{
    BlogPage, BlogQuery, BlogRepository, BlogSort, CommentRepository, CommentStore, CounterStore,
    ReactionRepository, ReactionStore, RepoResult, StoreHealth, TransactionManager, UnitOfWork,
    ViewLedger,
};
pub use value_objects::{Actor, BlogId, CommentId, CounterStrategy, IdParseError, Role, UserId};
