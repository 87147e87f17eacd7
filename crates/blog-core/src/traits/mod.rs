//! Store and repository traits (ports)

mod repositories;
mod unit_of_work;

pub use repositories::{
    BlogPage, BlogQuery, BlogRepository, BlogSort, CommentRepository, ReactionRepository,
    RepoResult, StoreHealth,
};
pub use unit_of_work::{
    CommentStore, CounterStore, ReactionStore, TransactionManager, UnitOfWork, ViewLedger,
};
