//! Repository implementations
//!
//! PostgreSQL implementations of the store traits defined in blog-core.
//! Pool-level repositories serve reads and content CRUD; every engagement
//! write goes through [`PgUnitOfWork`].

mod blog;
mod comment;
mod error;
mod reaction;
mod unit_of_work;

pub use blog::PgBlogRepository;
pub use comment::PgCommentRepository;
pub use reaction::PgReactionRepository;
pub use unit_of_work::{PgTransactionManager, PgUnitOfWork};
