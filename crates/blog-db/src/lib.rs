//! # blog-db
//!
//! Storage layer implementing the blog-core store traits.
//!
//! ## Overview
//!
//! - PostgreSQL via SQLx: connection pool, schema migrations, `FromRow`
//!   models, entity mappers, pool-level repositories and a transactional
//!   unit of work ([`PgTransactionManager`]).
//! - [`InMemoryStore`]: the same traits over process-local tables, for
//!   tests and `DATABASE_URL=memory://`.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use blog_db::pool::{create_pool, run_migrations, DatabaseConfig};
//! use blog_db::{PgBlogRepository, PgTransactionManager};
//!
//! async fn example() -> Result<(), Box<dyn std::error::Error>> {
//!     let pool = create_pool(&DatabaseConfig::from_env()).await?;
//!     run_migrations(&pool).await?;
//!     let blogs = PgBlogRepository::new(pool.clone());
//!     let transactions = PgTransactionManager::new(pool);
//!     Ok(())
//! }
//! ```

pub mod mappers;
pub mod memory;
pub mod models;
pub mod pool;
pub mod repositories;

// Re-export commonly used types
pub use memory::InMemoryStore;
pub use pool::{create_pool, create_pool_from_env, run_migrations, DatabaseConfig, PgPool};
pub use repositories::{
    PgBlogRepository, PgCommentRepository, PgReactionRepository, PgTransactionManager,
    PgUnitOfWork,
};
