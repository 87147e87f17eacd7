//! Business logic services
//!
//! This module contains the engagement engine (reactions, views and the
//! unit-of-work coordinator) plus the content services that sit around it.

pub mod blog;
pub mod comment;
pub mod context;
pub mod error;
pub mod reaction;
pub mod transaction;
pub mod view;

// Re-export all services for convenience
pub use blog::{BlogService, DEFAULT_PAGE_LIMIT, MAX_PAGE_LIMIT};
pub use comment::CommentService;
pub use context::{ServiceContext, ServiceContextBuilder};
pub use error::{ServiceError, ServiceResult};
pub use reaction::ReactionService;
pub use transaction::TransactionCoordinator;
pub use view::ViewService;
