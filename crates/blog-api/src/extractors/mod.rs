//! Axum extractors for request handling
//!
//! Custom extractors for authentication, validation, paths and pagination.

mod auth;
mod pagination;
mod path;
mod validated;

pub use auth::AuthUser;
pub use pagination::{ApiQuery, Pagination, PaginationParams};
pub use path::{ApiPath, BlogIdPath, BlogUserPath, CommentIdPath, CommentUserPath};
pub use validated::{ApiJson, ValidatedJson};
