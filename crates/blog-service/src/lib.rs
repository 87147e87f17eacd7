//! # blog-service
//!
//! Application layer: the reaction/view consistency engine, content
//! services, and DTOs.

pub mod dto;
pub mod services;

pub use dto::*;
pub use services::{
    BlogService, CommentService, ReactionService, ServiceContext, ServiceContextBuilder,
    ServiceError, ServiceResult, TransactionCoordinator, ViewService, DEFAULT_PAGE_LIMIT,
    MAX_PAGE_LIMIT,
};
