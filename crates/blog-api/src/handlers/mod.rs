//! Route handlers
//!
//! All HTTP request handlers organized by resource.

pub mod blogs;
pub mod comments;
pub mod health;
pub mod reactions;
