//! Test fixtures and data generators
//!
//! Request bodies and the response shapes the tests read back.

use std::sync::atomic::{AtomicU64, Ordering};

use serde::{Deserialize, Serialize};

/// Counter for unique test data
static COUNTER: AtomicU64 = AtomicU64::new(1);

/// Get a unique suffix for test data
pub fn unique_suffix() -> u64 {
    COUNTER.fetch_add(1, Ordering::SeqCst)
}

/// `{ "data": ... }` envelope
#[derive(Debug, Deserialize)]
pub struct Data<T> {
    pub data: T,
}

/// Create blog request
#[derive(Debug, Serialize)]
pub struct CreateBlogRequest {
    pub title: String,
    pub content: String,
    pub tags: Vec<String>,
}

impl CreateBlogRequest {
    pub fn unique() -> Self {
        let suffix = unique_suffix();
        Self {
            title: format!("Test Blog {suffix}"),
            content: "Some words about counters.".to_string(),
            tags: vec!["test".to_string()],
        }
    }
}

/// Blog response
#[derive(Debug, Deserialize)]
pub struct BlogResponse {
    pub id: String,
    pub author_id: String,
    pub title: String,
    pub like_count: i64,
    pub dislike_count: i64,
    pub view_count: i64,
    pub comment_count: i64,
}

/// Paginated blog list
#[derive(Debug, Deserialize)]
pub struct BlogPage {
    pub data: Vec<BlogResponse>,
    pub pagination: PaginationMeta,
}

#[derive(Debug, Deserialize)]
pub struct PaginationMeta {
    pub page: i64,
    pub limit: i64,
    pub total: i64,
    pub total_pages: i64,
}

/// Create or edit comment request
#[derive(Debug, Serialize)]
pub struct CommentRequest {
    pub content: String,
}

impl CommentRequest {
    pub fn unique() -> Self {
        Self {
            content: format!("Comment {}", unique_suffix()),
        }
    }
}

/// Comment response
#[derive(Debug, Deserialize)]
pub struct CommentResponse {
    pub id: String,
    pub blog_id: String,
    pub content: String,
    pub like_count: i64,
    pub dislike_count: i64,
}

/// Comment react request
#[derive(Debug, Serialize)]
pub struct ReactRequest {
    pub action: i64,
}

/// Reaction write response
#[derive(Debug, Deserialize)]
pub struct ReactionResponse {
    pub subject_type: String,
    pub subject_id: String,
    pub user_id: String,
    pub state: String,
    pub previous_state: String,
    pub like_count: i64,
    pub dislike_count: i64,
    pub changed: bool,
}

/// Caller's own reaction
#[derive(Debug, Deserialize)]
pub struct UserReactionResponse {
    pub state: String,
}

/// Error body
#[derive(Debug, Deserialize)]
pub struct ErrorBody {
    pub error: ErrorDetail,
}

#[derive(Debug, Deserialize)]
pub struct ErrorDetail {
    pub code: String,
    pub message: String,
}
