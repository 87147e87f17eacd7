//! Route definitions
//!
//! All API routes organized by resource and mounted under /api/v1.

use axum::{
    routing::{delete, get, patch, post, put},
    Router,
};

use crate::handlers::{blogs, comments, health, reactions};
use crate::state::AppState;

/// Create the main API router (health is mounted separately to bypass rate limiting)
pub fn create_router() -> Router<AppState> {
    Router::new().nest("/api/v1", api_v1_routes())
}

/// Health check routes
pub fn health_routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(health::health_check))
        .route("/health/ready", get(health::readiness_check))
}

fn api_v1_routes() -> Router<AppState> {
    Router::new()
        .merge(blog_routes())
        .merge(comment_routes())
}

/// Blog routes, including blog reactions and the blog's comment collection
fn blog_routes() -> Router<AppState> {
    Router::new()
        .route("/blogs", post(blogs::create_blog).get(blogs::list_blogs))
        .route(
            "/blogs/:blog_id",
            get(blogs::get_blog)
                .patch(blogs::update_blog)
                .delete(blogs::delete_blog),
        )
        // Reactions
        .route(
            "/blogs/:blog_id/like",
            put(reactions::like_blog).delete(reactions::unlike_blog),
        )
        .route(
            "/blogs/:blog_id/dislike",
            put(reactions::dislike_blog).delete(reactions::undislike_blog),
        )
        .route("/blogs/:blog_id/reactions/@me", get(reactions::my_blog_reaction))
        .route(
            "/blogs/:blog_id/reactions/:user_id",
            delete(reactions::remove_blog_reaction),
        )
        // Comments
        .route(
            "/blogs/:blog_id/comments",
            post(comments::add_comment).get(comments::list_comments),
        )
}

/// Comment routes
fn comment_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/comments/:comment_id",
            patch(comments::update_comment).delete(comments::remove_comment),
        )
        .route("/comments/:comment_id/reactions", post(reactions::react_comment))
        .route(
            "/comments/:comment_id/reactions/@me",
            get(reactions::my_comment_reaction),
        )
        .route(
            "/comments/:comment_id/reactions/:user_id",
            delete(reactions::remove_comment_reaction),
        )
}
