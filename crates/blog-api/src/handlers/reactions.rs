//! Reaction handlers
//!
//! Blog like/dislike endpoints and the comment react endpoint. Every write
//! responds with the caller's resulting state and the subject's counters.

use axum::{extract::State, Json};
use blog_core::Subject;
use blog_service::{
    ApiResponse, ReactRequest, ReactionResponse, ReactionService, UserReactionResponse,
};

use crate::extractors::{
    ApiJson, ApiPath, AuthUser, BlogIdPath, BlogUserPath, CommentIdPath, CommentUserPath,
};
use crate::response::ApiResult;
use crate::state::AppState;

type ReactionJson = Json<ApiResponse<ReactionResponse>>;

/// Like blog
///
/// PUT /blogs/{blog_id}/like
pub async fn like_blog(
    State(state): State<AppState>,
    auth: AuthUser,
    ApiPath(path): ApiPath<BlogIdPath>,
) -> ApiResult<ReactionJson> {
    let subject = Subject::Blog(path.blog_id()?);

    let service = ReactionService::new(state.service_context());
    let response = service.like(subject, auth.actor()).await?;
    Ok(Json(ApiResponse::new(response)))
}

/// Dislike blog
///
/// PUT /blogs/{blog_id}/dislike
pub async fn dislike_blog(
    State(state): State<AppState>,
    auth: AuthUser,
    ApiPath(path): ApiPath<BlogIdPath>,
) -> ApiResult<ReactionJson> {
    let subject = Subject::Blog(path.blog_id()?);

    let service = ReactionService::new(state.service_context());
    let response = service.dislike(subject, auth.actor()).await?;
    Ok(Json(ApiResponse::new(response)))
}

/// Withdraw a like. No-op unless the caller currently likes the blog.
///
/// DELETE /blogs/{blog_id}/like
pub async fn unlike_blog(
    State(state): State<AppState>,
    auth: AuthUser,
    ApiPath(path): ApiPath<BlogIdPath>,
) -> ApiResult<ReactionJson> {
    let subject = Subject::Blog(path.blog_id()?);

    let service = ReactionService::new(state.service_context());
    let response = service.unlike(subject, auth.actor()).await?;
    Ok(Json(ApiResponse::new(response)))
}

/// Withdraw a dislike. No-op unless the caller currently dislikes the blog.
///
/// DELETE /blogs/{blog_id}/dislike
pub async fn undislike_blog(
    State(state): State<AppState>,
    auth: AuthUser,
    ApiPath(path): ApiPath<BlogIdPath>,
) -> ApiResult<ReactionJson> {
    let subject = Subject::Blog(path.blog_id()?);

    let service = ReactionService::new(state.service_context());
    let response = service.undislike(subject, auth.actor()).await?;
    Ok(Json(ApiResponse::new(response)))
}

/// Remove a user's reaction on a blog (owner or admin)
///
/// DELETE /blogs/{blog_id}/reactions/{user_id}
pub async fn remove_blog_reaction(
    State(state): State<AppState>,
    auth: AuthUser,
    ApiPath(path): ApiPath<BlogUserPath>,
) -> ApiResult<ReactionJson> {
    let subject = Subject::Blog(path.blog_id()?);
    let target = path.user_id()?;

    let service = ReactionService::new(state.service_context());
    let response = service
        .remove_reaction(subject, target, auth.actor())
        .await?;
    Ok(Json(ApiResponse::new(response)))
}

/// Caller's current reaction on a blog
///
/// GET /blogs/{blog_id}/reactions/@me
pub async fn my_blog_reaction(
    State(state): State<AppState>,
    auth: AuthUser,
    ApiPath(path): ApiPath<BlogIdPath>,
) -> ApiResult<Json<ApiResponse<UserReactionResponse>>> {
    let subject = Subject::Blog(path.blog_id()?);

    let service = ReactionService::new(state.service_context());
    let response = service.get_user_reaction(subject, auth.user_id).await?;
    Ok(Json(ApiResponse::new(response)))
}

/// React to a comment: 1 likes, 0 removes, -1 dislikes
///
/// POST /comments/{comment_id}/reactions
pub async fn react_comment(
    State(state): State<AppState>,
    auth: AuthUser,
    ApiPath(path): ApiPath<CommentIdPath>,
    ApiJson(request): ApiJson<ReactRequest>,
) -> ApiResult<ReactionJson> {
    let subject = Subject::Comment(path.comment_id()?);

    let service = ReactionService::new(state.service_context());
    let response = service
        .react(subject, auth.actor(), request.action)
        .await?;
    Ok(Json(ApiResponse::new(response)))
}

/// Remove a user's reaction on a comment (owner or admin)
///
/// DELETE /comments/{comment_id}/reactions/{user_id}
pub async fn remove_comment_reaction(
    State(state): State<AppState>,
    auth: AuthUser,
    ApiPath(path): ApiPath<CommentUserPath>,
) -> ApiResult<ReactionJson> {
    let subject = Subject::Comment(path.comment_id()?);
    let target = path.user_id()?;

    let service = ReactionService::new(state.service_context());
    let response = service
        .remove_reaction(subject, target, auth.actor())
        .await?;
    Ok(Json(ApiResponse::new(response)))
}

/// Caller's current reaction on a comment
///
/// GET /comments/{comment_id}/reactions/@me
pub async fn my_comment_reaction(
    State(state): State<AppState>,
    auth: AuthUser,
    ApiPath(path): ApiPath<CommentIdPath>,
) -> ApiResult<Json<ApiResponse<UserReactionResponse>>> {
    let subject = Subject::Comment(path.comment_id()?);

    let service = ReactionService::new(state.service_context());
    let response = service.get_user_reaction(subject, auth.user_id).await?;
    Ok(Json(ApiResponse::new(response)))
}
