//! Comment handlers

use axum::{extract::State, Json};
use blog_service::{
    ApiResponse, CommentResponse, CommentService, CreateCommentRequest, UpdateCommentRequest,
};

use crate::extractors::{ApiPath, AuthUser, BlogIdPath, CommentIdPath, ValidatedJson};
use crate::response::{ApiResult, Created, NoContent};
use crate::state::AppState;

/// Add comment to blog
///
/// POST /blogs/{blog_id}/comments
pub async fn add_comment(
    State(state): State<AppState>,
    auth: AuthUser,
    ApiPath(path): ApiPath<BlogIdPath>,
    ValidatedJson(request): ValidatedJson<CreateCommentRequest>,
) -> ApiResult<Created<Json<ApiResponse<CommentResponse>>>> {
    let blog_id = path.blog_id()?;

    let service = CommentService::new(state.service_context());
    let response = service.add_comment(blog_id, auth.actor(), request).await?;
    Ok(Created(Json(ApiResponse::new(response))))
}

/// List blog comments, oldest first
///
/// GET /blogs/{blog_id}/comments
pub async fn list_comments(
    State(state): State<AppState>,
    _auth: AuthUser,
    ApiPath(path): ApiPath<BlogIdPath>,
) -> ApiResult<Json<ApiResponse<Vec<CommentResponse>>>> {
    let blog_id = path.blog_id()?;

    let service = CommentService::new(state.service_context());
    let comments = service.list_comments(blog_id).await?;
    Ok(Json(ApiResponse::new(comments)))
}

/// Edit comment
///
/// PATCH /comments/{comment_id}
pub async fn update_comment(
    State(state): State<AppState>,
    auth: AuthUser,
    ApiPath(path): ApiPath<CommentIdPath>,
    ValidatedJson(request): ValidatedJson<UpdateCommentRequest>,
) -> ApiResult<Json<ApiResponse<CommentResponse>>> {
    let comment_id = path.comment_id()?;

    let service = CommentService::new(state.service_context());
    let response = service
        .update_comment(comment_id, auth.actor(), request)
        .await?;
    Ok(Json(ApiResponse::new(response)))
}

/// Remove comment
///
/// DELETE /comments/{comment_id}
pub async fn remove_comment(
    State(state): State<AppState>,
    auth: AuthUser,
    ApiPath(path): ApiPath<CommentIdPath>,
) -> ApiResult<NoContent> {
    let comment_id = path.comment_id()?;

    let service = CommentService::new(state.service_context());
    service.remove_comment(comment_id, auth.actor()).await?;
    Ok(NoContent)
}
