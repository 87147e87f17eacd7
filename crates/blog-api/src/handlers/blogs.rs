//! Blog handlers
//!
//! Endpoints for blog management. Reading a single blog counts the caller as
//! a viewer.

use axum::{extract::State, Json};
use blog_service::{
    ApiResponse, BlogFilter, BlogResponse, BlogService, CreateBlogRequest, PaginatedResponse,
    UpdateBlogRequest,
};

use crate::extractors::{ApiPath, ApiQuery, AuthUser, BlogIdPath, Pagination, ValidatedJson};
use crate::response::{ApiResult, Created, NoContent};
use crate::state::AppState;

/// Create blog
///
/// POST /blogs
pub async fn create_blog(
    State(state): State<AppState>,
    auth: AuthUser,
    ValidatedJson(request): ValidatedJson<CreateBlogRequest>,
) -> ApiResult<Created<Json<ApiResponse<BlogResponse>>>> {
    let service = BlogService::new(state.service_context());
    let response = service.create_blog(auth.actor(), request).await?;
    Ok(Created(Json(ApiResponse::new(response))))
}

/// List blogs, newest first unless a popularity sort is given
///
/// GET /blogs?page=&limit=&sort=&title=
pub async fn list_blogs(
    State(state): State<AppState>,
    _auth: AuthUser,
    pagination: Pagination,
    ApiQuery(filter): ApiQuery<BlogFilter>,
) -> ApiResult<Json<PaginatedResponse<BlogResponse>>> {
    let service = BlogService::new(state.service_context());
    let response = service
        .list_blogs(Some(pagination.page), Some(pagination.limit), filter)
        .await?;
    Ok(Json(response))
}

/// Get blog by ID
///
/// GET /blogs/{blog_id}
pub async fn get_blog(
    State(state): State<AppState>,
    auth: AuthUser,
    ApiPath(path): ApiPath<BlogIdPath>,
) -> ApiResult<Json<ApiResponse<BlogResponse>>> {
    let blog_id = path.blog_id()?;

    let service = BlogService::new(state.service_context());
    let response = service.get_blog(blog_id, auth.user_id).await?;
    Ok(Json(ApiResponse::new(response)))
}

/// Update blog
///
/// PATCH /blogs/{blog_id}
pub async fn update_blog(
    State(state): State<AppState>,
    auth: AuthUser,
    ApiPath(path): ApiPath<BlogIdPath>,
    ValidatedJson(request): ValidatedJson<UpdateBlogRequest>,
) -> ApiResult<Json<ApiResponse<BlogResponse>>> {
    let blog_id = path.blog_id()?;

    let service = BlogService::new(state.service_context());
    let response = service.update_blog(blog_id, auth.actor(), request).await?;
    Ok(Json(ApiResponse::new(response)))
}

/// Delete blog
///
/// DELETE /blogs/{blog_id}
pub async fn delete_blog(
    State(state): State<AppState>,
    auth: AuthUser,
    ApiPath(path): ApiPath<BlogIdPath>,
) -> ApiResult<NoContent> {
    let blog_id = path.blog_id()?;

    let service = BlogService::new(state.service_context());
    service.delete_blog(blog_id, auth.actor()).await?;
    Ok(NoContent)
}
