//! Path parameter extractors
//!
//! Type-safe extraction of UUID identifiers from path parameters.

use axum::{
    async_trait,
    extract::{FromRequestParts, Path},
    http::request::Parts,
};
use blog_core::{BlogId, CommentId, UserId};
use serde::de::DeserializeOwned;
use serde::Deserialize;

use crate::response::ApiError;

/// Path extractor whose rejection is an [`ApiError`]
#[derive(Debug, Clone)]
pub struct ApiPath<T>(pub T);

#[async_trait]
impl<S, T> FromRequestParts<S> for ApiPath<T>
where
    S: Send + Sync,
    T: DeserializeOwned + Send,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(inner) = Path::<T>::from_request_parts(parts, state)
            .await
            .map_err(|e| ApiError::invalid_path(e.to_string()))?;

        Ok(ApiPath(inner))
    }
}

fn parse_id<T>(raw: &str, name: &str) -> Result<T, ApiError>
where
    T: std::str::FromStr,
{
    raw.parse()
        .map_err(|_| ApiError::invalid_path(format!("Invalid {name} format")))
}

/// Path parameters with blog_id
#[derive(Debug, Deserialize)]
pub struct BlogIdPath {
    pub blog_id: String,
}

impl BlogIdPath {
    pub fn blog_id(&self) -> Result<BlogId, ApiError> {
        parse_id(&self.blog_id, "blog_id")
    }
}

/// Path parameters with comment_id
#[derive(Debug, Deserialize)]
pub struct CommentIdPath {
    pub comment_id: String,
}

impl CommentIdPath {
    pub fn comment_id(&self) -> Result<CommentId, ApiError> {
        parse_id(&self.comment_id, "comment_id")
    }
}

/// Path parameters with blog_id and user_id
#[derive(Debug, Deserialize)]
pub struct BlogUserPath {
    pub blog_id: String,
    pub user_id: String,
}

impl BlogUserPath {
    pub fn blog_id(&self) -> Result<BlogId, ApiError> {
        parse_id(&self.blog_id, "blog_id")
    }

    pub fn user_id(&self) -> Result<UserId, ApiError> {
        parse_id(&self.user_id, "user_id")
    }
}

/// Path parameters with comment_id and user_id
#[derive(Debug, Deserialize)]
pub struct CommentUserPath {
    pub comment_id: String,
    pub user_id: String,
}

impl CommentUserPath {
    pub fn comment_id(&self) -> Result<CommentId, ApiError> {
        parse_id(&self.comment_id, "comment_id")
    }

    pub fn user_id(&self) -> Result<UserId, ApiError> {
        parse_id(&self.user_id, "user_id")
    }
}
