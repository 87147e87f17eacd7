//! Query string extractors
//!
//! Extracts page/limit pagination parameters and other query filters.

use axum::{
    async_trait,
    extract::{FromRequestParts, Query},
    http::request::Parts,
};
use blog_service::{DEFAULT_PAGE_LIMIT, MAX_PAGE_LIMIT};
use serde::de::DeserializeOwned;
use serde::Deserialize;

use crate::response::ApiError;

/// Query extractor whose rejection is an [`ApiError`]
#[derive(Debug, Clone, Default)]
pub struct ApiQuery<T>(pub T);

#[async_trait]
impl<S, T> FromRequestParts<S> for ApiQuery<T>
where
    S: Send + Sync,
    T: DeserializeOwned + Send,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Query(inner) = Query::<T>::from_request_parts(parts, state)
            .await
            .map_err(|e| ApiError::invalid_query(e.to_string()))?;

        Ok(ApiQuery(inner))
    }
}

/// Raw pagination query parameters
#[derive(Debug, Default, Deserialize)]
pub struct PaginationParams {
    /// 1-based page number
    #[serde(default)]
    pub page: Option<i64>,
    /// Maximum number of items to return
    #[serde(default)]
    pub limit: Option<i64>,
}

/// Validated pagination parameters
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pagination {
    /// 1-based page number (at least 1)
    pub page: i64,
    /// Page size (clamped to 1-100)
    pub limit: i64,
}

impl Default for Pagination {
    fn default() -> Self {
        Self {
            page: 1,
            limit: DEFAULT_PAGE_LIMIT,
        }
    }
}

impl TryFrom<PaginationParams> for Pagination {
    type Error = ApiError;

    fn try_from(params: PaginationParams) -> Result<Self, Self::Error> {
        let page = params.page.unwrap_or(1);
        if page < 1 {
            return Err(ApiError::invalid_query("'page' must be at least 1"));
        }

        let limit = params
            .limit
            .unwrap_or(DEFAULT_PAGE_LIMIT)
            .clamp(1, MAX_PAGE_LIMIT);

        Ok(Pagination { page, limit })
    }
}

#[async_trait]
impl<S> FromRequestParts<S> for Pagination
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Query(params) = Query::<PaginationParams>::from_request_parts(parts, state)
            .await
            .map_err(|e| ApiError::invalid_query(e.to_string()))?;

        Pagination::try_from(params)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_pagination() {
        let pagination = Pagination::try_from(PaginationParams::default()).unwrap();
        assert_eq!(pagination, Pagination::default());
        assert_eq!(pagination.limit, DEFAULT_PAGE_LIMIT);
    }

    #[test]
    fn test_limit_clamping() {
        let params = PaginationParams {
            page: Some(2),
            limit: Some(500),
        };
        let pagination = Pagination::try_from(params).unwrap();
        assert_eq!(pagination.page, 2);
        assert_eq!(pagination.limit, MAX_PAGE_LIMIT);

        let params = PaginationParams {
            page: None,
            limit: Some(0),
        };
        assert_eq!(Pagination::try_from(params).unwrap().limit, 1);
    }

    #[test]
    fn test_page_must_be_positive() {
        let params = PaginationParams {
            page: Some(0),
            limit: None,
        };
        assert!(matches!(
            Pagination::try_from(params),
            Err(ApiError::InvalidQuery(_))
        ));
    }
}
