//! Request DTOs for API endpoints
//!
//! All request DTOs implement `Deserialize` and `Validate` for input validation.

use blog_core::BlogSort;
use serde::Deserialize;
use validator::Validate;

// ============================================================================
// Blog Requests
// ============================================================================

/// Create blog request
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateBlogRequest {
    #[validate(length(min = 1, max = 200, message = "Title must be 1-200 characters"))]
    pub title: String,

    #[validate(length(min = 1, max = 50000, message = "Content must be 1-50000 characters"))]
    pub content: String,

    #[serde(default)]
    #[validate(length(max = 20, message = "At most 20 images"))]
    pub images: Vec<String>,

    #[serde(default)]
    #[validate(length(max = 20, message = "At most 20 tags"))]
    pub tags: Vec<String>,
}

/// Update blog request; absent fields are left unchanged
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct UpdateBlogRequest {
    #[validate(length(min = 1, max = 200, message = "Title must be 1-200 characters"))]
    pub title: Option<String>,

    #[validate(length(min = 1, max = 50000, message = "Content must be 1-50000 characters"))]
    pub content: Option<String>,

    #[validate(length(max = 20, message = "At most 20 images"))]
    pub images: Option<Vec<String>>,

    #[validate(length(max = 20, message = "At most 20 tags"))]
    pub tags: Option<Vec<String>>,
}

impl UpdateBlogRequest {
    pub fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.content.is_none()
            && self.images.is_none()
            && self.tags.is_none()
    }
}

/// Blog listing filter: popularity order and title search
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct BlogFilter {
    #[serde(default)]
    pub sort: BlogSort,

    #[validate(length(max = 200, message = "Title search must be at most 200 characters"))]
    pub title: Option<String>,
}

// ============================================================================
// Comment Requests
// ============================================================================

/// Create comment request
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateCommentRequest {
    #[validate(length(min = 1, max = 2000, message = "Comment must be 1-2000 characters"))]
    pub content: String,
}

/// Update comment request
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct UpdateCommentRequest {
    #[validate(length(min = 1, max = 2000, message = "Comment must be 1-2000 characters"))]
    pub content: String,
}

// ============================================================================
// Reaction Requests
// ============================================================================

/// Comment reaction request: 1 = like, 0 = remove, -1 = dislike
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct ReactRequest {
    pub action: i64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_blog_validation() {
        let valid = CreateBlogRequest {
            title: "Hello".to_string(),
            content: "World".to_string(),
            images: vec![],
            tags: vec!["rust".to_string()],
        };
        assert!(valid.validate().is_ok());

        // Invalid - empty title
        let empty_title = CreateBlogRequest {
            title: String::new(),
            ..valid.clone()
        };
        assert!(empty_title.validate().is_err());

        // Invalid - too many tags
        let many_tags = CreateBlogRequest {
            tags: vec!["t".to_string(); 21],
            ..valid
        };
        assert!(many_tags.validate().is_err());
    }

    #[test]
    fn test_create_blog_defaults_collections() {
        let req: CreateBlogRequest =
            serde_json::from_str(r#"{"title":"a","content":"b"}"#).unwrap();
        assert!(req.images.is_empty());
        assert!(req.tags.is_empty());
    }

    #[test]
    fn test_update_blog_validation() {
        assert!(UpdateBlogRequest::default().is_empty());

        let valid = UpdateBlogRequest {
            title: Some("New".to_string()),
            ..Default::default()
        };
        assert!(valid.validate().is_ok());
        assert!(!valid.is_empty());

        let empty_title = UpdateBlogRequest {
            title: Some(String::new()),
            ..Default::default()
        };
        assert!(empty_title.validate().is_err());
    }

    #[test]
    fn test_blog_filter_parses_sort() {
        let filter: BlogFilter =
            serde_json::from_str(r#"{"sort":"likes","title":"rust"}"#).unwrap();
        assert_eq!(filter.sort, BlogSort::Likes);
        assert_eq!(filter.title.as_deref(), Some("rust"));

        let filter: BlogFilter = serde_json::from_str("{}").unwrap();
        assert_eq!(filter.sort, BlogSort::Newest);
        assert!(serde_json::from_str::<BlogFilter>(r#"{"sort":"oldest"}"#).is_err());

        let too_long = BlogFilter {
            title: Some("a".repeat(201)),
            ..Default::default()
        };
        assert!(too_long.validate().is_err());
    }

    #[test]
    fn test_comment_validation() {
        let valid = CreateCommentRequest {
            content: "Nice post".to_string(),
        };
        assert!(valid.validate().is_ok());

        let too_long = UpdateCommentRequest {
            content: "a".repeat(2001),
        };
        assert!(too_long.validate().is_err());
    }

    #[test]
    fn test_react_request_parses_action() {
        let req: ReactRequest = serde_json::from_str(r#"{"action":-1}"#).unwrap();
        assert_eq!(req.action, -1);
    }
}
