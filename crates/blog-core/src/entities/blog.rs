//! Blog entity - a published post with its engagement counters

use chrono::{DateTime, Utc};

use super::counters::CounterSet;
use crate::value_objects::{BlogId, UserId};

/// Blog entity
///
/// `counters` is a read-only projection for content CRUD: repositories never
/// write it from this struct, only the engagement stores change it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Blog {
    pub id: BlogId,
    pub author_id: UserId,
    pub title: String,
    pub content: String,
    pub images: Vec<String>,
    pub tags: Vec<String>,
    pub counters: CounterSet,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Blog {
    /// Create a new Blog with all counters at zero
    pub fn new(author_id: UserId, title: String, content: String) -> Self {
        let now = Utc::now();
        Self {
            id: BlogId::new(),
            author_id,
            title,
            content,
            images: Vec::new(),
            tags: Vec::new(),
            counters: CounterSet::default(),
            created_at: now,
            updated_at: now,
        }
    }

    pub fn with_images(mut self, images: Vec<String>) -> Self {
        self.images = images;
        self
    }

    pub fn with_tags(mut self, tags: Vec<String>) -> Self {
        self.tags = tags;
        self
    }

    #[inline]
    pub fn is_authored_by(&self, user_id: UserId) -> bool {
        self.author_id == user_id
    }

    /// Mark the content as changed
    pub fn touch(&mut self) {
        self.updated_at = Utc::now();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_blog_starts_at_zero() {
        let author = UserId::new();
        let blog = Blog::new(author, "Title".to_string(), "Body".to_string());

        assert!(blog.is_authored_by(author));
        assert_eq!(blog.counters, CounterSet::default());
        assert_eq!(blog.created_at, blog.updated_at);
    }

    #[test]
    fn test_builder_helpers() {
        let blog = Blog::new(UserId::new(), "t".to_string(), "c".to_string())
            .with_images(vec!["a.png".to_string()])
            .with_tags(vec!["rust".to_string()]);
        assert_eq!(blog.images.len(), 1);
        assert_eq!(blog.tags, vec!["rust".to_string()]);
    }
}
