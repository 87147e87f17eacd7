//! Blog entity <-> model mapper

use blog_core::entities::{Blog, CounterSet, ReactionCounts};
use blog_core::value_objects::{BlogId, UserId};
use uuid::Uuid;

use crate::models::BlogModel;

/// Convert BlogModel to Blog entity
impl From<BlogModel> for Blog {
    fn from(model: BlogModel) -> Self {
        Blog {
            id: BlogId::from_uuid(model.id),
            author_id: UserId::from_uuid(model.author_id),
            title: model.title,
            content: model.content,
            images: model.images,
            tags: model.tags,
            counters: CounterSet {
                reactions: ReactionCounts::new(model.like_count, model.dislike_count),
                view_count: model.view_count,
                comment_count: model.comment_count,
            },
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}

/// Column values for inserting a blog. Counters are not carried; the
/// table defaults start them at zero.
pub struct BlogInsert<'a> {
    pub id: Uuid,
    pub author_id: Uuid,
    pub title: &'a str,
    pub content: &'a str,
    pub images: &'a [String],
    pub tags: &'a [String],
}

impl<'a> BlogInsert<'a> {
    pub fn new(blog: &'a Blog) -> Self {
        Self {
            id: blog.id.into_uuid(),
            author_id: blog.author_id.into_uuid(),
            title: &blog.title,
            content: &blog.content,
            images: &blog.images,
            tags: &blog.tags,
        }
    }
}

/// Editable blog columns
pub struct BlogUpdate<'a> {
    pub title: &'a str,
    pub content: &'a str,
    pub images: &'a [String],
    pub tags: &'a [String],
}

impl<'a> BlogUpdate<'a> {
    pub fn new(blog: &'a Blog) -> Self {
        Self {
            title: &blog.title,
            content: &blog.content,
            images: &blog.images,
            tags: &blog.tags,
        }
    }
}
