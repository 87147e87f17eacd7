//! In-memory store
//!
//! Implements every store trait on a single process-local table set guarded
//! by one async mutex. A unit of work holds that mutex until it commits or
//! is dropped, so engine operations are fully serialized. Selected with
//! `DATABASE_URL=memory://`; used by the service and HTTP tests.

mod state;
mod unit_of_work;

use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::Mutex;
use tracing::instrument;

use blog_core::entities::{Blog, Comment, CounterSet, Reaction, Subject};
use blog_core::error::DomainError;
use blog_core::traits::{
    BlogPage, BlogQuery, BlogRepository, CommentRepository, ReactionRepository, RepoResult,
    StoreHealth, TransactionManager, UnitOfWork,
};
use blog_core::value_objects::{BlogId, CommentId, UserId};

use self::state::MemoryState;
pub use self::unit_of_work::MemoryUnitOfWork;

/// Shared handle to the in-memory tables. Clones see the same data.
#[derive(Clone, Default)]
pub struct InMemoryStore {
    state: Arc<Mutex<MemoryState>>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl std::fmt::Debug for InMemoryStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("InMemoryStore").finish_non_exhaustive()
    }
}

// ============================================================================
// Repositories
// ============================================================================

#[async_trait]
impl BlogRepository for InMemoryStore {
    async fn find_by_id(&self, id: BlogId) -> RepoResult<Option<Blog>> {
        Ok(self.state.lock().await.blogs.get(&id).cloned())
    }

    #[instrument(skip(self))]
    async fn list(&self, query: &BlogQuery) -> RepoResult<BlogPage> {
        let state = self.state.lock().await;
        let mut blogs: Vec<Blog> = state
            .blogs
            .values()
            .filter(|blog| query.matches(blog))
            .cloned()
            .collect();
        blogs.sort_by(|a, b| {
            query
                .sort
                .counter(b)
                .cmp(&query.sort.counter(a))
                .then(b.created_at.cmp(&a.created_at))
                .then(a.id.cmp(&b.id))
        });

        let total = blogs.len() as i64;
        let Some(offset) = query.offset() else {
            return Ok(BlogPage {
                blogs: Vec::new(),
                total,
            });
        };

        let blogs = blogs
            .into_iter()
            .skip(usize::try_from(offset).unwrap_or(usize::MAX))
            .take(query.limit() as usize)
            .collect();

        Ok(BlogPage { blogs, total })
    }

    async fn create(&self, blog: &Blog) -> RepoResult<()> {
        let mut state = self.state.lock().await;
        if state.blogs.contains_key(&blog.id) {
            return Err(DomainError::ValidationError(format!(
                "blog {} already exists",
                blog.id
            )));
        }
        let stored = Blog {
            counters: CounterSet::default(),
            ..blog.clone()
        };
        state.blogs.insert(blog.id, stored);
        Ok(())
    }

    async fn update(&self, blog: &Blog) -> RepoResult<()> {
        let mut state = self.state.lock().await;
        let stored = state
            .blogs
            .get_mut(&blog.id)
            .ok_or(DomainError::BlogNotFound(blog.id))?;
        stored.title.clone_from(&blog.title);
        stored.content.clone_from(&blog.content);
        stored.images.clone_from(&blog.images);
        stored.tags.clone_from(&blog.tags);
        stored.updated_at = blog.updated_at;
        Ok(())
    }

    async fn delete(&self, id: BlogId) -> RepoResult<()> {
        if self.state.lock().await.remove_blog(id) {
            Ok(())
        } else {
            Err(DomainError::BlogNotFound(id))
        }
    }
}

#[async_trait]
impl CommentRepository for InMemoryStore {
    async fn find_by_id(&self, id: CommentId) -> RepoResult<Option<Comment>> {
        Ok(self.state.lock().await.comments.get(&id).cloned())
    }

    async fn find_by_blog(&self, blog_id: BlogId) -> RepoResult<Vec<Comment>> {
        let state = self.state.lock().await;
        let mut comments: Vec<Comment> = state
            .comments
            .values()
            .filter(|c| c.blog_id == blog_id)
            .cloned()
            .collect();
        comments.sort_by(|a, b| a.created_at.cmp(&b.created_at).then(a.id.cmp(&b.id)));
        Ok(comments)
    }

    async fn update(&self, comment: &Comment) -> RepoResult<()> {
        let mut state = self.state.lock().await;
        let stored = state
            .comments
            .get_mut(&comment.id)
            .ok_or(DomainError::CommentNotFound(comment.id))?;
        stored.content.clone_from(&comment.content);
        stored.updated_at = comment.updated_at;
        Ok(())
    }
}

#[async_trait]
impl ReactionRepository for InMemoryStore {
    async fn find(&self, subject: Subject, user_id: UserId) -> RepoResult<Option<Reaction>> {
        Ok(self
            .state
            .lock()
            .await
            .reactions
            .get(&(subject, user_id))
            .cloned())
    }
}

#[async_trait]
impl StoreHealth for InMemoryStore {
    async fn ping(&self) -> RepoResult<()> {
        Ok(())
    }
}

// ============================================================================
// Transactions
// ============================================================================

#[async_trait]
impl TransactionManager for InMemoryStore {
    async fn begin(&self) -> RepoResult<Box<dyn UnitOfWork>> {
        let guard = Arc::clone(&self.state).lock_owned().await;
        Ok(Box::new(MemoryUnitOfWork::new(guard)))
    }
}
