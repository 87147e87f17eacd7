//! Unit-of-work coordinator
//!
//! Every engine operation runs through [`TransactionCoordinator::run`]: one
//! fresh unit of work per attempt, commit on success, rollback on error, and
//! a transparent retry when the store reports a transient write conflict.
//! The whole thing, retries included, is bounded by a single deadline; when
//! it fires the in-flight unit of work is dropped, which rolls it back.

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use blog_core::traits::{TransactionManager, UnitOfWork};
use futures::future::BoxFuture;
use tokio::time::{sleep, timeout_at, Instant};
use tracing::{debug, warn};

use super::error::{ServiceError, ServiceResult};

/// Base delay between conflict retries; doubled on every further attempt
const RETRY_BACKOFF: Duration = Duration::from_millis(5);

#[derive(Clone)]
pub struct TransactionCoordinator {
    manager: Arc<dyn TransactionManager>,
    timeout: Duration,
    max_conflict_retries: u32,
}

impl TransactionCoordinator {
    /// Create a new TransactionCoordinator bounding each operation by `timeout`
    pub fn new(
        manager: Arc<dyn TransactionManager>,
        timeout: Duration,
        max_conflict_retries: u32,
    ) -> Self {
        Self {
            manager,
            timeout,
            max_conflict_retries,
        }
    }

    /// Deadline applied to each operation
    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Run `work` inside a unit of work and commit it.
    ///
    /// `work` may be invoked more than once, so it must only capture data it
    /// can reuse (copies or clones). The error it returns is passed through
    /// after the unit of work has been rolled back.
    pub async fn run<T, F>(&self, operation: &'static str, work: F) -> ServiceResult<T>
    where
        T: Send,
        F: for<'t> FnMut(&'t mut dyn UnitOfWork) -> BoxFuture<'t, ServiceResult<T>> + Send,
    {
        self.bounded(operation, self.attempt_until_settled(operation, work))
            .await
    }

    /// Bound any future by the operation deadline.
    ///
    /// Engine operations wrap their pre-checks and their `run` call in one
    /// `bounded` so reads before the unit of work count against the deadline.
    pub async fn bounded<T, Fut>(&self, operation: &'static str, fut: Fut) -> ServiceResult<T>
    where
        Fut: Future<Output = ServiceResult<T>>,
    {
        let deadline = Instant::now() + self.timeout;

        match timeout_at(deadline, fut).await {
            Ok(result) => result,
            Err(_) => {
                let ms = u64::try_from(self.timeout.as_millis()).unwrap_or(u64::MAX);
                warn!(operation, timeout_ms = ms, "Operation deadline elapsed, rolled back");
                Err(ServiceError::Timeout { operation, ms })
            }
        }
    }

    async fn attempt_until_settled<T, F>(
        &self,
        operation: &'static str,
        mut work: F,
    ) -> ServiceResult<T>
    where
        T: Send,
        F: for<'t> FnMut(&'t mut dyn UnitOfWork) -> BoxFuture<'t, ServiceResult<T>> + Send,
    {
        let mut attempt: u32 = 0;
        loop {
            attempt += 1;

            let outcome = match self.manager.begin().await {
                Ok(uow) => Self::attempt(uow, &mut work).await,
                Err(e) => Err(e.into()),
            };

            match outcome {
                Err(e) if e.is_retryable() && attempt <= self.max_conflict_retries => {
                    debug!(operation, attempt, "Write conflict, retrying");
                    sleep(RETRY_BACKOFF * 2u32.saturating_pow(attempt - 1)).await;
                }
                Err(e) if e.is_retryable() => {
                    warn!(operation, attempts = attempt, "Write conflict persisted, giving up");
                    return Err(e);
                }
                other => return other,
            }
        }
    }

    async fn attempt<T, F>(mut uow: Box<dyn UnitOfWork>, work: &mut F) -> ServiceResult<T>
    where
        F: for<'t> FnMut(&'t mut dyn UnitOfWork) -> BoxFuture<'t, ServiceResult<T>> + Send,
    {
        match work(uow.as_mut()).await {
            Ok(value) => {
                uow.commit().await?;
                Ok(value)
            }
            Err(e) => {
                if let Err(rollback_err) = uow.rollback().await {
                    warn!(error = %rollback_err, "Rollback failed");
                }
                Err(e)
            }
        }
    }
}

impl std::fmt::Debug for TransactionCoordinator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TransactionCoordinator")
            .field("timeout", &self.timeout)
            .field("max_conflict_retries", &self.max_conflict_retries)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicU32, Ordering};

    use async_trait::async_trait;
    use blog_core::entities::Blog;
    use blog_core::traits::{BlogQuery, BlogRepository, CounterStore, RepoResult};
    use blog_core::value_objects::{BlogId, UserId};
    use blog_core::DomainError;
    use blog_db::InMemoryStore;

    /// Fails `begin` with a write conflict a fixed number of times
    struct FlakyManager {
        inner: InMemoryStore,
        conflicts_left: AtomicU32,
        begins: AtomicU32,
    }

    #[async_trait]
    impl TransactionManager for FlakyManager {
        async fn begin(&self) -> RepoResult<Box<dyn UnitOfWork>> {
            self.begins.fetch_add(1, Ordering::SeqCst);
            let left = self.conflicts_left.load(Ordering::SeqCst);
            if left > 0 {
                self.conflicts_left.store(left - 1, Ordering::SeqCst);
                return Err(DomainError::WriteConflict);
            }
            self.inner.begin().await
        }
    }

    async fn store_with_blog() -> (InMemoryStore, BlogId) {
        let store = InMemoryStore::new();
        let blog = Blog::new(UserId::new(), "t".to_string(), "c".to_string());
        store.create(&blog).await.unwrap();
        (store, blog.id)
    }

    fn flaky(store: &InMemoryStore, conflicts: u32) -> Arc<FlakyManager> {
        Arc::new(FlakyManager {
            inner: store.clone(),
            conflicts_left: AtomicU32::new(conflicts),
            begins: AtomicU32::new(0),
        })
    }

    #[tokio::test]
    async fn test_commit_on_success() {
        let (store, blog_id) = store_with_blog().await;
        let coordinator =
            TransactionCoordinator::new(Arc::new(store.clone()), Duration::from_secs(1), 0);

        let views = coordinator
            .run("view", move |uow| {
                Box::pin(async move { Ok(uow.increment_view_count(blog_id).await?) })
            })
            .await
            .unwrap();
        assert_eq!(views, 1);

        let stored = store.find_by_id(blog_id).await.unwrap().unwrap();
        assert_eq!(stored.counters.view_count, 1);
    }

    #[tokio::test]
    async fn test_rollback_on_error() {
        let (store, blog_id) = store_with_blog().await;
        let coordinator =
            TransactionCoordinator::new(Arc::new(store.clone()), Duration::from_secs(1), 0);

        let result: ServiceResult<()> = coordinator
            .run("view", move |uow| {
                Box::pin(async move {
                    uow.increment_view_count(blog_id).await?;
                    Err(ServiceError::internal("late failure"))
                })
            })
            .await;
        assert!(result.is_err());

        let stored = store.find_by_id(blog_id).await.unwrap().unwrap();
        assert_eq!(stored.counters.view_count, 0);
    }

    #[tokio::test]
    async fn test_conflicts_are_retried() {
        let (store, blog_id) = store_with_blog().await;
        let manager = flaky(&store, 2);
        let coordinator = TransactionCoordinator::new(manager.clone(), Duration::from_secs(1), 3);

        coordinator
            .run("view", move |uow| {
                Box::pin(async move { Ok(uow.increment_view_count(blog_id).await?) })
            })
            .await
            .unwrap();

        assert_eq!(manager.begins.load(Ordering::SeqCst), 3);
        let stored = store.find_by_id(blog_id).await.unwrap().unwrap();
        assert_eq!(stored.counters.view_count, 1);
    }

    #[tokio::test]
    async fn test_retries_are_bounded() {
        let (store, blog_id) = store_with_blog().await;
        let manager = flaky(&store, 10);
        let coordinator = TransactionCoordinator::new(manager.clone(), Duration::from_secs(1), 2);

        let err = coordinator
            .run("view", move |uow| {
                Box::pin(async move { Ok(uow.increment_view_count(blog_id).await?) })
            })
            .await
            .unwrap_err();

        assert!(err.is_retryable());
        assert_eq!(manager.begins.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn test_bounded_covers_reads_before_the_unit_of_work() {
        let (store, _) = store_with_blog().await;
        let coordinator =
            TransactionCoordinator::new(Arc::new(store.clone()), Duration::from_millis(30), 0);
        let _held = store.begin().await.unwrap();

        let err = coordinator
            .bounded("read", async {
                store.list(&BlogQuery::new(1, 10)).await?;
                Ok(())
            })
            .await
            .unwrap_err();
        assert!(err.is_timeout());
    }

    #[tokio::test]
    async fn test_deadline_rolls_back() {
        let (store, blog_id) = store_with_blog().await;
        let coordinator =
            TransactionCoordinator::new(Arc::new(store.clone()), Duration::from_millis(30), 0);

        let err = coordinator
            .run("view", move |uow| {
                Box::pin(async move {
                    uow.increment_view_count(blog_id).await?;
                    sleep(Duration::from_millis(200)).await;
                    Ok(())
                })
            })
            .await
            .unwrap_err();
        assert!(err.is_timeout());

        let stored = store.find_by_id(blog_id).await.unwrap().unwrap();
        assert_eq!(stored.counters.view_count, 0);
    }
}
