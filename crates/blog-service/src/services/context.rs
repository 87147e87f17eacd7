//! Service context - dependency container for services
//!
//! Holds the repositories, the transaction coordinator and the other
//! dependencies the services need.

use std::sync::Arc;

use blog_common::auth::JwtService;
use blog_common::EngagementConfig;
use blog_core::traits::{
    BlogRepository, CommentRepository, ReactionRepository, StoreHealth, TransactionManager,
};
use blog_core::CounterStrategy;

use super::error::{ServiceError, ServiceResult};
use super::transaction::TransactionCoordinator;

/// Service context containing all dependencies
///
/// This is the main dependency container that gets passed to all services.
/// It provides access to:
/// - Pool-level repositories for reads and content CRUD
/// - The transaction coordinator for counter-affecting operations
/// - JWT service for authentication
/// - Engagement engine settings
#[derive(Clone)]
pub struct ServiceContext {
    // Repositories
    blog_repo: Arc<dyn BlogRepository>,
    comment_repo: Arc<dyn CommentRepository>,
    reaction_repo: Arc<dyn ReactionRepository>,
    store_health: Arc<dyn StoreHealth>,

    // Transactions
    transactions: TransactionCoordinator,

    // Services
    jwt_service: Arc<JwtService>,
    engagement: EngagementConfig,
}

impl ServiceContext {
    /// Create a new service context with all dependencies
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        blog_repo: Arc<dyn BlogRepository>,
        comment_repo: Arc<dyn CommentRepository>,
        reaction_repo: Arc<dyn ReactionRepository>,
        store_health: Arc<dyn StoreHealth>,
        transaction_manager: Arc<dyn TransactionManager>,
        jwt_service: Arc<JwtService>,
        engagement: EngagementConfig,
    ) -> Self {
        let transactions = TransactionCoordinator::new(
            transaction_manager,
            engagement.operation_timeout(),
            engagement.max_conflict_retries,
        );

        Self {
            blog_repo,
            comment_repo,
            reaction_repo,
            store_health,
            transactions,
            jwt_service,
            engagement,
        }
    }

    // === Repositories ===

    /// Get the blog repository
    pub fn blog_repo(&self) -> &dyn BlogRepository {
        self.blog_repo.as_ref()
    }

    /// Get the comment repository
    pub fn comment_repo(&self) -> &dyn CommentRepository {
        self.comment_repo.as_ref()
    }

    /// Get the reaction repository
    pub fn reaction_repo(&self) -> &dyn ReactionRepository {
        self.reaction_repo.as_ref()
    }

    /// Get the store health probe
    pub fn store_health(&self) -> &dyn StoreHealth {
        self.store_health.as_ref()
    }

    // === Transactions ===

    /// Get the unit-of-work coordinator
    pub fn transactions(&self) -> &TransactionCoordinator {
        &self.transactions
    }

    // === Services ===

    /// Get the JWT service
    pub fn jwt_service(&self) -> &JwtService {
        self.jwt_service.as_ref()
    }

    /// Get the engagement engine settings
    pub fn engagement(&self) -> &EngagementConfig {
        &self.engagement
    }

    /// Counter maintenance strategy used for every subject kind
    pub fn counter_strategy(&self) -> CounterStrategy {
        self.engagement.counter_strategy
    }
}

impl std::fmt::Debug for ServiceContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ServiceContext")
            .field("repositories", &"...")
            .field("transactions", &self.transactions)
            .field("engagement", &self.engagement)
            .finish()
    }
}

/// Builder for creating ServiceContext with custom configuration
pub struct ServiceContextBuilder {
    blog_repo: Option<Arc<dyn BlogRepository>>,
    comment_repo: Option<Arc<dyn CommentRepository>>,
    reaction_repo: Option<Arc<dyn ReactionRepository>>,
    store_health: Option<Arc<dyn StoreHealth>>,
    transaction_manager: Option<Arc<dyn TransactionManager>>,
    jwt_service: Option<Arc<JwtService>>,
    engagement: EngagementConfig,
}

impl ServiceContextBuilder {
    pub fn new() -> Self {
        Self {
            blog_repo: None,
            comment_repo: None,
            reaction_repo: None,
            store_health: None,
            transaction_manager: None,
            jwt_service: None,
            engagement: EngagementConfig::default(),
        }
    }

    /// Use one backend for every repository, the health probe and transactions
    pub fn store<S>(self, store: Arc<S>) -> Self
    where
        S: BlogRepository
            + CommentRepository
            + ReactionRepository
            + StoreHealth
            + TransactionManager
            + 'static,
    {
        self.blog_repo(store.clone())
            .comment_repo(store.clone())
            .reaction_repo(store.clone())
            .store_health(store.clone())
            .transaction_manager(store)
    }

    pub fn blog_repo(mut self, repo: Arc<dyn BlogRepository>) -> Self {
        self.blog_repo = Some(repo);
        self
    }

    pub fn comment_repo(mut self, repo: Arc<dyn CommentRepository>) -> Self {
        self.comment_repo = Some(repo);
        self
    }

    pub fn reaction_repo(mut self, repo: Arc<dyn ReactionRepository>) -> Self {
        self.reaction_repo = Some(repo);
        self
    }

    pub fn store_health(mut self, health: Arc<dyn StoreHealth>) -> Self {
        self.store_health = Some(health);
        self
    }

    pub fn transaction_manager(mut self, manager: Arc<dyn TransactionManager>) -> Self {
        self.transaction_manager = Some(manager);
        self
    }

    pub fn jwt_service(mut self, service: Arc<JwtService>) -> Self {
        self.jwt_service = Some(service);
        self
    }

    pub fn engagement(mut self, engagement: EngagementConfig) -> Self {
        self.engagement = engagement;
        self
    }

    /// Build the ServiceContext
    ///
    /// # Errors
    /// Returns `ServiceError::Validation` if any required dependency is missing
    pub fn build(self) -> ServiceResult<ServiceContext> {
        Ok(ServiceContext::new(
            required(self.blog_repo, "blog_repo")?,
            required(self.comment_repo, "comment_repo")?,
            required(self.reaction_repo, "reaction_repo")?,
            required(self.store_health, "store_health")?,
            required(self.transaction_manager, "transaction_manager")?,
            required(self.jwt_service, "jwt_service")?,
            self.engagement,
        ))
    }
}

fn required<T>(value: Option<T>, name: &str) -> ServiceResult<T> {
    value.ok_or_else(|| ServiceError::validation(format!("{name} is required")))
}

impl Default for ServiceContextBuilder {
    fn default() -> Self {
        Self::new()
    }
}
