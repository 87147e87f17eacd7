//! Server setup and initialization
//!
//! Provides the application builder, store wiring and server runner.

use std::sync::Arc;

use axum::Router;
use blog_common::{AppConfig, AppError, JwtService};
use blog_db::{
    create_pool, run_migrations, InMemoryStore, PgBlogRepository, PgCommentRepository,
    PgReactionRepository, PgTransactionManager,
};
use blog_service::ServiceContextBuilder;
use tokio::net::TcpListener;
use tracing::info;

use crate::middleware::apply_middleware;
use crate::routes::{create_router, health_routes};
use crate::state::AppState;

/// Build the complete Axum application with all routes and middleware
///
/// Health routes sit outside the rate limiter.
pub fn create_app(state: AppState) -> Router {
    let config = state.config();
    let api = apply_middleware(
        create_router(),
        &config.rate_limit,
        &config.cors,
        config.app.env.is_production(),
    );

    health_routes().merge(api).with_state(state)
}

/// Initialize the store and services and create AppState
pub async fn create_app_state(config: AppConfig) -> Result<AppState, AppError> {
    let jwt_service = Arc::new(JwtService::new(
        &config.jwt.secret,
        config.jwt.access_token_expiry,
    ));

    let builder = ServiceContextBuilder::new()
        .jwt_service(jwt_service)
        .engagement(config.engagement.clone());

    let builder = if config.database.is_in_memory() {
        info!("Using in-memory store");
        builder.store(Arc::new(InMemoryStore::new()))
    } else {
        with_postgres(builder, &config).await?
    };

    let service_context = builder
        .build()
        .map_err(|e| AppError::Config(e.to_string()))?;

    info!(
        counter_strategy = %service_context.counter_strategy(),
        operation_timeout_ms = config.engagement.operation_timeout_ms,
        "Service context ready"
    );

    Ok(AppState::new(service_context, config))
}

async fn with_postgres(
    builder: ServiceContextBuilder,
    config: &AppConfig,
) -> Result<ServiceContextBuilder, AppError> {
    info!("Connecting to PostgreSQL...");
    let pool = create_pool(&blog_db::DatabaseConfig::from(&config.database))
        .await
        .map_err(|e| AppError::Database(e.to_string()))?;
    info!("PostgreSQL connection established");

    run_migrations(&pool)
        .await
        .map_err(|e| AppError::Database(format!("Migration failed: {e}")))?;

    let transactions = Arc::new(PgTransactionManager::new(pool.clone()));

    Ok(builder
        .blog_repo(Arc::new(PgBlogRepository::new(pool.clone())))
        .comment_repo(Arc::new(PgCommentRepository::new(pool.clone())))
        .reaction_repo(Arc::new(PgReactionRepository::new(pool)))
        .store_health(transactions.clone())
        .transaction_manager(transactions))
}

/// Run the HTTP server on an already bound listener
pub async fn run_server(app: Router, listener: TcpListener) -> Result<(), AppError> {
    let addr = listener
        .local_addr()
        .map_err(|e| AppError::Config(format!("Failed to read local address: {e}")))?;

    info!("Server listening on http://{}", addr);

    axum::serve(listener, app)
        .await
        .map_err(|e| AppError::Config(format!("Server error: {e}")))?;

    Ok(())
}

/// Run the complete server with configuration
pub async fn run(config: AppConfig) -> Result<(), AppError> {
    let addr = config.api.address();

    let state = create_app_state(config).await?;
    let app = create_app(state);

    info!("Starting HTTP server on {}", addr);
    let listener = TcpListener::bind(&addr)
        .await
        .map_err(|e| AppError::Config(format!("Failed to bind to {addr}: {e}")))?;

    run_server(app, listener).await
}
