//! PostgreSQL implementation of ReactionRepository

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::instrument;

use blog_core::entities::{Reaction, Subject};
use blog_core::traits::{ReactionRepository, RepoResult};
use blog_core::value_objects::UserId;

use crate::mappers::{reaction_from_model, SubjectTables};
use crate::models::ReactionModel;

use super::error::map_db_error;

/// PostgreSQL implementation of ReactionRepository
#[derive(Clone)]
pub struct PgReactionRepository {
    pool: PgPool,
}

impl PgReactionRepository {
    /// Create a new PgReactionRepository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ReactionRepository for PgReactionRepository {
    #[instrument(skip(self))]
    async fn find(&self, subject: Subject, user_id: UserId) -> RepoResult<Option<Reaction>> {
        let tables = SubjectTables::for_subject(subject);
        let sql = format!(
            "SELECT subject_id, user_id, state, created_at, updated_at \
             FROM {} WHERE subject_id = $1 AND user_id = $2",
            tables.reactions
        );

        let row = sqlx::query_as::<_, ReactionModel>(&sql)
            .bind(subject.uuid())
            .bind(user_id.into_uuid())
            .fetch_optional(&self.pool)
            .await
            .map_err(map_db_error)?;

        row.map(|model| reaction_from_model(subject, model))
            .transpose()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_repo_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<PgReactionRepository>();
    }
}
