//! PostgreSQL unit of work
//!
//! One [`PgUnitOfWork`] wraps one SQL transaction. Engagement writes lock the
//! subject row first (`FOR NO KEY UPDATE`), so concurrent operations on the
//! same blog or comment queue up behind each other while foreign-key inserts
//! into child tables stay unblocked.

use async_trait::async_trait;
use sqlx::{PgPool, Postgres, Transaction};
use tracing::{debug, instrument};
use uuid::Uuid;

use blog_core::entities::{
    Comment, CounterDelta, Reaction, ReactionCounts, ReactionTally, Stance, Subject, ViewInsert,
    ViewMark,
};
use blog_core::error::DomainError;
use blog_core::traits::{
    CommentStore, CounterStore, ReactionStore, RepoResult, StoreHealth, TransactionManager,
    UnitOfWork, ViewLedger,
};
use blog_core::value_objects::{BlogId, CommentId, UserId};

use crate::mappers::{reaction_from_model, CommentInsert, SubjectTables};
use crate::models::{CommentModel, ReactionCountsModel, ReactionModel, ReactionTallyModel};

use super::error::{map_db_error, map_missing_parent};

// ============================================================================
// Transaction Manager
// ============================================================================

/// Opens [`PgUnitOfWork`]s on a connection pool
#[derive(Clone)]
pub struct PgTransactionManager {
    pool: PgPool,
}

impl PgTransactionManager {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl TransactionManager for PgTransactionManager {
    async fn begin(&self) -> RepoResult<Box<dyn UnitOfWork>> {
        let tx = self.pool.begin().await.map_err(map_db_error)?;
        Ok(Box::new(PgUnitOfWork { tx }))
    }
}

#[async_trait]
impl StoreHealth for PgTransactionManager {
    async fn ping(&self) -> RepoResult<()> {
        sqlx::query("SELECT 1")
            .execute(&self.pool)
            .await
            .map_err(map_db_error)?;
        Ok(())
    }
}

// ============================================================================
// Unit of Work
// ============================================================================

/// An open PostgreSQL transaction. Dropping it without commit rolls back.
pub struct PgUnitOfWork {
    tx: Transaction<'static, Postgres>,
}

/// Re-label a CHECK violation with the counter it guarded
fn underflow_of(column: &'static str) -> impl FnOnce(sqlx::Error) -> DomainError {
    move |e| match map_db_error(e) {
        DomainError::CounterUnderflow(_) => DomainError::CounterUnderflow(column),
        other => other,
    }
}

#[async_trait]
impl ReactionStore for PgUnitOfWork {
    #[instrument(skip(self), level = "debug")]
    async fn find_reaction(
        &mut self,
        subject: Subject,
        user_id: UserId,
    ) -> RepoResult<Option<Reaction>> {
        let sql = format!(
            "SELECT subject_id, user_id, state, created_at, updated_at \
             FROM {} WHERE subject_id = $1 AND user_id = $2 FOR UPDATE",
            SubjectTables::for_subject(subject).reactions
        );

        let row = sqlx::query_as::<_, ReactionModel>(&sql)
            .bind(subject.uuid())
            .bind(user_id.into_uuid())
            .fetch_optional(&mut *self.tx)
            .await
            .map_err(map_db_error)?;

        row.map(|model| reaction_from_model(subject, model))
            .transpose()
    }

    #[instrument(skip(self, reaction), level = "debug", fields(subject = %reaction.subject))]
    async fn insert_reaction(&mut self, reaction: &Reaction) -> RepoResult<()> {
        let subject = reaction.subject;
        let sql = format!(
            "INSERT INTO {} (subject_id, user_id, state, created_at, updated_at) \
             VALUES ($1, $2, $3, $4, $5) \
             ON CONFLICT (subject_id, user_id) DO NOTHING",
            SubjectTables::for_subject(subject).reactions
        );

        let result = sqlx::query(&sql)
            .bind(subject.uuid())
            .bind(reaction.user_id.into_uuid())
            .bind(reaction.stance.as_i16())
            .bind(reaction.created_at)
            .bind(reaction.updated_at)
            .execute(&mut *self.tx)
            .await
            .map_err(|e| map_missing_parent(e, || subject.not_found()))?;

        // someone else inserted the same pair first
        if result.rows_affected() == 0 {
            return Err(DomainError::WriteConflict);
        }
        Ok(())
    }

    #[instrument(skip(self), level = "debug")]
    async fn update_reaction(
        &mut self,
        subject: Subject,
        user_id: UserId,
        stance: Stance,
    ) -> RepoResult<()> {
        let sql = format!(
            "UPDATE {} SET state = $3, updated_at = NOW() \
             WHERE subject_id = $1 AND user_id = $2",
            SubjectTables::for_subject(subject).reactions
        );

        let result = sqlx::query(&sql)
            .bind(subject.uuid())
            .bind(user_id.into_uuid())
            .bind(stance.as_i16())
            .execute(&mut *self.tx)
            .await
            .map_err(map_db_error)?;

        if result.rows_affected() == 0 {
            return Err(DomainError::WriteConflict);
        }
        Ok(())
    }

    #[instrument(skip(self), level = "debug")]
    async fn delete_reaction(&mut self, subject: Subject, user_id: UserId) -> RepoResult<()> {
        let sql = format!(
            "DELETE FROM {} WHERE subject_id = $1 AND user_id = $2",
            SubjectTables::for_subject(subject).reactions
        );

        let result = sqlx::query(&sql)
            .bind(subject.uuid())
            .bind(user_id.into_uuid())
            .execute(&mut *self.tx)
            .await
            .map_err(map_db_error)?;

        if result.rows_affected() == 0 {
            return Err(DomainError::WriteConflict);
        }
        Ok(())
    }

    #[instrument(skip(self), level = "debug")]
    async fn count_reactions(&mut self, subject: Subject) -> RepoResult<ReactionTally> {
        let sql = format!(
            "SELECT COUNT(*) FILTER (WHERE state = 1) AS likes, \
                    COUNT(*) FILTER (WHERE state = -1) AS dislikes \
             FROM {} WHERE subject_id = $1",
            SubjectTables::for_subject(subject).reactions
        );

        let tally = sqlx::query_as::<_, ReactionTallyModel>(&sql)
            .bind(subject.uuid())
            .fetch_one(&mut *self.tx)
            .await
            .map_err(map_db_error)?;

        Ok(ReactionTally {
            likes: tally.likes,
            dislikes: tally.dislikes,
        })
    }
}

#[async_trait]
impl CounterStore for PgUnitOfWork {
    #[instrument(skip(self), level = "debug")]
    async fn lock_subject(&mut self, subject: Subject) -> RepoResult<bool> {
        let sql = format!(
            "SELECT id FROM {} WHERE id = $1 FOR NO KEY UPDATE",
            SubjectTables::for_subject(subject).subject
        );

        let locked = sqlx::query_scalar::<_, Uuid>(&sql)
            .bind(subject.uuid())
            .fetch_optional(&mut *self.tx)
            .await
            .map_err(map_db_error)?;

        Ok(locked.is_some())
    }

    async fn reaction_counts(&mut self, subject: Subject) -> RepoResult<ReactionCounts> {
        let sql = format!(
            "SELECT like_count, dislike_count FROM {} WHERE id = $1",
            SubjectTables::for_subject(subject).subject
        );

        let counts = sqlx::query_as::<_, ReactionCountsModel>(&sql)
            .bind(subject.uuid())
            .fetch_optional(&mut *self.tx)
            .await
            .map_err(map_db_error)?
            .ok_or_else(|| subject.not_found())?;

        Ok(ReactionCounts::new(counts.like_count, counts.dislike_count))
    }

    #[instrument(skip(self), level = "debug")]
    async fn apply_reaction_delta(
        &mut self,
        subject: Subject,
        delta: CounterDelta,
    ) -> RepoResult<ReactionCounts> {
        let sql = format!(
            "UPDATE {} SET like_count = like_count + $2, dislike_count = dislike_count + $3 \
             WHERE id = $1 RETURNING like_count, dislike_count",
            SubjectTables::for_subject(subject).subject
        );

        let counts = sqlx::query_as::<_, ReactionCountsModel>(&sql)
            .bind(subject.uuid())
            .bind(delta.like)
            .bind(delta.dislike)
            .fetch_optional(&mut *self.tx)
            .await
            .map_err(underflow_of("like_count/dislike_count"))?
            .ok_or_else(|| subject.not_found())?;

        Ok(ReactionCounts::new(counts.like_count, counts.dislike_count))
    }

    #[instrument(skip(self), level = "debug")]
    async fn overwrite_reaction_counts(
        &mut self,
        subject: Subject,
        tally: ReactionTally,
    ) -> RepoResult<ReactionCounts> {
        let sql = format!(
            "UPDATE {} SET like_count = $2, dislike_count = $3 \
             WHERE id = $1 RETURNING like_count, dislike_count",
            SubjectTables::for_subject(subject).subject
        );

        let counts = sqlx::query_as::<_, ReactionCountsModel>(&sql)
            .bind(subject.uuid())
            .bind(tally.likes)
            .bind(tally.dislikes)
            .fetch_optional(&mut *self.tx)
            .await
            .map_err(map_db_error)?
            .ok_or_else(|| subject.not_found())?;

        Ok(ReactionCounts::new(counts.like_count, counts.dislike_count))
    }

    #[instrument(skip(self), level = "debug")]
    async fn increment_view_count(&mut self, blog_id: BlogId) -> RepoResult<i64> {
        sqlx::query_scalar::<_, i64>(
            r#"
            UPDATE blogs SET view_count = view_count + 1
            WHERE id = $1
            RETURNING view_count
            "#,
        )
        .bind(blog_id.into_uuid())
        .fetch_optional(&mut *self.tx)
        .await
        .map_err(map_db_error)?
        .ok_or(DomainError::BlogNotFound(blog_id))
    }

    #[instrument(skip(self), level = "debug")]
    async fn adjust_comment_count(&mut self, blog_id: BlogId, delta: i64) -> RepoResult<i64> {
        sqlx::query_scalar::<_, i64>(
            r#"
            UPDATE blogs SET comment_count = comment_count + $2
            WHERE id = $1
            RETURNING comment_count
            "#,
        )
        .bind(blog_id.into_uuid())
        .bind(delta)
        .fetch_optional(&mut *self.tx)
        .await
        .map_err(underflow_of("comment_count"))?
        .ok_or(DomainError::BlogNotFound(blog_id))
    }
}

#[async_trait]
impl ViewLedger for PgUnitOfWork {
    #[instrument(skip(self, mark), level = "debug", fields(blog_id = %mark.blog_id))]
    async fn insert_view_if_absent(&mut self, mark: &ViewMark) -> RepoResult<ViewInsert> {
        let blog_id = mark.blog_id;
        let result = sqlx::query(
            r#"
            INSERT INTO blog_views (blog_id, user_id, viewed_at)
            VALUES ($1, $2, $3)
            ON CONFLICT (blog_id, user_id) DO NOTHING
            "#,
        )
        .bind(blog_id.into_uuid())
        .bind(mark.user_id.into_uuid())
        .bind(mark.viewed_at)
        .execute(&mut *self.tx)
        .await
        .map_err(|e| map_missing_parent(e, || DomainError::BlogNotFound(blog_id)))?;

        Ok(if result.rows_affected() == 0 {
            ViewInsert::AlreadyExists
        } else {
            ViewInsert::Inserted
        })
    }

    #[instrument(skip(self), level = "debug")]
    async fn count_views(&mut self, blog_id: BlogId) -> RepoResult<i64> {
        sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM blog_views WHERE blog_id = $1")
            .bind(blog_id.into_uuid())
            .fetch_one(&mut *self.tx)
            .await
            .map_err(map_db_error)
    }
}

#[async_trait]
impl CommentStore for PgUnitOfWork {
    #[instrument(skip(self, comment), level = "debug", fields(comment_id = %comment.id))]
    async fn insert_comment(&mut self, comment: &Comment) -> RepoResult<()> {
        let insert = CommentInsert::new(comment);
        let blog_id = comment.blog_id;

        sqlx::query(
            r#"
            INSERT INTO comments (id, blog_id, author_id, content, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6)
            "#,
        )
        .bind(insert.id)
        .bind(insert.blog_id)
        .bind(insert.author_id)
        .bind(insert.content)
        .bind(comment.created_at)
        .bind(comment.updated_at)
        .execute(&mut *self.tx)
        .await
        .map_err(|e| map_missing_parent(e, || DomainError::BlogNotFound(blog_id)))?;

        Ok(())
    }

    #[instrument(skip(self), level = "debug")]
    async fn delete_comment(&mut self, id: CommentId) -> RepoResult<Option<Comment>> {
        // comment_reactions rows cascade
        let removed = sqlx::query_as::<_, CommentModel>(
            r#"
            DELETE FROM comments WHERE id = $1
            RETURNING id, blog_id, author_id, content, like_count, dislike_count,
                      created_at, updated_at
            "#,
        )
        .bind(id.into_uuid())
        .fetch_optional(&mut *self.tx)
        .await
        .map_err(map_db_error)?;

        Ok(removed.map(Comment::from))
    }
}

#[async_trait]
impl UnitOfWork for PgUnitOfWork {
    async fn commit(self: Box<Self>) -> RepoResult<()> {
        self.tx.commit().await.map_err(map_db_error)?;
        debug!("Transaction committed");
        Ok(())
    }

    async fn rollback(self: Box<Self>) -> RepoResult<()> {
        self.tx.rollback().await.map_err(map_db_error)?;
        debug!("Transaction rolled back");
        Ok(())
    }
}
