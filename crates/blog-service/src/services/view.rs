//! View service
//!
//! Counts each (blog, viewer) pair at most once. The view ledger's
//! uniqueness is the only source of truth: the mark is inserted first and the
//! counter moves only when that insert actually created a row.

use blog_core::entities::{ViewInsert, ViewMark};
use blog_core::traits::{CounterStore, UnitOfWork, ViewLedger};
use blog_core::value_objects::{BlogId, UserId};
use blog_core::DomainError;
use tracing::{debug, info, instrument};

use super::context::ServiceContext;
use super::error::ServiceResult;

/// View service
pub struct ViewService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> ViewService<'a> {
    /// Create a new ViewService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Record that `viewer` has seen `blog_id`.
    ///
    /// A repeat view is a success that leaves `view_count` untouched.
    #[instrument(skip(self))]
    pub async fn record_view(&self, blog_id: BlogId, viewer: UserId) -> ServiceResult<ViewInsert> {
        if blog_id.is_nil() || viewer.is_nil() {
            return Err(DomainError::InvalidIdentifier(
                "blog and user ids must not be nil".to_string(),
            )
            .into());
        }
        let transactions = self.ctx.transactions();
        let (outcome, view_count) = transactions
            .bounded("view", async {
                if self.ctx.blog_repo().find_by_id(blog_id).await?.is_none() {
                    return Err(DomainError::BlogNotFound(blog_id).into());
                }
                transactions
                    .run("view", move |uow| Box::pin(count_view(uow, blog_id, viewer)))
                    .await
            })
            .await?;

        match view_count {
            Some(view_count) => {
                info!(blog_id = %blog_id, viewer = %viewer, view_count, "View counted");
            }
            None => debug!(blog_id = %blog_id, viewer = %viewer, "Repeat view, not counted"),
        }

        Ok(outcome)
    }
}

async fn count_view(
    uow: &mut dyn UnitOfWork,
    blog_id: BlogId,
    viewer: UserId,
) -> ServiceResult<(ViewInsert, Option<i64>)> {
    let outcome = uow
        .insert_view_if_absent(&ViewMark::new(blog_id, viewer))
        .await?;

    let view_count = match outcome {
        ViewInsert::Inserted => Some(uow.increment_view_count(blog_id).await?),
        ViewInsert::AlreadyExists => None,
    };

    Ok((outcome, view_count))
}
