//! PostgreSQL-backed `PullRequestStore` implementation using Diesel ORM.
//!
//! Reviewer order is kept in the `slot` column. A reassignment rewrites the
//! `user_id` of one slot with a single conditional `UPDATE`; the affected row
//! count decides the outcome, so concurrent swaps of the same reviewer cannot
//! both succeed.

use std::sync::Arc;

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::scoped_futures::ScopedFutureExt;
use diesel_async::{AsyncConnection, AsyncPgConnection, RunQueryDsl};
use mockable::{Clock, DefaultClock};
use tracing::debug;

use crate::domain::ports::{PullRequestStore, PullRequestStoreError};
use crate::domain::{
    NewPullRequest, PullRequest, PullRequestId, PullRequestStatus, PullRequestSummary, TeamName,
    User, UserId,
};

use super::diesel_basic_error_mapping::{
    ConstraintViolation, constraint_violation, map_basic_diesel_error, map_basic_pool_error,
};
use super::models::{NewPullRequestRow, NewReviewerRow, PullRequestRow, RowConversionError, UserRow};
use super::pool::{DbPool, PoolError};
use super::schema::{pull_request_reviewers, pull_requests, team_members, users};

const PRIMARY_KEY: &str = "pull_requests_pkey";
const AUTHOR_FOREIGN_KEY: &str = "pull_requests_author_id_fkey";

/// Diesel-backed implementation of the `PullRequestStore` port.
#[derive(Clone)]
pub struct DieselPullRequestStore {
    pool: DbPool,
    clock: Arc<dyn Clock>,
}

impl DieselPullRequestStore {
    /// Create a new store with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self {
            pool,
            clock: Arc::new(DefaultClock),
        }
    }
}

fn map_pool_error(error: PoolError) -> PullRequestStoreError {
    map_basic_pool_error(error, PullRequestStoreError::connection)
}

fn map_diesel_error(error: diesel::result::Error) -> PullRequestStoreError {
    map_basic_diesel_error(
        error,
        PullRequestStoreError::query,
        PullRequestStoreError::connection,
    )
}

fn map_row_error(error: RowConversionError) -> PullRequestStoreError {
    PullRequestStoreError::query(error.to_string())
}

/// Map a failed insert of `pull_request` onto the port's conflict variants.
fn map_create_error(
    error: diesel::result::Error,
    pull_request: &NewPullRequest,
) -> PullRequestStoreError {
    let (duplicate, unknown_author) = match constraint_violation(&error) {
        Some(ConstraintViolation::Unique { constraint }) => {
            (constraint.is_none_or(|name| name == PRIMARY_KEY), false)
        }
        Some(ConstraintViolation::ForeignKey { constraint }) => {
            (false, constraint.is_none_or(|name| name == AUTHOR_FOREIGN_KEY))
        }
        None => (false, false),
    };
    if duplicate {
        PullRequestStoreError::already_exists(pull_request.id.as_str())
    } else if unknown_author {
        PullRequestStoreError::author_not_found(pull_request.author_id.as_str())
    } else {
        map_diesel_error(error)
    }
}

async fn load_reviewers(
    conn: &mut AsyncPgConnection,
    pull_request_id: &str,
) -> Result<Vec<String>, diesel::result::Error> {
    pull_request_reviewers::table
        .filter(pull_request_reviewers::pull_request_id.eq(pull_request_id))
        .order(pull_request_reviewers::slot.asc())
        .select(pull_request_reviewers::user_id)
        .load(conn)
        .await
}

/// Pull request row plus reviewers, or `None` when absent.
async fn load_pull_request(
    conn: &mut AsyncPgConnection,
    pull_request_id: &str,
) -> Result<Option<(PullRequestRow, Vec<String>)>, diesel::result::Error> {
    let row: Option<PullRequestRow> = pull_requests::table
        .find(pull_request_id)
        .select(PullRequestRow::as_select())
        .first(conn)
        .await
        .optional()?;
    match row {
        Some(row) => {
            let reviewers = load_reviewers(conn, pull_request_id).await?;
            Ok(Some((row, reviewers)))
        }
        None => Ok(None),
    }
}

fn is_unique_violation(error: &diesel::result::Error) -> bool {
    matches!(
        constraint_violation(error),
        Some(ConstraintViolation::Unique { .. })
    )
}

fn slot(index: usize) -> i16 {
    i16::try_from(index).unwrap_or(i16::MAX)
}

#[async_trait]
impl PullRequestStore for DieselPullRequestStore {
    async fn create(
        &self,
        pull_request: &NewPullRequest,
    ) -> Result<PullRequest, PullRequestStoreError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let id = pull_request.id.as_str();
        let new_row = NewPullRequestRow {
            pull_request_id: id,
            pull_request_name: pull_request.title.as_str(),
            author_id: pull_request.author_id.as_str(),
            status: PullRequestStatus::Open.as_str(),
        };
        let reviewer_rows: Vec<NewReviewerRow<'_>> = pull_request
            .reviewers
            .iter()
            .enumerate()
            .map(|(index, reviewer)| NewReviewerRow {
                pull_request_id: id,
                user_id: reviewer.as_str(),
                slot: slot(index),
            })
            .collect();

        let (row, reviewers) = conn
            .transaction(|conn| {
                async move {
                    let row: PullRequestRow = diesel::insert_into(pull_requests::table)
                        .values(&new_row)
                        .returning(PullRequestRow::as_returning())
                        .get_result(conn)
                        .await?;
                    if !reviewer_rows.is_empty() {
                        diesel::insert_into(pull_request_reviewers::table)
                            .values(&reviewer_rows)
                            .execute(conn)
                            .await?;
                    }
                    let reviewers = load_reviewers(conn, id).await?;
                    Ok((row, reviewers))
                }
                .scope_boxed()
            })
            .await
            .map_err(|err| map_create_error(err, pull_request))?;

        debug!(pull_request_id = id, reviewers = reviewers.len(), "pull request inserted");
        row.into_domain(reviewers).map_err(map_row_error)
    }

    async fn find(
        &self,
        pull_request_id: &PullRequestId,
    ) -> Result<Option<PullRequest>, PullRequestStoreError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let loaded = load_pull_request(&mut conn, pull_request_id.as_str())
            .await
            .map_err(map_diesel_error)?;

        loaded
            .map(|(row, reviewers)| row.into_domain(reviewers).map_err(map_row_error))
            .transpose()
    }

    async fn merge(
        &self,
        pull_request_id: &PullRequestId,
    ) -> Result<PullRequest, PullRequestStoreError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let id = pull_request_id.as_str();
        let merged_at = self.clock.utc();

        let loaded = conn
            .transaction(|conn| {
                async move {
                    let status: Option<String> = pull_requests::table
                        .find(id)
                        .select(pull_requests::status)
                        .for_update()
                        .first(conn)
                        .await
                        .optional()?;
                    if status.is_none() {
                        return Ok(None);
                    }

                    diesel::update(
                        pull_requests::table
                            .find(id)
                            .filter(pull_requests::status.eq(PullRequestStatus::Open.as_str())),
                    )
                    .set((
                        pull_requests::status.eq(PullRequestStatus::Merged.as_str()),
                        pull_requests::merged_at.eq(Some(merged_at)),
                    ))
                    .execute(conn)
                    .await?;

                    load_pull_request(conn, id).await
                }
                .scope_boxed()
            })
            .await
            .map_err(map_diesel_error)?;

        let (row, reviewers) =
            loaded.ok_or_else(|| PullRequestStoreError::not_found(pull_request_id.as_str()))?;
        row.into_domain(reviewers).map_err(map_row_error)
    }

    async fn reassign(
        &self,
        pull_request_id: &PullRequestId,
        old_reviewer_id: &UserId,
        new_reviewer_id: &UserId,
    ) -> Result<(), PullRequestStoreError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let id = pull_request_id.as_str();

        let open = pull_requests::table
            .filter(pull_requests::pull_request_id.eq(id))
            .filter(pull_requests::status.eq(PullRequestStatus::Open.as_str()))
            .select(pull_requests::pull_request_id);
        let result = diesel::update(
            pull_request_reviewers::table
                .filter(pull_request_reviewers::pull_request_id.eq(id))
                .filter(pull_request_reviewers::user_id.eq(old_reviewer_id.as_str()))
                .filter(pull_request_reviewers::pull_request_id.eq_any(open)),
        )
        .set((
            pull_request_reviewers::user_id.eq(new_reviewer_id.as_str()),
            pull_request_reviewers::assigned_at.eq(self.clock.utc()),
        ))
        .execute(&mut conn)
        .await;

        let affected = match result {
            Ok(affected) => affected,
            // A concurrent swap already placed the new reviewer here.
            Err(error) if is_unique_violation(&error) => 0,
            Err(error) => return Err(map_diesel_error(error)),
        };
        if affected == 0 {
            debug!(pull_request_id = id, "conditional reviewer swap matched no rows");
            return Err(PullRequestStoreError::not_found(id));
        }
        Ok(())
    }

    async fn active_team_members(
        &self,
        team_name: &TeamName,
        exclude: &UserId,
    ) -> Result<Vec<User>, PullRequestStoreError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let rows: Vec<UserRow> = team_members::table
            .inner_join(users::table)
            .filter(team_members::team_name.eq(team_name.as_str()))
            .filter(users::is_active.eq(true))
            .filter(users::user_id.ne(exclude.as_str()))
            .order((users::created_at.asc(), users::user_id.asc()))
            .select(UserRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        rows.into_iter()
            .map(|row| row.into_domain().map_err(map_row_error))
            .collect()
    }

    async fn review_queue(
        &self,
        user_id: &UserId,
    ) -> Result<Vec<PullRequestSummary>, PullRequestStoreError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let rows: Vec<PullRequestRow> = pull_request_reviewers::table
            .inner_join(pull_requests::table)
            .filter(pull_request_reviewers::user_id.eq(user_id.as_str()))
            .order((
                pull_requests::created_at.asc(),
                pull_requests::pull_request_id.asc(),
            ))
            .select(PullRequestRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        rows.into_iter()
            .map(|row| row.into_summary().map_err(map_row_error))
            .collect()
    }
}
