//! PostgreSQL-backed `UserDirectory` implementation using Diesel ORM.

use std::sync::Arc;

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::{AsyncPgConnection, RunQueryDsl};
use mockable::{Clock, DefaultClock};

use crate::domain::ports::{UserDirectory, UserDirectoryError, UserMembership};
use crate::domain::{TeamName, User, UserId};

use super::diesel_basic_error_mapping::{map_basic_diesel_error, map_basic_pool_error};
use super::models::UserRow;
use super::pool::{DbPool, PoolError};
use super::schema::{team_members, users};

/// Diesel-backed implementation of the `UserDirectory` port.
#[derive(Clone)]
pub struct DieselUserDirectory {
    pool: DbPool,
    clock: Arc<dyn Clock>,
}

impl DieselUserDirectory {
    /// Create a new directory with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self {
            pool,
            clock: Arc::new(DefaultClock),
        }
    }
}

fn map_pool_error(error: PoolError) -> UserDirectoryError {
    map_basic_pool_error(error, UserDirectoryError::connection)
}

fn map_diesel_error(error: diesel::result::Error) -> UserDirectoryError {
    map_basic_diesel_error(
        error,
        UserDirectoryError::query,
        UserDirectoryError::connection,
    )
}

fn to_user(row: UserRow) -> Result<User, UserDirectoryError> {
    row.into_domain()
        .map_err(|err| UserDirectoryError::query(err.to_string()))
}

/// First team of `user_id` by name.
async fn first_team(
    conn: &mut AsyncPgConnection,
    user_id: &str,
) -> Result<Option<TeamName>, UserDirectoryError> {
    let name: Option<String> = team_members::table
        .filter(team_members::user_id.eq(user_id))
        .order(team_members::team_name.asc())
        .select(team_members::team_name)
        .first(conn)
        .await
        .optional()
        .map_err(map_diesel_error)?;

    name.map(TeamName::new)
        .transpose()
        .map_err(|err| UserDirectoryError::query(format!("stored team_name: {err}")))
}

#[async_trait]
impl UserDirectory for DieselUserDirectory {
    async fn find(&self, user_id: &UserId) -> Result<Option<User>, UserDirectoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row: Option<UserRow> = users::table
            .find(user_id.as_str())
            .select(UserRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;

        row.map(to_user).transpose()
    }

    async fn team_of(&self, user_id: &UserId) -> Result<Option<TeamName>, UserDirectoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        first_team(&mut conn, user_id.as_str()).await
    }

    async fn set_active(
        &self,
        user_id: &UserId,
        active: bool,
    ) -> Result<Option<UserMembership>, UserDirectoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row: Option<UserRow> = diesel::update(users::table.find(user_id.as_str()))
            .set((
                users::is_active.eq(active),
                users::updated_at.eq(self.clock.utc()),
            ))
            .returning(UserRow::as_returning())
            .get_result(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;

        let Some(row) = row else {
            return Ok(None);
        };
        let user = to_user(row)?;
        let team_name = first_team(&mut conn, user_id.as_str()).await?;
        Ok(Some(UserMembership { user, team_name }))
    }
}
