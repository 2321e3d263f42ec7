//! PostgreSQL-backed `TeamDirectory` implementation using Diesel ORM.
//!
//! Team creation runs in one transaction: the team row first, so a name
//! collision aborts before any user is touched, then users (existing rows are
//! left as stored) and membership links.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::scoped_futures::ScopedFutureExt;
use diesel_async::{AsyncConnection, AsyncPgConnection, RunQueryDsl};
use tracing::debug;

use crate::domain::ports::{TeamDirectory, TeamDirectoryError};
use crate::domain::{Team, TeamName, User};

use super::diesel_basic_error_mapping::{
    ConstraintViolation, constraint_violation, map_basic_diesel_error, map_basic_pool_error,
};
use super::models::{NewTeamMemberRow, NewTeamRow, NewUserRow, RowConversionError, UserRow};
use super::pool::{DbPool, PoolError};
use super::schema::{team_members, teams, users};

const PRIMARY_KEY: &str = "teams_pkey";

/// Diesel-backed implementation of the `TeamDirectory` port.
#[derive(Clone)]
pub struct DieselTeamDirectory {
    pool: DbPool,
}

impl DieselTeamDirectory {
    /// Create a new directory with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> TeamDirectoryError {
    map_basic_pool_error(error, TeamDirectoryError::connection)
}

fn map_diesel_error(error: diesel::result::Error) -> TeamDirectoryError {
    map_basic_diesel_error(
        error,
        TeamDirectoryError::query,
        TeamDirectoryError::connection,
    )
}

/// Map a failed team insert; only a `teams` key collision means the name is taken.
fn map_create_error(error: diesel::result::Error, team_name: &str) -> TeamDirectoryError {
    match constraint_violation(&error) {
        Some(ConstraintViolation::Unique { constraint })
            if constraint.is_none_or(|name| name == PRIMARY_KEY) =>
        {
            debug!(team_name, "team name already taken");
            TeamDirectoryError::team_exists(team_name)
        }
        _ => map_diesel_error(error),
    }
}

fn map_row_error(error: RowConversionError) -> TeamDirectoryError {
    TeamDirectoryError::query(error.to_string())
}

/// Members of `team_name`, oldest account first.
pub(crate) async fn load_members(
    conn: &mut AsyncPgConnection,
    team_name: &str,
) -> Result<Vec<UserRow>, diesel::result::Error> {
    team_members::table
        .inner_join(users::table)
        .filter(team_members::team_name.eq(team_name))
        .order((users::created_at.asc(), users::user_id.asc()))
        .select(UserRow::as_select())
        .load(conn)
        .await
}

fn into_users(rows: Vec<UserRow>) -> Result<Vec<User>, TeamDirectoryError> {
    rows.into_iter()
        .map(|row| row.into_domain().map_err(map_row_error))
        .collect()
}

#[async_trait]
impl TeamDirectory for DieselTeamDirectory {
    async fn create(&self, team: &Team) -> Result<Team, TeamDirectoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let team_name = team.name().as_str();
        let user_rows: Vec<NewUserRow<'_>> = team
            .members()
            .iter()
            .map(|user| NewUserRow {
                user_id: user.id().as_str(),
                username: user.username().as_str(),
                is_active: user.is_active(),
            })
            .collect();
        let member_rows: Vec<NewTeamMemberRow<'_>> = team
            .members()
            .iter()
            .map(|user| NewTeamMemberRow {
                team_name,
                user_id: user.id().as_str(),
            })
            .collect();

        let result = conn
            .transaction(|conn| {
                async move {
                    diesel::insert_into(teams::table)
                        .values(&NewTeamRow { team_name })
                        .execute(conn)
                        .await?;

                    diesel::insert_into(users::table)
                        .values(&user_rows)
                        .on_conflict(users::user_id)
                        .do_nothing()
                        .execute(conn)
                        .await?;

                    diesel::insert_into(team_members::table)
                        .values(&member_rows)
                        .on_conflict((team_members::team_name, team_members::user_id))
                        .do_nothing()
                        .execute(conn)
                        .await?;

                    load_members(conn, team_name).await
                }
                .scope_boxed()
            })
            .await;

        let rows = result.map_err(|error| map_create_error(error, team_name))?;

        Team::new(team.name().clone(), into_users(rows)?)
            .map_err(|err| TeamDirectoryError::query(err.to_string()))
    }

    async fn members(&self, team_name: &TeamName) -> Result<Option<Vec<User>>, TeamDirectoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let exists: Option<String> = teams::table
            .find(team_name.as_str())
            .select(teams::team_name)
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;
        if exists.is_none() {
            return Ok(None);
        }

        let rows = load_members(&mut conn, team_name.as_str())
            .await
            .map_err(map_diesel_error)?;
        into_users(rows).map(Some)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use diesel::result::DatabaseErrorKind;
    use rstest::rstest;

    use super::super::diesel_basic_error_mapping::test_support::violation;

    #[rstest]
    #[case(Some(PRIMARY_KEY))]
    #[case(None)]
    fn team_key_violation_means_team_exists(#[case] constraint: Option<&'static str>) {
        let err = map_create_error(
            violation(DatabaseErrorKind::UniqueViolation, constraint),
            "backend",
        );
        assert_eq!(err, TeamDirectoryError::team_exists("backend"));
    }

    #[rstest]
    #[case("users_pkey")]
    #[case("team_members_pkey")]
    fn other_unique_violations_are_query_errors(#[case] constraint: &'static str) {
        let err = map_create_error(
            violation(DatabaseErrorKind::UniqueViolation, Some(constraint)),
            "backend",
        );
        assert!(matches!(err, TeamDirectoryError::Query { .. }));
    }
}
