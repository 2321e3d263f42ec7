//! Internal Diesel row structs for database operations.
//!
//! These types are implementation details of the persistence layer and must
//! never be exposed to the domain.

use chrono::{DateTime, Utc};
use diesel::prelude::*;

use crate::domain::{
    PullRequest, PullRequestDraft, PullRequestId, PullRequestSummary, PullRequestTitle,
    PullRequestValidationError, UnknownStatusError, User, UserId, Username,
};

use super::schema::{pull_request_reviewers, pull_requests, team_members, teams, users};

/// Stored data that does not satisfy the domain invariants.
#[derive(Debug, thiserror::Error)]
pub(crate) enum RowConversionError {
    #[error("stored {column} is blank")]
    Blank { column: &'static str },
    #[error(transparent)]
    Status(#[from] UnknownStatusError),
    #[error(transparent)]
    Invariant(#[from] PullRequestValidationError),
}

fn non_blank<T>(raw: String, column: &'static str) -> Result<T, RowConversionError>
where
    T: TryFrom<String>,
{
    T::try_from(raw).map_err(|_| RowConversionError::Blank { column })
}

/// Row struct for reading from the users table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = users)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct UserRow {
    pub user_id: String,
    pub username: String,
    pub is_active: bool,
}

impl UserRow {
    pub(crate) fn into_domain(self) -> Result<User, RowConversionError> {
        Ok(User::new(
            non_blank::<UserId>(self.user_id, "users.user_id")?,
            non_blank::<Username>(self.username, "users.username")?,
            self.is_active,
        ))
    }
}

/// Insertable struct for creating new user records.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = users)]
pub(crate) struct NewUserRow<'a> {
    pub user_id: &'a str,
    pub username: &'a str,
    pub is_active: bool,
}

/// Insertable struct for creating team records.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = teams)]
pub(crate) struct NewTeamRow<'a> {
    pub team_name: &'a str,
}

/// Insertable struct for linking a user to a team.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = team_members)]
pub(crate) struct NewTeamMemberRow<'a> {
    pub team_name: &'a str,
    pub user_id: &'a str,
}

// ---------------------------------------------------------------------------
// Pull request models
// ---------------------------------------------------------------------------

/// Row struct for reading from the pull_requests table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = pull_requests)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct PullRequestRow {
    pub pull_request_id: String,
    pub pull_request_name: String,
    pub author_id: String,
    pub status: String,
    pub created_at: DateTime<Utc>,
    pub merged_at: Option<DateTime<Utc>>,
}

impl PullRequestRow {
    /// Assemble the aggregate from the row and its reviewers ordered by slot.
    pub(crate) fn into_domain(
        self,
        reviewers: Vec<String>,
    ) -> Result<PullRequest, RowConversionError> {
        let assigned_reviewers = reviewers
            .into_iter()
            .map(|raw| non_blank::<UserId>(raw, "pull_request_reviewers.user_id"))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(PullRequest::new(PullRequestDraft {
            id: non_blank::<PullRequestId>(self.pull_request_id, "pull_requests.pull_request_id")?,
            title: non_blank::<PullRequestTitle>(
                self.pull_request_name,
                "pull_requests.pull_request_name",
            )?,
            author_id: non_blank::<UserId>(self.author_id, "pull_requests.author_id")?,
            status: self.status.parse()?,
            assigned_reviewers,
            created_at: self.created_at,
            merged_at: self.merged_at,
        })?)
    }

    pub(crate) fn into_summary(self) -> Result<PullRequestSummary, RowConversionError> {
        Ok(PullRequestSummary {
            id: non_blank::<PullRequestId>(self.pull_request_id, "pull_requests.pull_request_id")?,
            title: non_blank::<PullRequestTitle>(
                self.pull_request_name,
                "pull_requests.pull_request_name",
            )?,
            author_id: non_blank::<UserId>(self.author_id, "pull_requests.author_id")?,
            status: self.status.parse()?,
        })
    }
}

/// Insertable struct for creating pull request records.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = pull_requests)]
pub(crate) struct NewPullRequestRow<'a> {
    pub pull_request_id: &'a str,
    pub pull_request_name: &'a str,
    pub author_id: &'a str,
    pub status: &'a str,
}

/// Insertable struct for reviewer assignments.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = pull_request_reviewers)]
pub(crate) struct NewReviewerRow<'a> {
    pub pull_request_id: &'a str,
    pub user_id: &'a str,
    pub slot: i16,
}
