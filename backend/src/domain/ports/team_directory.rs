//! Port for team membership storage.

use async_trait::async_trait;

use crate::domain::{Team, TeamName, User};

use super::define_port_error;

define_port_error! {
    /// Errors raised by team directory adapters.
    pub enum TeamDirectoryError {
        /// Directory connection could not be established.
        Connection { message: String } =>
            "team directory connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } =>
            "team directory query failed: {message}",
        /// A team with this name is already stored.
        TeamExists { team_name: String } =>
            "team {team_name} already exists",
    }
}

/// Port for creating teams and reading their members.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TeamDirectory: Send + Sync {
    /// Store a new team and link its members.
    ///
    /// Unknown users are created; known users keep their stored name and
    /// activity flag. The returned team reflects what is stored.
    async fn create(&self, team: &Team) -> Result<Team, TeamDirectoryError>;

    /// Members of `team_name`, oldest account first, or `None` when the team
    /// does not exist.
    async fn members(&self, team_name: &TeamName)
    -> Result<Option<Vec<User>>, TeamDirectoryError>;
}
