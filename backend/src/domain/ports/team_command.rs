//! Driving ports for team management.
//!
//! Requests carry raw strings; the service validates them so every adapter
//! reports blank fields the same way.

use async_trait::async_trait;

use crate::domain::{Error, Team};

/// Member entry in a team creation request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TeamMemberPayload {
    /// Caller-supplied user id.
    pub user_id: String,
    /// Display name.
    pub username: String,
    /// Whether the user may review.
    pub is_active: bool,
}

/// Request to create a team with its members.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateTeamRequest {
    /// Unique team name.
    pub team_name: String,
    /// Initial members.
    pub members: Vec<TeamMemberPayload>,
}

/// Driving port for team writes.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TeamCommand: Send + Sync {
    /// Create a team, creating unknown users along the way.
    ///
    /// Fails with `TEAM_EXISTS` when the name is taken and `INVALID_REQUEST`
    /// for blank fields, an empty member list, or repeated user ids.
    async fn create_team(&self, request: CreateTeamRequest) -> Result<Team, Error>;
}

/// Driving port for team reads.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TeamQuery: Send + Sync {
    /// Return the team and its members; unknown or empty teams are
    /// `NOT_FOUND`.
    async fn get_team(&self, team_name: String) -> Result<Team, Error>;
}
