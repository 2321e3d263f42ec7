//! Team domain service.
//!
//! Implements the team driving ports on top of a [`TeamDirectory`].

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::json;
use tracing::{debug, error, info};

use crate::domain::ports::{
    CreateTeamRequest, TeamCommand, TeamDirectory, TeamDirectoryError, TeamMemberPayload,
    TeamQuery,
};
use crate::domain::request_fields::parse_required;
use crate::domain::{Error, Team, TeamName, TeamValidationError, User};

fn map_directory_error(error: TeamDirectoryError) -> Error {
    match error {
        TeamDirectoryError::TeamExists { .. } => Error::team_exists("team_name already exists"),
        TeamDirectoryError::Connection { message } => {
            error!(%message, "team directory unavailable");
            Error::service_unavailable(format!("team directory unavailable: {message}"))
        }
        TeamDirectoryError::Query { message } => {
            error!(%message, "team directory query failed");
            Error::internal(format!("team directory error: {message}"))
        }
    }
}

fn parse_member(member: TeamMemberPayload) -> Result<User, Error> {
    Ok(User::new(
        parse_required(member.user_id, "user_id")?,
        parse_required(member.username, "username")?,
        member.is_active,
    ))
}

fn parse_team(request: CreateTeamRequest) -> Result<Team, Error> {
    let name: TeamName = parse_required(request.team_name, "team_name")?;
    let members = request
        .members
        .into_iter()
        .map(parse_member)
        .collect::<Result<Vec<_>, _>>()?;

    Team::new(name, members).map_err(|err| match err {
        TeamValidationError::NoMembers => Error::invalid_request("members is empty")
            .with_details(json!({ "field": "members", "code": "missing_field" })),
        TeamValidationError::DuplicateMember { ref user_id } => {
            Error::invalid_request(err.to_string()).with_details(json!({
                "field": "members",
                "code": "duplicate_user_id",
                "value": user_id.as_str(),
            }))
        }
    })
}

/// Team service implementing [`TeamCommand`] and [`TeamQuery`].
#[derive(Clone)]
pub struct TeamService<D> {
    directory: Arc<D>,
}

impl<D> TeamService<D> {
    /// Create a service backed by the given directory.
    pub fn new(directory: Arc<D>) -> Self {
        Self { directory }
    }
}

#[async_trait]
impl<D> TeamCommand for TeamService<D>
where
    D: TeamDirectory,
{
    async fn create_team(&self, request: CreateTeamRequest) -> Result<Team, Error> {
        let team = parse_team(request)?;
        debug!(
            team_name = %team.name(),
            members = team.members().len(),
            "creating team"
        );

        let stored = self
            .directory
            .create(&team)
            .await
            .map_err(map_directory_error)?;

        info!(
            team_name = %stored.name(),
            members = stored.members().len(),
            "team created"
        );
        Ok(stored)
    }
}

#[async_trait]
impl<D> TeamQuery for TeamService<D>
where
    D: TeamDirectory,
{
    async fn get_team(&self, team_name: String) -> Result<Team, Error> {
        let name: TeamName = parse_required(team_name, "team_name")?;
        let members = self
            .directory
            .members(&name)
            .await
            .map_err(map_directory_error)?
            .unwrap_or_default();

        // A team without members is reported the same way as a missing one.
        Team::new(name, members).map_err(|_| Error::not_found("resource not found"))
    }
}

#[cfg(test)]
#[path = "team_service_tests.rs"]
mod tests;
