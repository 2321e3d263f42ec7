//! Team HTTP handlers.
//!
//! ```text
//! POST /team/add {"team_name":"backend","members":[...]}
//! GET /team/get?team_name=backend
//! ```

use actix_web::{HttpResponse, get, post, web};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::domain::ports::CreateTeamRequest;
use crate::inbound::http::ApiResult;
use crate::inbound::http::deadline::with_deadline;
use crate::inbound::http::dto::{TeamBody, TeamMemberBody};
use crate::inbound::http::schemas::ErrorResponseSchema;
use crate::inbound::http::state::HttpState;

/// Response payload for `POST /team/add`.
#[derive(Debug, Serialize, ToSchema)]
pub struct TeamCreatedResponse {
    pub team: TeamBody,
}

/// Query parameters for `GET /team/get`.
#[derive(Debug, Deserialize, IntoParams)]
pub struct TeamNameQuery {
    /// Team to look up.
    pub team_name: String,
}

impl From<TeamBody> for CreateTeamRequest {
    fn from(value: TeamBody) -> Self {
        Self {
            team_name: value.team_name,
            members: value.members.into_iter().map(Into::into).collect(),
        }
    }
}

/// Create a team, creating or updating its members.
#[utoipa::path(
    post,
    path = "/team/add",
    request_body = TeamBody,
    responses(
        (status = 201, description = "Team created", body = TeamCreatedResponse),
        (status = 400, description = "Team exists or invalid request", body = ErrorResponseSchema),
        (status = 503, description = "Store unavailable", body = ErrorResponseSchema),
        (status = 500, description = "Internal server error", body = ErrorResponseSchema)
    ),
    tags = ["teams"],
    operation_id = "createTeam"
)]
#[post("/team/add")]
pub async fn create_team(
    state: web::Data<HttpState>,
    payload: web::Json<TeamBody>,
) -> ApiResult<HttpResponse> {
    let request = CreateTeamRequest::from(payload.into_inner());
    let team = with_deadline(state.request_timeout, state.teams.create_team(request)).await?;
    Ok(HttpResponse::Created().json(TeamCreatedResponse {
        team: TeamBody::from(&team),
    }))
}

/// Fetch a team with its members.
#[utoipa::path(
    get,
    path = "/team/get",
    params(TeamNameQuery),
    responses(
        (status = 200, description = "Team", body = TeamBody),
        (status = 400, description = "Invalid request", body = ErrorResponseSchema),
        (status = 404, description = "Unknown team", body = ErrorResponseSchema),
        (status = 503, description = "Store unavailable", body = ErrorResponseSchema)
    ),
    tags = ["teams"],
    operation_id = "getTeam"
)]
#[get("/team/get")]
pub async fn get_team(
    state: web::Data<HttpState>,
    query: web::Query<TeamNameQuery>,
) -> ApiResult<web::Json<TeamBody>> {
    let TeamNameQuery { team_name } = query.into_inner();
    let team = with_deadline(state.request_timeout, state.teams_query.get_team(team_name)).await?;
    Ok(web::Json(TeamBody::from(&team)))
}

#[cfg(test)]
#[path = "teams_tests.rs"]
mod tests;
