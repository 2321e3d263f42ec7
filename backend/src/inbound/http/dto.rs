//! Wire representations shared by the HTTP handlers.
//!
//! Field names are snake_case on the wire. Timestamps are RFC 3339 strings.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::ports::{ReviewQueue, TeamMemberPayload, UserMembership};
use crate::domain::{PullRequest, PullRequestSummary, Team, User};

/// Team member as sent and returned by the team endpoints.
#[derive(Debug, Clone, Deserialize, Serialize, ToSchema)]
pub struct TeamMemberBody {
    #[schema(example = "u1")]
    pub user_id: String,
    #[schema(example = "Alice")]
    pub username: String,
    pub is_active: bool,
}

impl TeamMemberBody {
    /// Build a member entry.
    pub fn new(user_id: impl Into<String>, username: impl Into<String>, is_active: bool) -> Self {
        Self {
            user_id: user_id.into(),
            username: username.into(),
            is_active,
        }
    }
}

impl From<TeamMemberBody> for TeamMemberPayload {
    fn from(value: TeamMemberBody) -> Self {
        Self {
            user_id: value.user_id,
            username: value.username,
            is_active: value.is_active,
        }
    }
}

impl From<&User> for TeamMemberBody {
    fn from(user: &User) -> Self {
        Self {
            user_id: user.id().to_string(),
            username: user.username().to_string(),
            is_active: user.is_active(),
        }
    }
}

/// Team with its members.
#[derive(Debug, Clone, Deserialize, Serialize, ToSchema)]
pub struct TeamBody {
    #[schema(example = "backend")]
    pub team_name: String,
    pub members: Vec<TeamMemberBody>,
}

impl From<&Team> for TeamBody {
    fn from(team: &Team) -> Self {
        Self {
            team_name: team.name().to_string(),
            members: team.members().iter().map(TeamMemberBody::from).collect(),
        }
    }
}

/// User with the team used for reviewer selection.
#[derive(Debug, Serialize, ToSchema)]
pub struct UserBody {
    pub user_id: String,
    pub username: String,
    /// First team by name; `null` when the user is in no team.
    pub team_name: Option<String>,
    pub is_active: bool,
}

impl From<UserMembership> for UserBody {
    fn from(value: UserMembership) -> Self {
        let UserMembership { user, team_name } = value;
        Self {
            user_id: user.id().to_string(),
            username: user.username().to_string(),
            team_name: team_name.map(String::from),
            is_active: user.is_active(),
        }
    }
}

/// Full pull request view.
#[derive(Debug, Serialize, ToSchema)]
pub struct PullRequestBody {
    #[schema(example = "pr-1001")]
    pub pull_request_id: String,
    #[schema(example = "Add search")]
    pub pull_request_name: String,
    #[schema(example = "u1")]
    pub author_id: String,
    #[schema(example = "OPEN")]
    pub status: String,
    /// At most two reviewers, never the author.
    pub assigned_reviewers: Vec<String>,
    pub created_at: String,
    pub merged_at: Option<String>,
}

impl From<&PullRequest> for PullRequestBody {
    fn from(pr: &PullRequest) -> Self {
        Self {
            pull_request_id: pr.id().to_string(),
            pull_request_name: pr.title().to_string(),
            author_id: pr.author_id().to_string(),
            status: pr.status().to_string(),
            assigned_reviewers: pr
                .assigned_reviewers()
                .iter()
                .map(ToString::to_string)
                .collect(),
            created_at: pr.created_at().to_rfc3339(),
            merged_at: pr.merged_at().map(|at| at.to_rfc3339()),
        }
    }
}

/// Pull request entry in a review queue.
#[derive(Debug, Serialize, ToSchema)]
pub struct PullRequestShortBody {
    pub pull_request_id: String,
    pub pull_request_name: String,
    pub author_id: String,
    pub status: String,
}

impl From<PullRequestSummary> for PullRequestShortBody {
    fn from(value: PullRequestSummary) -> Self {
        Self {
            pull_request_id: value.id.into(),
            pull_request_name: value.title.into(),
            author_id: value.author_id.into(),
            status: value.status.to_string(),
        }
    }
}

/// Review queue of one user.
#[derive(Debug, Serialize, ToSchema)]
pub struct ReviewQueueBody {
    pub user_id: String,
    pub pull_requests: Vec<PullRequestShortBody>,
}

impl From<ReviewQueue> for ReviewQueueBody {
    fn from(value: ReviewQueue) -> Self {
        Self {
            user_id: value.user_id.into(),
            pull_requests: value
                .pull_requests
                .into_iter()
                .map(PullRequestShortBody::from)
                .collect(),
        }
    }
}
