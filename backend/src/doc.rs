//! OpenAPI documentation configuration.
//!
//! This module defines the [`ApiDoc`] struct which generates the OpenAPI
//! document for the REST API. It registers:
//!
//! - **Paths**: every team, user, pull request, and health endpoint
//! - **Schemas**: wire DTOs plus domain error wrappers ([`ErrorSchema`],
//!   [`ErrorCodeSchema`]) that document errors without coupling domain types
//!   to the utoipa framework
//!
//! The generated document is used by Swagger UI (debug builds) and
//! exported via `cargo run --bin openapi-dump` for external tooling.

use crate::inbound::http::dto::{
    PullRequestBody, PullRequestShortBody, ReviewQueueBody, TeamBody, TeamMemberBody, UserBody,
};
use crate::inbound::http::pull_requests::{
    CreatePullRequestBody, MergePullRequestBody, PullRequestResponse, ReassignResponse,
    ReassignReviewerBody,
};
use crate::inbound::http::schemas::{ErrorCodeSchema, ErrorResponseSchema, ErrorSchema};
use crate::inbound::http::teams::TeamCreatedResponse;
use crate::inbound::http::users::{SetIsActiveRequest, UserResponse};
use utoipa::OpenApi;

/// OpenAPI document for the REST API.
/// Swagger UI is enabled in debug builds only and used by tooling.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "PR reviewer assignment API",
        description = "Teams, reviewer availability, and pull request review assignment."
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    paths(
        crate::inbound::http::teams::create_team,
        crate::inbound::http::teams::get_team,
        crate::inbound::http::users::set_is_active,
        crate::inbound::http::users::get_review,
        crate::inbound::http::pull_requests::create_pull_request,
        crate::inbound::http::pull_requests::merge_pull_request,
        crate::inbound::http::pull_requests::reassign_reviewer,
        crate::inbound::http::health::health,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(
        TeamMemberBody,
        TeamBody,
        TeamCreatedResponse,
        SetIsActiveRequest,
        UserBody,
        UserResponse,
        PullRequestShortBody,
        ReviewQueueBody,
        CreatePullRequestBody,
        MergePullRequestBody,
        ReassignReviewerBody,
        PullRequestBody,
        PullRequestResponse,
        ReassignResponse,
        ErrorResponseSchema,
        ErrorSchema,
        ErrorCodeSchema
    )),
    tags(
        (name = "teams", description = "Team membership"),
        (name = "users", description = "Reviewer availability and review queues"),
        (name = "pull-requests", description = "Pull request review lifecycle"),
        (name = "health", description = "Endpoints for health checks")
    )
)]
pub struct ApiDoc;
