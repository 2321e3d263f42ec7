//! Pull request HTTP handlers.
//!
//! ```text
//! POST /pullRequest/create {"pull_request_id":"pr-1","pull_request_name":"t","author_id":"u1"}
//! POST /pullRequest/merge {"pull_request_id":"pr-1"}
//! POST /pullRequest/reassign {"pull_request_id":"pr-1","old_user_id":"u2"}
//! ```

use actix_web::{HttpResponse, post, web};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::ports::{
    CreatePullRequestRequest, MergePullRequestRequest, ReassignReviewerRequest,
};
use crate::inbound::http::ApiResult;
use crate::inbound::http::deadline::with_deadline;
use crate::inbound::http::dto::PullRequestBody;
use crate::inbound::http::schemas::ErrorResponseSchema;
use crate::inbound::http::state::HttpState;

/// Request body for `POST /pullRequest/create`.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
pub struct CreatePullRequestBody {
    #[schema(example = "pr-1001")]
    pub pull_request_id: String,
    #[schema(example = "Add search")]
    pub pull_request_name: String,
    #[schema(example = "u1")]
    pub author_id: String,
}

/// Request body for `POST /pullRequest/merge`.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
pub struct MergePullRequestBody {
    #[schema(example = "pr-1001")]
    pub pull_request_id: String,
}

/// Request body for `POST /pullRequest/reassign`.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
pub struct ReassignReviewerBody {
    #[schema(example = "pr-1001")]
    pub pull_request_id: String,
    /// Reviewer to take off the pull request.
    #[schema(example = "u2")]
    pub old_user_id: String,
}

/// Response wrapping a pull request.
#[derive(Debug, Serialize, ToSchema)]
pub struct PullRequestResponse {
    pub pr: PullRequestBody,
}

/// Response for a successful reassignment.
#[derive(Debug, Serialize, ToSchema)]
pub struct ReassignResponse {
    pub pr: PullRequestBody,
    /// Reviewer who took over.
    #[schema(example = "u5")]
    pub replaced_by: String,
}

/// Open a pull request and assign up to two reviewers.
#[utoipa::path(
    post,
    path = "/pullRequest/create",
    request_body = CreatePullRequestBody,
    responses(
        (status = 201, description = "Pull request created", body = PullRequestResponse),
        (status = 400, description = "Invalid request", body = ErrorResponseSchema),
        (status = 404, description = "Unknown author", body = ErrorResponseSchema),
        (status = 409, description = "Pull request id taken", body = ErrorResponseSchema),
        (status = 503, description = "Store unavailable", body = ErrorResponseSchema)
    ),
    tags = ["pull-requests"],
    operation_id = "createPullRequest"
)]
#[post("/pullRequest/create")]
pub async fn create_pull_request(
    state: web::Data<HttpState>,
    payload: web::Json<CreatePullRequestBody>,
) -> ApiResult<HttpResponse> {
    let CreatePullRequestBody {
        pull_request_id,
        pull_request_name,
        author_id,
    } = payload.into_inner();
    let request = CreatePullRequestRequest {
        pull_request_id,
        pull_request_name,
        author_id,
    };
    let pr = with_deadline(
        state.request_timeout,
        state.pull_requests.create_pull_request(request),
    )
    .await?;
    Ok(HttpResponse::Created().json(PullRequestResponse {
        pr: PullRequestBody::from(&pr),
    }))
}

/// Merge a pull request. Repeated merges return the stored state.
#[utoipa::path(
    post,
    path = "/pullRequest/merge",
    request_body = MergePullRequestBody,
    responses(
        (status = 200, description = "Merged pull request", body = PullRequestResponse),
        (status = 400, description = "Invalid request", body = ErrorResponseSchema),
        (status = 404, description = "Unknown pull request", body = ErrorResponseSchema),
        (status = 503, description = "Store unavailable", body = ErrorResponseSchema)
    ),
    tags = ["pull-requests"],
    operation_id = "mergePullRequest"
)]
#[post("/pullRequest/merge")]
pub async fn merge_pull_request(
    state: web::Data<HttpState>,
    payload: web::Json<MergePullRequestBody>,
) -> ApiResult<web::Json<PullRequestResponse>> {
    let request = MergePullRequestRequest {
        pull_request_id: payload.into_inner().pull_request_id,
    };
    let pr = with_deadline(
        state.request_timeout,
        state.pull_requests.merge_pull_request(request),
    )
    .await?;
    Ok(web::Json(PullRequestResponse {
        pr: PullRequestBody::from(&pr),
    }))
}

/// Replace one reviewer with a random eligible team mate.
#[utoipa::path(
    post,
    path = "/pullRequest/reassign",
    request_body = ReassignReviewerBody,
    responses(
        (status = 200, description = "Reviewer replaced", body = ReassignResponse),
        (status = 400, description = "Invalid request", body = ErrorResponseSchema),
        (status = 404, description = "Unknown pull request or user", body = ErrorResponseSchema),
        (
            status = 409,
            description = "Merged, reviewer not assigned, or no candidate",
            body = ErrorResponseSchema
        ),
        (status = 503, description = "Store unavailable", body = ErrorResponseSchema)
    ),
    tags = ["pull-requests"],
    operation_id = "reassignReviewer"
)]
#[post("/pullRequest/reassign")]
pub async fn reassign_reviewer(
    state: web::Data<HttpState>,
    payload: web::Json<ReassignReviewerBody>,
) -> ApiResult<web::Json<ReassignResponse>> {
    let ReassignReviewerBody {
        pull_request_id,
        old_user_id,
    } = payload.into_inner();
    let request = ReassignReviewerRequest {
        pull_request_id,
        old_reviewer_id: old_user_id,
    };
    let outcome = with_deadline(
        state.request_timeout,
        state.pull_requests.reassign_reviewer(request),
    )
    .await?;
    Ok(web::Json(ReassignResponse {
        pr: PullRequestBody::from(&outcome.pull_request),
        replaced_by: outcome.replaced_by.into(),
    }))
}

#[cfg(test)]
#[path = "pull_requests_tests.rs"]
mod tests;
