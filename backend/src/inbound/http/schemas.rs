//! OpenAPI schema definitions for domain types.
//!
//! Domain types remain framework-agnostic by not deriving `ToSchema`. This
//! module provides the schema definitions required for OpenAPI documentation
//! using utoipa's external schema registration.

use utoipa::ToSchema;

/// OpenAPI schema for [`crate::domain::ErrorCode`].
///
/// Stable machine-readable error codes returned in API error responses.
#[derive(ToSchema)]
#[schema(as = crate::domain::ErrorCode)]
pub enum ErrorCodeSchema {
    /// A team with the requested name already exists.
    #[schema(rename = "TEAM_EXISTS")]
    TeamExists,
    /// A pull request with the requested id already exists.
    #[schema(rename = "PR_EXISTS")]
    PullRequestExists,
    /// The pull request is merged and its reviewers are frozen.
    #[schema(rename = "PR_MERGED")]
    PullRequestMerged,
    /// The reviewer being replaced is not assigned to the pull request.
    #[schema(rename = "NOT_ASSIGNED")]
    NotAssigned,
    /// No eligible replacement reviewer exists.
    #[schema(rename = "NO_CANDIDATE")]
    NoCandidate,
    /// The requested resource does not exist.
    #[schema(rename = "NOT_FOUND")]
    NotFound,
    /// The request is malformed or fails validation.
    #[schema(rename = "INVALID_REQUEST")]
    InvalidRequest,
    /// The backing store is unavailable or the request timed out.
    #[schema(rename = "SERVICE_UNAVAILABLE")]
    ServiceUnavailable,
    /// An unexpected error occurred on the server.
    #[schema(rename = "INTERNAL_ERROR")]
    InternalError,
}

/// OpenAPI schema for [`crate::domain::Error`].
///
/// API error payload with machine-readable code and human-readable message.
#[derive(ToSchema)]
#[schema(as = crate::domain::Error)]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct ErrorSchema {
    /// Stable machine-readable error code.
    #[schema(example = "NOT_FOUND")]
    code: ErrorCodeSchema,
    /// Human-readable message returned to clients.
    #[schema(example = "resource not found")]
    message: String,
    /// Correlation identifier for tracing this error across systems.
    #[schema(example = "3fa85f64-5717-4562-b3fc-2c963f66afa6")]
    trace_id: Option<String>,
    /// Supplementary error details for clients.
    details: Option<serde_json::Value>,
}

/// Envelope wrapping every error response body.
#[derive(ToSchema)]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct ErrorResponseSchema {
    /// The error payload.
    error: ErrorSchema,
}
