//! Domain-level error types.
//!
//! These errors are transport agnostic. Inbound adapters map them to HTTP
//! responses or any other protocol-specific envelope.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::TraceId;

const FALLBACK_MESSAGE: &str = "unspecified error";

/// Stable machine-readable error code describing the failure category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    /// A team with the requested name already exists.
    TeamExists,
    /// A pull request with the requested id already exists.
    #[serde(rename = "PR_EXISTS")]
    PullRequestExists,
    /// The pull request is merged and can no longer change reviewers.
    #[serde(rename = "PR_MERGED")]
    PullRequestMerged,
    /// The reviewer being replaced is not assigned to the pull request.
    NotAssigned,
    /// No eligible replacement reviewer exists in the team.
    NoCandidate,
    /// The requested resource does not exist.
    NotFound,
    /// The request is malformed or fails validation.
    InvalidRequest,
    /// A backing store is unavailable or did not answer in time.
    ServiceUnavailable,
    /// An unexpected error occurred inside the domain.
    InternalError,
}

/// Domain error payload.
///
/// The message is never empty: blank input falls back to a generic message so
/// adapters always have something to show.
///
/// # Examples
/// ```
/// use pr_reviewers::domain::{Error, ErrorCode};
///
/// let err = Error::not_found("resource not found");
/// assert_eq!(err.code(), ErrorCode::NotFound);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Error {
    code: ErrorCode,
    message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    trace_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    details: Option<Value>,
}

impl Error {
    /// Create a new error, capturing the trace identifier in scope.
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        let message = message.into();
        let message = if message.trim().is_empty() {
            FALLBACK_MESSAGE.to_owned()
        } else {
            message
        };
        Self {
            code,
            message,
            trace_id: TraceId::current().map(|id| id.to_string()),
            details: None,
        }
    }

    /// Stable machine-readable error code.
    pub fn code(&self) -> ErrorCode {
        self.code
    }

    /// Human-readable message returned to adapters.
    pub fn message(&self) -> &str {
        self.message.as_str()
    }

    /// Correlation identifier captured when the error was raised.
    pub fn trace_id(&self) -> Option<&str> {
        self.trace_id.as_deref()
    }

    /// Supplementary error details for adapters.
    pub fn details(&self) -> Option<&Value> {
        self.details.as_ref()
    }

    /// Attach a trace identifier to the error.
    pub fn with_trace_id(mut self, id: impl Into<String>) -> Self {
        self.trace_id = Some(id.into());
        self
    }

    /// Attach structured details to the error.
    ///
    /// # Examples
    /// ```
    /// use pr_reviewers::domain::Error;
    /// use serde_json::json;
    ///
    /// let err = Error::invalid_request("team_name is empty")
    ///     .with_details(json!({ "field": "team_name" }));
    /// assert!(err.details().is_some());
    /// ```
    pub fn with_details(mut self, details: Value) -> Self {
        self.details = Some(details);
        self
    }

    /// Convenience constructor for [`ErrorCode::TeamExists`].
    pub fn team_exists(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::TeamExists, message)
    }

    /// Convenience constructor for [`ErrorCode::PullRequestExists`].
    pub fn pull_request_exists(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::PullRequestExists, message)
    }

    /// Convenience constructor for [`ErrorCode::PullRequestMerged`].
    pub fn pull_request_merged(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::PullRequestMerged, message)
    }

    /// Convenience constructor for [`ErrorCode::NotAssigned`].
    pub fn not_assigned(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::NotAssigned, message)
    }

    /// Convenience constructor for [`ErrorCode::NoCandidate`].
    pub fn no_candidate(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::NoCandidate, message)
    }

    /// Convenience constructor for [`ErrorCode::NotFound`].
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::NotFound, message)
    }

    /// Convenience constructor for [`ErrorCode::InvalidRequest`].
    pub fn invalid_request(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::InvalidRequest, message)
    }

    /// Convenience constructor for [`ErrorCode::ServiceUnavailable`].
    pub fn service_unavailable(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::ServiceUnavailable, message)
    }

    /// Convenience constructor for [`ErrorCode::InternalError`].
    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::InternalError, message)
    }
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for Error {}
