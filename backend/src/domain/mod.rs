//! Domain primitives, aggregates, and services.
//!
//! Purpose: model teams, users, and pull requests with their reviewer
//! assignment rules, independent of HTTP and storage. Types validate their
//! invariants on construction; services orchestrate ports defined in
//! [`ports`].
//!
//! Public surface:
//! - Error / ErrorCode: API error payload and stable error identifiers.
//! - Identifiers (`UserId`, `TeamName`, `PullRequestId`, ...): non-blank
//!   string newtypes.
//! - User, Team, PullRequest: aggregates.
//! - TeamService, UserService, PullRequestService: driving port
//!   implementations.

pub mod assignment;
pub mod error;
pub mod identifiers;
pub mod ports;
pub mod pull_request;
pub mod pull_request_service;
pub(crate) mod request_fields;
pub mod team;
pub mod team_service;
pub mod trace_id;
pub mod user;
pub mod user_service;

pub use self::assignment::{RandomReviewerPicker, ReassignmentPolicy, ReviewerPicker};
pub use self::error::{Error, ErrorCode};
pub use self::identifiers::{
    BlankValueError, PullRequestId, PullRequestTitle, TeamName, UserId, Username,
};
pub use self::pull_request::{
    NewPullRequest, PullRequest, PullRequestDraft, PullRequestStatus, PullRequestSummary,
    PullRequestValidationError, UnknownStatusError,
};
pub use self::pull_request_service::PullRequestService;
pub use self::team::{Team, TeamValidationError};
pub use self::team_service::TeamService;
pub use self::trace_id::{TRACE_ID_HEADER, TraceId};
pub use self::user::User;
pub use self::user_service::UserService;

/// Convenient API result alias.
///
/// # Examples
/// ```
/// use pr_reviewers::domain::{ApiResult, Error};
///
/// fn lookup() -> ApiResult<()> {
///     Err(Error::not_found("resource not found"))
/// }
///
/// assert!(lookup().is_err());
/// ```
pub type ApiResult<T> = Result<T, Error>;
