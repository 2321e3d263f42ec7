//! Driving port for the pull request review lifecycle.

use async_trait::async_trait;

use crate::domain::{Error, PullRequest, UserId};

/// Request to open a pull request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreatePullRequestRequest {
    /// Caller-supplied unique id.
    pub pull_request_id: String,
    /// Title.
    pub pull_request_name: String,
    /// Author; must be an existing user.
    pub author_id: String,
}

/// Request to merge a pull request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MergePullRequestRequest {
    /// Target pull request.
    pub pull_request_id: String,
}

/// Request to replace one reviewer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReassignReviewerRequest {
    /// Target pull request.
    pub pull_request_id: String,
    /// Reviewer to take off the pull request.
    pub old_reviewer_id: String,
}

/// Outcome of a successful reassignment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReassignReviewerResponse {
    /// Pull request as stored after the swap.
    pub pull_request: PullRequest,
    /// Reviewer who took over.
    pub replaced_by: UserId,
}

/// Driving port for pull request writes.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PullRequestCommand: Send + Sync {
    /// Open a pull request and assign up to two reviewers from the author's
    /// team.
    async fn create_pull_request(
        &self,
        request: CreatePullRequestRequest,
    ) -> Result<PullRequest, Error>;

    /// Merge a pull request. Merging twice is a no-op.
    async fn merge_pull_request(
        &self,
        request: MergePullRequestRequest,
    ) -> Result<PullRequest, Error>;

    /// Swap one reviewer for a randomly chosen eligible team mate.
    async fn reassign_reviewer(
        &self,
        request: ReassignReviewerRequest,
    ) -> Result<ReassignReviewerResponse, Error>;
}
