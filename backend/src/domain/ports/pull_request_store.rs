//! Port for pull request persistence and reviewer bookkeeping.

use async_trait::async_trait;

use crate::domain::{
    NewPullRequest, PullRequest, PullRequestId, PullRequestSummary, TeamName, User, UserId,
};

use super::define_port_error;

define_port_error! {
    /// Errors raised by pull request store adapters.
    pub enum PullRequestStoreError {
        /// Store connection could not be established.
        Connection { message: String } =>
            "pull request store connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } =>
            "pull request store query failed: {message}",
        /// The pull request id is already taken.
        AlreadyExists { pull_request_id: String } =>
            "pull request {pull_request_id} already exists",
        /// The author does not exist.
        AuthorNotFound { author_id: String } =>
            "author {author_id} not found",
        /// The pull request is missing, or a conditional update matched nothing.
        NotFound { pull_request_id: String } =>
            "pull request {pull_request_id} not found",
    }
}

/// Port for storing pull requests and swapping reviewers atomically.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PullRequestStore: Send + Sync {
    /// Insert an `OPEN` pull request with its reviewers in one transaction.
    async fn create(&self, pull_request: &NewPullRequest)
    -> Result<PullRequest, PullRequestStoreError>;

    /// Find a pull request with reviewers in assignment order.
    async fn find(
        &self,
        pull_request_id: &PullRequestId,
    ) -> Result<Option<PullRequest>, PullRequestStoreError>;

    /// Mark a pull request merged.
    ///
    /// Already merged pull requests are returned unchanged, keeping the
    /// original `merged_at`.
    async fn merge(
        &self,
        pull_request_id: &PullRequestId,
    ) -> Result<PullRequest, PullRequestStoreError>;

    /// Replace `old_reviewer_id` by `new_reviewer_id` while the pull request is
    /// open.
    ///
    /// Fails with `NotFound` when no row matched, which includes losing a race
    /// against a concurrent swap or merge.
    async fn reassign(
        &self,
        pull_request_id: &PullRequestId,
        old_reviewer_id: &UserId,
        new_reviewer_id: &UserId,
    ) -> Result<(), PullRequestStoreError>;

    /// Active members of `team_name` other than `exclude`, oldest account
    /// first.
    async fn active_team_members(
        &self,
        team_name: &TeamName,
        exclude: &UserId,
    ) -> Result<Vec<User>, PullRequestStoreError>;

    /// Pull requests reviewed by `user_id`, oldest first.
    async fn review_queue(
        &self,
        user_id: &UserId,
    ) -> Result<Vec<PullRequestSummary>, PullRequestStoreError>;
}
