//! Pull request review lifecycle service.
//!
//! Sequences directory and store calls around the rules in
//! [`crate::domain::assignment`]:
//!
//! - creation resolves the author's team and assigns up to two active team
//!   mates, oldest account first;
//! - merging is idempotent;
//! - reassignment swaps one reviewer for a random eligible team mate of the
//!   reviewer being replaced, then re-reads the stored pull request.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{debug, error, info, warn};

use crate::domain::assignment::{
    AssignmentError, ReassignmentPolicy, ReviewerPicker, choose_replacement, ensure_reassignable,
    replacement_pool, select_reviewers,
};
use crate::domain::ports::{
    CreatePullRequestRequest, MergePullRequestRequest, PullRequestCommand, PullRequestStore,
    PullRequestStoreError, ReassignReviewerRequest, ReassignReviewerResponse, TeamDirectory,
    TeamDirectoryError, UserDirectory,
};
use crate::domain::request_fields::parse_required;
use crate::domain::user_service::map_user_directory_error;
use crate::domain::{
    Error, NewPullRequest, PullRequest, PullRequestId, PullRequestTitle, UserId,
};

fn not_found() -> Error {
    Error::not_found("resource not found")
}

fn map_store_error(error: PullRequestStoreError) -> Error {
    match error {
        PullRequestStoreError::AlreadyExists { .. } => {
            Error::pull_request_exists("PR id already exists")
        }
        PullRequestStoreError::AuthorNotFound { .. } | PullRequestStoreError::NotFound { .. } => {
            not_found()
        }
        PullRequestStoreError::Connection { message } => {
            error!(%message, "pull request store unavailable");
            Error::service_unavailable(format!("pull request store unavailable: {message}"))
        }
        PullRequestStoreError::Query { message } => {
            error!(%message, "pull request store query failed");
            Error::internal(format!("pull request store error: {message}"))
        }
    }
}

fn map_team_error(error: TeamDirectoryError) -> Error {
    match error {
        TeamDirectoryError::Connection { message } => {
            error!(%message, "team directory unavailable");
            Error::service_unavailable(format!("team directory unavailable: {message}"))
        }
        other => {
            error!(error = %other, "team directory query failed");
            Error::internal(format!("team directory error: {other}"))
        }
    }
}

fn map_assignment_error(error: AssignmentError) -> Error {
    match error {
        AssignmentError::PullRequestMerged => Error::pull_request_merged(error.to_string()),
        AssignmentError::NotAssigned { .. } => Error::not_assigned(error.to_string()),
        AssignmentError::NoCandidate => Error::no_candidate(error.to_string()),
    }
}

/// Pull request service implementing [`PullRequestCommand`].
#[derive(Clone)]
pub struct PullRequestService<U, T, S> {
    users: Arc<U>,
    teams: Arc<T>,
    pull_requests: Arc<S>,
    picker: Arc<dyn ReviewerPicker>,
    policy: ReassignmentPolicy,
}

impl<U, T, S> PullRequestService<U, T, S> {
    /// Create a service over the directories, the store, and a replacement
    /// picker.
    pub fn new(
        users: Arc<U>,
        teams: Arc<T>,
        pull_requests: Arc<S>,
        picker: Arc<dyn ReviewerPicker>,
    ) -> Self {
        Self {
            users,
            teams,
            pull_requests,
            picker,
            policy: ReassignmentPolicy::default(),
        }
    }

    /// Replace the reassignment policy.
    #[must_use]
    pub fn with_policy(mut self, policy: ReassignmentPolicy) -> Self {
        self.policy = policy;
        self
    }
}

impl<U, T, S> PullRequestService<U, T, S>
where
    U: UserDirectory,
    T: TeamDirectory,
    S: PullRequestStore,
{
    async fn initial_reviewers(&self, author_id: &UserId) -> Result<Vec<UserId>, Error> {
        let Some(team_name) = self
            .users
            .team_of(author_id)
            .await
            .map_err(map_user_directory_error)?
        else {
            debug!(author_id = %author_id, "author has no team; no reviewers assigned");
            return Ok(Vec::new());
        };

        let candidates = self
            .pull_requests
            .active_team_members(&team_name, author_id)
            .await
            .map_err(map_store_error)?;
        Ok(select_reviewers(author_id, &candidates))
    }

    async fn find_existing(&self, id: &PullRequestId) -> Result<PullRequest, Error> {
        self.pull_requests
            .find(id)
            .await
            .map_err(map_store_error)?
            .ok_or_else(not_found)
    }

    async fn pick_replacement(
        &self,
        pull_request: &PullRequest,
        old_reviewer_id: &UserId,
    ) -> Result<UserId, Error> {
        let team_name = self
            .users
            .team_of(old_reviewer_id)
            .await
            .map_err(map_user_directory_error)?
            .ok_or_else(not_found)?;
        let members = self
            .teams
            .members(&team_name)
            .await
            .map_err(map_team_error)?
            .ok_or_else(not_found)?;

        let pool = replacement_pool(pull_request, old_reviewer_id, &members, self.policy);
        debug!(
            pull_request_id = %pull_request.id(),
            team_name = %team_name,
            pool_size = pool.len(),
            "replacement pool computed"
        );
        choose_replacement(&pool, self.picker.as_ref()).map_err(map_assignment_error)
    }
}

#[async_trait]
impl<U, T, S> PullRequestCommand for PullRequestService<U, T, S>
where
    U: UserDirectory,
    T: TeamDirectory,
    S: PullRequestStore,
{
    async fn create_pull_request(
        &self,
        request: CreatePullRequestRequest,
    ) -> Result<PullRequest, Error> {
        let id: PullRequestId = parse_required(request.pull_request_id, "pull_request_id")?;
        let title: PullRequestTitle =
            parse_required(request.pull_request_name, "pull_request_name")?;
        let author_id: UserId = parse_required(request.author_id, "author_id")?;
        debug!(pull_request_id = %id, author_id = %author_id, "creating pull request");

        self.users
            .find(&author_id)
            .await
            .map_err(map_user_directory_error)?
            .ok_or_else(not_found)?;

        let reviewers = self.initial_reviewers(&author_id).await?;
        let created = self
            .pull_requests
            .create(&NewPullRequest {
                id,
                title,
                author_id,
                reviewers,
            })
            .await
            .map_err(map_store_error)?;

        info!(
            pull_request_id = %created.id(),
            reviewers = created.assigned_reviewers().len(),
            "pull request created"
        );
        Ok(created)
    }

    async fn merge_pull_request(
        &self,
        request: MergePullRequestRequest,
    ) -> Result<PullRequest, Error> {
        let id: PullRequestId = parse_required(request.pull_request_id, "pull_request_id")?;
        let merged = self
            .pull_requests
            .merge(&id)
            .await
            .map_err(map_store_error)?;

        info!(pull_request_id = %id, merged_at = ?merged.merged_at(), "pull request merged");
        Ok(merged)
    }

    async fn reassign_reviewer(
        &self,
        request: ReassignReviewerRequest,
    ) -> Result<ReassignReviewerResponse, Error> {
        let id: PullRequestId = parse_required(request.pull_request_id, "pull_request_id")?;
        let old_reviewer_id: UserId = parse_required(request.old_reviewer_id, "old_user_id")?;
        debug!(
            pull_request_id = %id,
            old_reviewer_id = %old_reviewer_id,
            "reassigning reviewer"
        );

        let pull_request = self.find_existing(&id).await?;
        ensure_reassignable(&pull_request, &old_reviewer_id).map_err(|err| {
            warn!(pull_request_id = %id, error = %err, "reassignment refused");
            map_assignment_error(err)
        })?;

        let replacement = self
            .pick_replacement(&pull_request, &old_reviewer_id)
            .await?;
        self.pull_requests
            .reassign(&id, &old_reviewer_id, &replacement)
            .await
            .map_err(map_store_error)?;

        let updated = self.find_existing(&id).await?;
        info!(
            pull_request_id = %id,
            old_reviewer_id = %old_reviewer_id,
            new_reviewer_id = %replacement,
            "reviewer reassigned"
        );
        Ok(ReassignReviewerResponse {
            pull_request: updated,
            replaced_by: replacement,
        })
    }
}

#[cfg(test)]
#[path = "pull_request_service_tests.rs"]
mod tests;
