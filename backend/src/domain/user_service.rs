//! User availability and review queue service.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{error, info};

use crate::domain::ports::{
    PullRequestStore, PullRequestStoreError, ReviewQueue, ReviewQueueQuery, SetUserActiveRequest,
    UserCommand, UserDirectory, UserDirectoryError, UserMembership,
};
use crate::domain::request_fields::parse_required;
use crate::domain::{Error, UserId};

pub(crate) fn map_user_directory_error(error: UserDirectoryError) -> Error {
    match error {
        UserDirectoryError::Connection { message } => {
            error!(%message, "user directory unavailable");
            Error::service_unavailable(format!("user directory unavailable: {message}"))
        }
        UserDirectoryError::Query { message } => {
            error!(%message, "user directory query failed");
            Error::internal(format!("user directory error: {message}"))
        }
    }
}

/// User service implementing [`UserCommand`] and [`ReviewQueueQuery`].
#[derive(Clone)]
pub struct UserService<U, S> {
    users: Arc<U>,
    pull_requests: Arc<S>,
}

impl<U, S> UserService<U, S> {
    /// Create a service over the user directory and pull request store.
    pub fn new(users: Arc<U>, pull_requests: Arc<S>) -> Self {
        Self {
            users,
            pull_requests,
        }
    }
}

#[async_trait]
impl<U, S> UserCommand for UserService<U, S>
where
    U: UserDirectory,
    S: PullRequestStore,
{
    async fn set_user_active(
        &self,
        request: SetUserActiveRequest,
    ) -> Result<UserMembership, Error> {
        let user_id: UserId = parse_required(request.user_id, "user_id")?;
        let membership = self
            .users
            .set_active(&user_id, request.is_active)
            .await
            .map_err(map_user_directory_error)?
            .ok_or_else(|| Error::not_found("resource not found"))?;

        info!(
            user_id = %user_id,
            is_active = request.is_active,
            "user activity updated"
        );
        Ok(membership)
    }
}

#[async_trait]
impl<U, S> ReviewQueueQuery for UserService<U, S>
where
    U: UserDirectory,
    S: PullRequestStore,
{
    async fn review_queue(&self, user_id: String) -> Result<ReviewQueue, Error> {
        let user_id: UserId = parse_required(user_id, "user_id")?;
        self.users
            .find(&user_id)
            .await
            .map_err(map_user_directory_error)?
            .ok_or_else(|| Error::not_found("resource not found"))?;

        let pull_requests = self
            .pull_requests
            .review_queue(&user_id)
            .await
            .map_err(|err| match err {
                PullRequestStoreError::Connection { message } => {
                    error!(%message, "pull request store unavailable");
                    Error::service_unavailable(format!(
                        "pull request store unavailable: {message}"
                    ))
                }
                other => {
                    error!(error = %other, "review queue query failed");
                    Error::internal(format!("pull request store error: {other}"))
                }
            })?;

        if pull_requests.is_empty() {
            return Err(Error::not_found("resource not found"));
        }
        Ok(ReviewQueue {
            user_id,
            pull_requests,
        })
    }
}

#[cfg(test)]
#[path = "user_service_tests.rs"]
mod tests;
