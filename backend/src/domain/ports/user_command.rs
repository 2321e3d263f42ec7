//! Driving ports for user availability and review queues.

use async_trait::async_trait;

use crate::domain::{Error, PullRequestSummary, UserId};

use super::UserMembership;

/// Request to change whether a user can be picked as a reviewer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SetUserActiveRequest {
    /// Target user.
    pub user_id: String,
    /// New activity flag.
    pub is_active: bool,
}

/// Pull requests waiting on a reviewer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReviewQueue {
    /// The reviewer.
    pub user_id: UserId,
    /// Pull requests in creation order.
    pub pull_requests: Vec<PullRequestSummary>,
}

/// Driving port for user writes.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserCommand: Send + Sync {
    /// Set the activity flag and return the user with their team.
    async fn set_user_active(&self, request: SetUserActiveRequest)
    -> Result<UserMembership, Error>;
}

/// Driving port for reviewer queue reads.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ReviewQueueQuery: Send + Sync {
    /// Pull requests assigned to `user_id`. An unknown user or an empty queue
    /// is `NOT_FOUND`.
    async fn review_queue(&self, user_id: String) -> Result<ReviewQueue, Error>;
}
