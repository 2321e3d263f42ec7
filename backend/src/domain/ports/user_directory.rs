//! Port for user lookups and activity changes.

use async_trait::async_trait;

use crate::domain::{TeamName, User, UserId};

use super::define_port_error;

define_port_error! {
    /// Errors raised by user directory adapters.
    pub enum UserDirectoryError {
        /// Directory connection could not be established.
        Connection { message: String } =>
            "user directory connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } =>
            "user directory query failed: {message}",
    }
}

/// A user together with the team they are resolved to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserMembership {
    /// The user.
    pub user: User,
    /// First team by name, if the user belongs to any.
    pub team_name: Option<TeamName>,
}

/// Port for reading users and toggling their availability.
///
/// A user may belong to several teams; adapters resolve "the" team as the
/// alphabetically first team name.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserDirectory: Send + Sync {
    /// Find a user by id.
    async fn find(&self, user_id: &UserId) -> Result<Option<User>, UserDirectoryError>;

    /// Resolve the team of `user_id`.
    async fn team_of(&self, user_id: &UserId) -> Result<Option<TeamName>, UserDirectoryError>;

    /// Update the activity flag, returning `None` for unknown users.
    async fn set_active(
        &self,
        user_id: &UserId,
        active: bool,
    ) -> Result<Option<UserMembership>, UserDirectoryError>;
}
