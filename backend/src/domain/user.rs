//! User data model.

use serde::{Deserialize, Serialize};

use super::{UserId, Username};

/// Team member who may author or review pull requests.
///
/// Inactive users keep their team membership but are never picked as
/// reviewers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    id: UserId,
    username: Username,
    active: bool,
}

impl User {
    /// Build a user from validated parts.
    pub fn new(id: UserId, username: Username, active: bool) -> Self {
        Self {
            id,
            username,
            active,
        }
    }

    /// Stable identifier.
    pub fn id(&self) -> &UserId {
        &self.id
    }

    /// Display name.
    pub fn username(&self) -> &Username {
        &self.username
    }

    /// Whether the user may be assigned as a reviewer.
    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Return a copy of the user with the activity flag replaced.
    #[must_use]
    pub fn with_active(mut self, active: bool) -> Self {
        self.active = active;
        self
    }
}
