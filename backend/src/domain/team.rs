//! Team aggregate.

use std::collections::HashSet;

use super::{TeamName, User, UserId};

/// Validation errors raised by [`Team::new`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TeamValidationError {
    /// The team has no members.
    #[error("team must have at least one member")]
    NoMembers,
    /// The same user id appears more than once.
    #[error("user {user_id} is listed more than once")]
    DuplicateMember {
        /// Repeated identifier.
        user_id: UserId,
    },
}

/// Named group of users. Members are ordered oldest account first.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Team {
    name: TeamName,
    members: Vec<User>,
}

impl Team {
    /// Build a team, rejecting empty or duplicated membership lists.
    ///
    /// # Examples
    /// ```
    /// use pr_reviewers::domain::{Team, TeamName, User, UserId, Username};
    ///
    /// let member = User::new(
    ///     UserId::new("u1").expect("id"),
    ///     Username::new("Alice").expect("name"),
    ///     true,
    /// );
    /// let team = Team::new(TeamName::new("backend").expect("name"), vec![member])
    ///     .expect("valid team");
    /// assert_eq!(team.members().len(), 1);
    /// ```
    pub fn new(name: TeamName, members: Vec<User>) -> Result<Self, TeamValidationError> {
        if members.is_empty() {
            return Err(TeamValidationError::NoMembers);
        }
        let mut seen = HashSet::with_capacity(members.len());
        for member in &members {
            if !seen.insert(member.id()) {
                return Err(TeamValidationError::DuplicateMember {
                    user_id: member.id().clone(),
                });
            }
        }
        Ok(Self { name, members })
    }

    /// Team name.
    pub fn name(&self) -> &TeamName {
        &self.name
    }

    /// Members in account creation order.
    pub fn members(&self) -> &[User] {
        &self.members
    }

    /// Consume the team and return its parts.
    pub fn into_parts(self) -> (TeamName, Vec<User>) {
        (self.name, self.members)
    }
}
