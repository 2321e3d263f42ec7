//! Reviewer assignment rules.
//!
//! Pure decision logic used by the pull request service:
//!
//! - [`select_reviewers`] picks the initial reviewers when a pull request is
//!   opened. The directory supplies candidates oldest account first and the
//!   first [`MAX_REVIEWERS`] eligible ones win.
//! - [`ensure_reassignable`] and [`replacement_pool`] gate and scope a
//!   reviewer swap; the final choice among the pool is delegated to a
//!   [`ReviewerPicker`].
//!
//! Nothing here touches storage. Callers persist the outcome.

mod picker;

#[cfg(test)]
pub use picker::MockReviewerPicker;
pub use picker::{RandomReviewerPicker, ReviewerPicker};

use std::collections::HashSet;

use super::{PullRequest, User, UserId};

/// Upper bound on reviewers assigned to a single pull request.
pub const MAX_REVIEWERS: usize = 2;

/// Reasons a reassignment request is refused.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AssignmentError {
    /// The pull request is merged and its reviewers are frozen.
    #[error("cannot reassign on merged PR")]
    PullRequestMerged,
    /// The reviewer to replace is not on the pull request.
    #[error("reviewer is not assigned to this PR")]
    NotAssigned {
        /// Reviewer named in the request.
        reviewer_id: UserId,
    },
    /// Nobody in the team can take over.
    #[error("no active replacement candidate in team")]
    NoCandidate,
}

/// Controls which team members may replace a reviewer.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReassignmentPolicy {
    /// Allow inactive members into the replacement pool.
    pub include_inactive: bool,
}

impl ReassignmentPolicy {
    /// Policy that also considers inactive members.
    pub const fn including_inactive() -> Self {
        Self {
            include_inactive: true,
        }
    }
}

/// Pick the initial reviewers for a new pull request.
///
/// `candidates` is expected to hold active team members other than the
/// author, ordered oldest account first. The author, inactive users, and
/// repeated ids are skipped regardless so the result always satisfies the
/// pull request invariants.
///
/// # Examples
/// ```
/// use pr_reviewers::domain::assignment::select_reviewers;
/// use pr_reviewers::domain::{User, UserId, Username};
///
/// let id = |raw: &str| UserId::new(raw).expect("valid id");
/// let user = |raw: &str| User::new(id(raw), Username::new(raw).expect("valid name"), true);
///
/// let picked = select_reviewers(&id("author"), &[user("r1"), user("r2"), user("r3")]);
/// assert_eq!(picked, vec![id("r1"), id("r2")]);
/// ```
pub fn select_reviewers(author_id: &UserId, candidates: &[User]) -> Vec<UserId> {
    let mut seen = HashSet::new();
    candidates
        .iter()
        .filter(|user| user.is_active() && user.id() != author_id)
        .filter(|user| seen.insert(user.id()))
        .take(MAX_REVIEWERS)
        .map(|user| user.id().clone())
        .collect()
}

/// Check that `old_reviewer_id` may be swapped out of `pull_request`.
///
/// Merged pull requests are refused before assignment is inspected.
pub fn ensure_reassignable(
    pull_request: &PullRequest,
    old_reviewer_id: &UserId,
) -> Result<(), AssignmentError> {
    if pull_request.is_merged() {
        return Err(AssignmentError::PullRequestMerged);
    }
    if !pull_request.has_reviewer(old_reviewer_id) {
        return Err(AssignmentError::NotAssigned {
            reviewer_id: old_reviewer_id.clone(),
        });
    }
    Ok(())
}

/// Team members eligible to replace `old_reviewer_id`, in team order.
pub fn replacement_pool(
    pull_request: &PullRequest,
    old_reviewer_id: &UserId,
    team_members: &[User],
    policy: ReassignmentPolicy,
) -> Vec<UserId> {
    let mut seen = HashSet::new();
    team_members
        .iter()
        .filter(|user| policy.include_inactive || user.is_active())
        .map(User::id)
        .filter(|id| {
            *id != old_reviewer_id
                && *id != pull_request.author_id()
                && !pull_request.has_reviewer(id)
        })
        .filter(|id| seen.insert(*id))
        .cloned()
        .collect()
}

/// Choose the replacement reviewer, failing when the pool is empty.
pub fn choose_replacement(
    pool: &[UserId],
    picker: &dyn ReviewerPicker,
) -> Result<UserId, AssignmentError> {
    picker.pick(pool).ok_or(AssignmentError::NoCandidate)
}

#[cfg(test)]
mod tests;
