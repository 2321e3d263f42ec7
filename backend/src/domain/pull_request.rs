//! Pull request aggregate and its review lifecycle.
//!
//! A pull request starts `OPEN` and may move to `MERGED` exactly once. The
//! reviewer list keeps assignment order and never contains the author or the
//! same user twice.

use std::collections::HashSet;
use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{PullRequestId, PullRequestTitle, UserId};
use super::assignment::MAX_REVIEWERS;

/// Lifecycle state of a pull request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PullRequestStatus {
    /// Accepting review changes.
    Open,
    /// Merged; reviewers are frozen.
    Merged,
}

impl PullRequestStatus {
    /// Wire and storage representation.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Open => "OPEN",
            Self::Merged => "MERGED",
        }
    }
}

impl fmt::Display for PullRequestStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when parsing an unknown status string.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown pull request status: {0}")]
pub struct UnknownStatusError(pub String);

impl FromStr for PullRequestStatus {
    type Err = UnknownStatusError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "OPEN" => Ok(Self::Open),
            "MERGED" => Ok(Self::Merged),
            other => Err(UnknownStatusError(other.to_owned())),
        }
    }
}

/// Invariant violations detected while assembling a [`PullRequest`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PullRequestValidationError {
    /// The author is listed as a reviewer.
    #[error("author {author_id} cannot review their own pull request")]
    AuthorIsReviewer {
        /// Offending author id.
        author_id: UserId,
    },
    /// A reviewer appears twice.
    #[error("reviewer {user_id} is assigned more than once")]
    DuplicateReviewer {
        /// Repeated reviewer id.
        user_id: UserId,
    },
    /// More reviewers than allowed.
    #[error("at most {max} reviewers may be assigned, got {actual}")]
    TooManyReviewers {
        /// Allowed maximum.
        max: usize,
        /// Observed count.
        actual: usize,
    },
    /// `merged_at` disagrees with the status.
    #[error("merged_at must be set exactly when the status is MERGED")]
    MergeTimestampMismatch,
}

/// Raw parts used to assemble a [`PullRequest`].
#[derive(Debug, Clone)]
pub struct PullRequestDraft {
    /// Identifier.
    pub id: PullRequestId,
    /// Title.
    pub title: PullRequestTitle,
    /// Author.
    pub author_id: UserId,
    /// Lifecycle state.
    pub status: PullRequestStatus,
    /// Reviewers in assignment order.
    pub assigned_reviewers: Vec<UserId>,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Merge timestamp, present only once merged.
    pub merged_at: Option<DateTime<Utc>>,
}

/// Pull request with its assigned reviewers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PullRequest {
    id: PullRequestId,
    title: PullRequestTitle,
    author_id: UserId,
    status: PullRequestStatus,
    assigned_reviewers: Vec<UserId>,
    created_at: DateTime<Utc>,
    merged_at: Option<DateTime<Utc>>,
}

impl PullRequest {
    /// Validate a draft and build the aggregate.
    pub fn new(draft: PullRequestDraft) -> Result<Self, PullRequestValidationError> {
        let PullRequestDraft {
            id,
            title,
            author_id,
            status,
            assigned_reviewers,
            created_at,
            merged_at,
        } = draft;

        if assigned_reviewers.len() > MAX_REVIEWERS {
            return Err(PullRequestValidationError::TooManyReviewers {
                max: MAX_REVIEWERS,
                actual: assigned_reviewers.len(),
            });
        }
        let mut seen = HashSet::with_capacity(assigned_reviewers.len());
        for reviewer in &assigned_reviewers {
            if *reviewer == author_id {
                return Err(PullRequestValidationError::AuthorIsReviewer { author_id });
            }
            if !seen.insert(reviewer) {
                return Err(PullRequestValidationError::DuplicateReviewer {
                    user_id: reviewer.clone(),
                });
            }
        }
        if (status == PullRequestStatus::Merged) != merged_at.is_some() {
            return Err(PullRequestValidationError::MergeTimestampMismatch);
        }

        Ok(Self {
            id,
            title,
            author_id,
            status,
            assigned_reviewers,
            created_at,
            merged_at,
        })
    }

    /// Identifier.
    pub fn id(&self) -> &PullRequestId {
        &self.id
    }

    /// Title.
    pub fn title(&self) -> &PullRequestTitle {
        &self.title
    }

    /// Author.
    pub fn author_id(&self) -> &UserId {
        &self.author_id
    }

    /// Lifecycle state.
    pub fn status(&self) -> PullRequestStatus {
        self.status
    }

    /// Whether the pull request has been merged.
    pub fn is_merged(&self) -> bool {
        self.status == PullRequestStatus::Merged
    }

    /// Reviewers in assignment order.
    pub fn assigned_reviewers(&self) -> &[UserId] {
        &self.assigned_reviewers
    }

    /// Whether `user_id` currently reviews this pull request.
    pub fn has_reviewer(&self, user_id: &UserId) -> bool {
        self.assigned_reviewers.contains(user_id)
    }

    /// Creation timestamp.
    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Merge timestamp.
    pub fn merged_at(&self) -> Option<DateTime<Utc>> {
        self.merged_at
    }

    /// Break the aggregate back into its raw parts.
    pub fn into_draft(self) -> PullRequestDraft {
        PullRequestDraft {
            id: self.id,
            title: self.title,
            author_id: self.author_id,
            status: self.status,
            assigned_reviewers: self.assigned_reviewers,
            created_at: self.created_at,
            merged_at: self.merged_at,
        }
    }

    /// Summary row used in review queues.
    pub fn summary(&self) -> PullRequestSummary {
        PullRequestSummary {
            id: self.id.clone(),
            title: self.title.clone(),
            author_id: self.author_id.clone(),
            status: self.status,
        }
    }
}

/// Lightweight pull request view listed in a reviewer's queue.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PullRequestSummary {
    /// Identifier.
    pub id: PullRequestId,
    /// Title.
    pub title: PullRequestTitle,
    /// Author.
    pub author_id: UserId,
    /// Lifecycle state.
    pub status: PullRequestStatus,
}

/// Pull request about to be persisted with its initial reviewers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewPullRequest {
    /// Identifier.
    pub id: PullRequestId,
    /// Title.
    pub title: PullRequestTitle,
    /// Author.
    pub author_id: UserId,
    /// Reviewers chosen at creation, oldest account first.
    pub reviewers: Vec<UserId>,
}
