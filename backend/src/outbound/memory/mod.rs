//! In-process review store.
//!
//! `InMemoryReviewStore` implements every driven port over a single mutex so
//! the service runs without PostgreSQL (local development, BDD scenarios).
//! Users keep an insertion sequence standing in for the account creation
//! timestamp, which gives the same oldest-first ordering as the SQL adapter.

use std::collections::{BTreeMap, HashMap};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use async_trait::async_trait;
use mockable::{Clock, DefaultClock};
use tracing::debug;

use crate::domain::ports::{
    PullRequestStore, PullRequestStoreError, TeamDirectory, TeamDirectoryError, UserDirectory,
    UserDirectoryError, UserMembership,
};
use crate::domain::{
    NewPullRequest, PullRequest, PullRequestDraft, PullRequestId, PullRequestStatus,
    PullRequestSummary, Team, TeamName, User, UserId,
};

#[derive(Debug, Clone)]
struct StoredUser {
    user: User,
    sequence: u64,
}

#[derive(Debug, Default)]
struct State {
    users: HashMap<UserId, StoredUser>,
    next_sequence: u64,
    teams: BTreeMap<TeamName, Vec<UserId>>,
    pull_requests: HashMap<PullRequestId, PullRequest>,
}

impl State {
    fn insert_user_if_missing(&mut self, user: &User) {
        if self.users.contains_key(user.id()) {
            return;
        }
        let sequence = self.next_sequence;
        self.next_sequence += 1;
        self.users.insert(
            user.id().clone(),
            StoredUser {
                user: user.clone(),
                sequence,
            },
        );
    }

    /// Members of a team, oldest account first.
    fn members_of(&self, team_name: &TeamName) -> Option<Vec<User>> {
        let ids = self.teams.get(team_name)?;
        let mut members: Vec<&StoredUser> =
            ids.iter().filter_map(|id| self.users.get(id)).collect();
        members.sort_by_key(|stored| stored.sequence);
        Some(members.into_iter().map(|s| s.user.clone()).collect())
    }

    fn team_of(&self, user_id: &UserId) -> Option<TeamName> {
        self.teams
            .iter()
            .find(|(_, members)| members.contains(user_id))
            .map(|(name, _)| name.clone())
    }
}

/// Thread-safe in-memory implementation of the directory and store ports.
#[derive(Clone)]
pub struct InMemoryReviewStore {
    state: Arc<Mutex<State>>,
    clock: Arc<dyn Clock>,
}

impl InMemoryReviewStore {
    /// Create an empty store stamped with the system clock.
    pub fn new() -> Self {
        Self::with_clock(Arc::new(DefaultClock))
    }

    /// Create an empty store using `clock` for creation and merge timestamps.
    pub fn with_clock(clock: Arc<dyn Clock>) -> Self {
        Self {
            state: Arc::new(Mutex::new(State::default())),
            clock,
        }
    }

    fn lock(&self) -> MutexGuard<'_, State> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Default for InMemoryReviewStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl TeamDirectory for InMemoryReviewStore {
    async fn create(&self, team: &Team) -> Result<Team, TeamDirectoryError> {
        let mut state = self.lock();
        if state.teams.contains_key(team.name()) {
            return Err(TeamDirectoryError::team_exists(team.name().as_str()));
        }

        for member in team.members() {
            state.insert_user_if_missing(member);
        }
        let ids = team.members().iter().map(|u| u.id().clone()).collect();
        state.teams.insert(team.name().clone(), ids);

        let members = state.members_of(team.name()).unwrap_or_default();
        debug!(team_name = %team.name(), members = members.len(), "team stored in memory");
        Team::new(team.name().clone(), members)
            .map_err(|err| TeamDirectoryError::query(err.to_string()))
    }

    async fn members(&self, team_name: &TeamName) -> Result<Option<Vec<User>>, TeamDirectoryError> {
        Ok(self.lock().members_of(team_name))
    }
}

#[async_trait]
impl UserDirectory for InMemoryReviewStore {
    async fn find(&self, user_id: &UserId) -> Result<Option<User>, UserDirectoryError> {
        Ok(self.lock().users.get(user_id).map(|s| s.user.clone()))
    }

    async fn team_of(&self, user_id: &UserId) -> Result<Option<TeamName>, UserDirectoryError> {
        Ok(self.lock().team_of(user_id))
    }

    async fn set_active(
        &self,
        user_id: &UserId,
        active: bool,
    ) -> Result<Option<UserMembership>, UserDirectoryError> {
        let mut state = self.lock();
        let Some(stored) = state.users.get_mut(user_id) else {
            return Ok(None);
        };
        stored.user = stored.user.clone().with_active(active);
        let user = stored.user.clone();
        Ok(Some(UserMembership {
            team_name: state.team_of(user_id),
            user,
        }))
    }
}

fn rebuild(draft: PullRequestDraft) -> Result<PullRequest, PullRequestStoreError> {
    PullRequest::new(draft).map_err(|err| PullRequestStoreError::query(err.to_string()))
}

#[async_trait]
impl PullRequestStore for InMemoryReviewStore {
    async fn create(
        &self,
        pull_request: &NewPullRequest,
    ) -> Result<PullRequest, PullRequestStoreError> {
        let mut state = self.lock();
        if state.pull_requests.contains_key(&pull_request.id) {
            return Err(PullRequestStoreError::already_exists(
                pull_request.id.as_str(),
            ));
        }
        if !state.users.contains_key(&pull_request.author_id) {
            return Err(PullRequestStoreError::author_not_found(
                pull_request.author_id.as_str(),
            ));
        }
        if let Some(unknown) = pull_request
            .reviewers
            .iter()
            .find(|id| !state.users.contains_key(*id))
        {
            return Err(PullRequestStoreError::query(format!(
                "unknown reviewer {unknown}"
            )));
        }

        let created = rebuild(PullRequestDraft {
            id: pull_request.id.clone(),
            title: pull_request.title.clone(),
            author_id: pull_request.author_id.clone(),
            status: PullRequestStatus::Open,
            assigned_reviewers: pull_request.reviewers.clone(),
            created_at: self.clock.utc(),
            merged_at: None,
        })?;
        state
            .pull_requests
            .insert(created.id().clone(), created.clone());
        Ok(created)
    }

    async fn find(
        &self,
        pull_request_id: &PullRequestId,
    ) -> Result<Option<PullRequest>, PullRequestStoreError> {
        Ok(self.lock().pull_requests.get(pull_request_id).cloned())
    }

    async fn merge(
        &self,
        pull_request_id: &PullRequestId,
    ) -> Result<PullRequest, PullRequestStoreError> {
        let mut state = self.lock();
        let Some(current) = state.pull_requests.get(pull_request_id) else {
            return Err(PullRequestStoreError::not_found(pull_request_id.as_str()));
        };
        if current.is_merged() {
            return Ok(current.clone());
        }

        let mut draft = current.clone().into_draft();
        draft.status = PullRequestStatus::Merged;
        draft.merged_at = Some(self.clock.utc());
        let merged = rebuild(draft)?;
        state
            .pull_requests
            .insert(pull_request_id.clone(), merged.clone());
        Ok(merged)
    }

    async fn reassign(
        &self,
        pull_request_id: &PullRequestId,
        old_reviewer_id: &UserId,
        new_reviewer_id: &UserId,
    ) -> Result<(), PullRequestStoreError> {
        let mut state = self.lock();
        let not_found = || PullRequestStoreError::not_found(pull_request_id.as_str());
        let current = state.pull_requests.get(pull_request_id).ok_or_else(not_found)?;
        if current.is_merged()
            || !current.has_reviewer(old_reviewer_id)
            || current.has_reviewer(new_reviewer_id)
        {
            return Err(not_found());
        }

        let mut draft = current.clone().into_draft();
        for reviewer in &mut draft.assigned_reviewers {
            if reviewer == old_reviewer_id {
                *reviewer = new_reviewer_id.clone();
            }
        }
        let updated = rebuild(draft)?;
        state.pull_requests.insert(pull_request_id.clone(), updated);
        Ok(())
    }

    async fn active_team_members(
        &self,
        team_name: &TeamName,
        exclude: &UserId,
    ) -> Result<Vec<User>, PullRequestStoreError> {
        let state = self.lock();
        Ok(state
            .members_of(team_name)
            .unwrap_or_default()
            .into_iter()
            .filter(|user| user.is_active() && user.id() != exclude)
            .collect())
    }

    async fn review_queue(
        &self,
        user_id: &UserId,
    ) -> Result<Vec<PullRequestSummary>, PullRequestStoreError> {
        let state = self.lock();
        let mut assigned: Vec<&PullRequest> = state
            .pull_requests
            .values()
            .filter(|pr| pr.has_reviewer(user_id))
            .collect();
        assigned.sort_by(|a, b| {
            a.created_at()
                .cmp(&b.created_at())
                .then_with(|| a.id().cmp(b.id()))
        });
        Ok(assigned.into_iter().map(PullRequest::summary).collect())
    }
}
