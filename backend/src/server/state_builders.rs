//! Builders for HTTP state ports over the configured storage backend.

use std::sync::Arc;

use actix_web::web;
use tracing::info;

use pr_reviewers::domain::assignment::{RandomReviewerPicker, ReassignmentPolicy};
use pr_reviewers::domain::ports::{PullRequestStore, TeamDirectory, UserDirectory};
use pr_reviewers::domain::{PullRequestService, TeamService, UserService};
use pr_reviewers::inbound::http::state::{HttpState, HttpStatePorts};
use pr_reviewers::outbound::memory::InMemoryReviewStore;
use pr_reviewers::outbound::persistence::{
    DieselPullRequestStore, DieselTeamDirectory, DieselUserDirectory,
};

use super::ServerConfig;

/// Wire the domain services over one set of driven adapters.
fn build_ports<U, T, S>(
    users: Arc<U>,
    teams: Arc<T>,
    store: Arc<S>,
    policy: ReassignmentPolicy,
) -> HttpStatePorts
where
    U: UserDirectory + 'static,
    T: TeamDirectory + 'static,
    S: PullRequestStore + 'static,
{
    let team_service = Arc::new(TeamService::new(teams.clone()));
    let user_service = Arc::new(UserService::new(users.clone(), store.clone()));
    let pull_requests = Arc::new(
        PullRequestService::new(users, teams, store, Arc::new(RandomReviewerPicker::new()))
            .with_policy(policy),
    );

    HttpStatePorts {
        teams: team_service.clone(),
        teams_query: team_service,
        users: user_service.clone(),
        review_queue: user_service,
        pull_requests,
    }
}

/// Build HTTP state using Diesel adapters when a pool is configured, otherwise
/// a fresh in-memory store.
pub fn build_http_state(config: &ServerConfig) -> web::Data<HttpState> {
    let ports = match &config.db_pool {
        Some(pool) => {
            info!("using PostgreSQL storage");
            build_ports(
                Arc::new(DieselUserDirectory::new(pool.clone())),
                Arc::new(DieselTeamDirectory::new(pool.clone())),
                Arc::new(DieselPullRequestStore::new(pool.clone())),
                config.policy,
            )
        }
        None => {
            info!("no database configured; using in-memory storage");
            let store = Arc::new(InMemoryReviewStore::new());
            build_ports(store.clone(), store.clone(), store, config.policy)
        }
    };

    web::Data::new(HttpState::new(ports, config.request_timeout))
}
