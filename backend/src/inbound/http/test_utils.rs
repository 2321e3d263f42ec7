//! Test helpers for inbound HTTP components.

use std::sync::Arc;
use std::time::Duration;

use actix_web::{App, web};

use crate::domain::assignment::RandomReviewerPicker;
use crate::domain::{PullRequestService, TeamService, UserService};
use crate::inbound::http::state::{HttpState, HttpStatePorts};
use crate::outbound::memory::InMemoryReviewStore;

/// HTTP state wired to a fresh in-memory store.
///
/// The store is returned too so tests can seed or inspect it directly.
pub fn in_memory_state() -> (HttpState, Arc<InMemoryReviewStore>) {
    let store = Arc::new(InMemoryReviewStore::new());
    let teams = Arc::new(TeamService::new(store.clone()));
    let users = Arc::new(UserService::new(store.clone(), store.clone()));
    let pull_requests = Arc::new(PullRequestService::new(
        store.clone(),
        store.clone(),
        store.clone(),
        Arc::new(RandomReviewerPicker::seeded(7)),
    ));

    let state = HttpState::new(
        HttpStatePorts {
            teams: teams.clone(),
            teams_query: teams,
            users: users.clone(),
            review_queue: users,
            pull_requests,
        },
        Duration::from_secs(5),
    );
    (state, store)
}

/// Application with every reviewer endpoint registered over `state`.
pub fn test_app(
    state: HttpState,
) -> App<
    impl actix_web::dev::ServiceFactory<
        actix_web::dev::ServiceRequest,
        Config = (),
        Response = actix_web::dev::ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    App::new()
        .app_data(web::Data::new(state))
        .configure(super::configure)
}
