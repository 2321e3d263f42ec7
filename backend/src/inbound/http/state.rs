//! Shared HTTP adapter state.
//!
//! HTTP handlers accept this state via `actix_web::web::Data` so they only
//! depend on domain ports (use-cases) and remain testable without I/O.

use std::sync::Arc;
use std::time::Duration;

use crate::domain::ports::{
    PullRequestCommand, ReviewQueueQuery, TeamCommand, TeamQuery, UserCommand,
};

/// Default per-request deadline applied to service calls.
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_millis(5_000);

/// Parameter object bundling all port implementations for HTTP handlers.
#[derive(Clone)]
pub struct HttpStatePorts {
    pub teams: Arc<dyn TeamCommand>,
    pub teams_query: Arc<dyn TeamQuery>,
    pub users: Arc<dyn UserCommand>,
    pub review_queue: Arc<dyn ReviewQueueQuery>,
    pub pull_requests: Arc<dyn PullRequestCommand>,
}

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    pub teams: Arc<dyn TeamCommand>,
    pub teams_query: Arc<dyn TeamQuery>,
    pub users: Arc<dyn UserCommand>,
    pub review_queue: Arc<dyn ReviewQueueQuery>,
    pub pull_requests: Arc<dyn PullRequestCommand>,
    pub request_timeout: Duration,
}

impl From<HttpStatePorts> for HttpState {
    fn from(ports: HttpStatePorts) -> Self {
        Self::new(ports, DEFAULT_REQUEST_TIMEOUT)
    }
}

impl HttpState {
    /// Construct state from explicit port implementations and a deadline.
    ///
    /// # Examples
    /// ```
    /// use std::sync::Arc;
    /// use std::time::Duration;
    ///
    /// use pr_reviewers::domain::{PullRequestService, TeamService, UserService};
    /// use pr_reviewers::domain::assignment::RandomReviewerPicker;
    /// use pr_reviewers::inbound::http::state::{HttpState, HttpStatePorts};
    /// use pr_reviewers::outbound::memory::InMemoryReviewStore;
    ///
    /// let store = Arc::new(InMemoryReviewStore::new());
    /// let team_service = Arc::new(TeamService::new(store.clone()));
    /// let user_service = Arc::new(UserService::new(store.clone(), store.clone()));
    /// let pull_requests = Arc::new(PullRequestService::new(
    ///     store.clone(),
    ///     store.clone(),
    ///     store.clone(),
    ///     Arc::new(RandomReviewerPicker::default()),
    /// ));
    ///
    /// let state = HttpState::new(
    ///     HttpStatePorts {
    ///         teams: team_service.clone(),
    ///         teams_query: team_service,
    ///         users: user_service.clone(),
    ///         review_queue: user_service,
    ///         pull_requests,
    ///     },
    ///     Duration::from_secs(2),
    /// );
    /// assert_eq!(state.request_timeout, Duration::from_secs(2));
    /// ```
    pub fn new(ports: HttpStatePorts, request_timeout: Duration) -> Self {
        let HttpStatePorts {
            teams,
            teams_query,
            users,
            review_queue,
            pull_requests,
        } = ports;
        Self {
            teams,
            teams_query,
            users,
            review_queue,
            pull_requests,
            request_timeout,
        }
    }
}
