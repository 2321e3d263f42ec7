//! HTTP server configuration object and helpers.

use std::net::SocketAddr;
use std::time::Duration;

use pr_reviewers::domain::assignment::ReassignmentPolicy;
use pr_reviewers::inbound::http::state::DEFAULT_REQUEST_TIMEOUT;
use pr_reviewers::outbound::persistence::DbPool;

const DEFAULT_SHUTDOWN_TIMEOUT: Duration = Duration::from_secs(15);

/// Builder-style configuration for creating the HTTP server.
pub struct ServerConfig {
    pub(crate) bind_addr: SocketAddr,
    pub(crate) db_pool: Option<DbPool>,
    pub(crate) request_timeout: Duration,
    pub(crate) shutdown_timeout: Duration,
    pub(crate) policy: ReassignmentPolicy,
}

impl ServerConfig {
    /// Configuration with in-memory storage and default timeouts.
    #[must_use]
    pub fn new(bind_addr: SocketAddr) -> Self {
        Self {
            bind_addr,
            db_pool: None,
            request_timeout: DEFAULT_REQUEST_TIMEOUT,
            shutdown_timeout: DEFAULT_SHUTDOWN_TIMEOUT,
            policy: ReassignmentPolicy::default(),
        }
    }

    /// Attach a database connection pool for persistence adapters.
    ///
    /// Without a pool the server keeps teams and pull requests in memory.
    #[must_use]
    pub fn with_db_pool(mut self, pool: DbPool) -> Self {
        self.db_pool = Some(pool);
        self
    }

    /// Per-request deadline for service calls.
    #[must_use]
    pub fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }

    /// Grace period for in-flight requests on shutdown.
    #[must_use]
    pub fn with_shutdown_timeout(mut self, timeout: Duration) -> Self {
        self.shutdown_timeout = timeout;
        self
    }

    /// Replacement pool policy for reassignment.
    #[must_use]
    pub fn with_policy(mut self, policy: ReassignmentPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Return the socket address the server will bind to.
    #[must_use]
    pub fn bind_addr(&self) -> SocketAddr {
        self.bind_addr
    }
}
