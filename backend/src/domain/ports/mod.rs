//! Domain ports and supporting types for the hexagonal boundary.
//!
//! Driven ports ([`TeamDirectory`], [`UserDirectory`], [`PullRequestStore`])
//! are implemented by outbound adapters. Driving ports ([`TeamCommand`],
//! [`TeamQuery`], [`UserCommand`], [`ReviewQueueQuery`],
//! [`PullRequestCommand`]) are implemented by domain services and called by
//! inbound adapters.

mod macros;
pub(crate) use macros::define_port_error;

mod pull_request_command;
mod pull_request_store;
mod team_command;
mod team_directory;
mod user_command;
mod user_directory;

#[cfg(test)]
pub use pull_request_command::MockPullRequestCommand;
pub use pull_request_command::{
    CreatePullRequestRequest, MergePullRequestRequest, PullRequestCommand,
    ReassignReviewerRequest, ReassignReviewerResponse,
};
#[cfg(test)]
pub use pull_request_store::MockPullRequestStore;
pub use pull_request_store::{PullRequestStore, PullRequestStoreError};
#[cfg(test)]
pub use team_command::{MockTeamCommand, MockTeamQuery};
pub use team_command::{CreateTeamRequest, TeamCommand, TeamMemberPayload, TeamQuery};
#[cfg(test)]
pub use team_directory::MockTeamDirectory;
pub use team_directory::{TeamDirectory, TeamDirectoryError};
#[cfg(test)]
pub use user_command::{MockReviewQueueQuery, MockUserCommand};
pub use user_command::{ReviewQueue, ReviewQueueQuery, SetUserActiveRequest, UserCommand};
#[cfg(test)]
pub use user_directory::MockUserDirectory;
pub use user_directory::{UserDirectory, UserDirectoryError, UserMembership};
