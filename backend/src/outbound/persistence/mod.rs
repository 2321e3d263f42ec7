//! PostgreSQL persistence adapters using Diesel ORM.
//!
//! Concrete implementations of the directory and store ports backed by
//! PostgreSQL via Diesel, with async support through `diesel-async` and `bb8`
//! connection pooling.
//!
//! # Architecture
//!
//! - **Thin adapters**: implementations translate between Diesel rows and
//!   domain types. Assignment rules live in the domain.
//! - **Internal models**: row structs (`models.rs`) and table definitions
//!   (`schema.rs`) never leave this module.
//! - **Constraint-backed conflicts**: duplicate ids and missing authors are
//!   detected from PostgreSQL constraint violations, not pre-checks.
//!
//! # Example
//!
//! ```ignore
//! use pr_reviewers::outbound::persistence::{DbPool, DieselTeamDirectory, PoolConfig};
//!
//! let pool = DbPool::new(PoolConfig::new("postgres://localhost/reviews")).await?;
//! let teams = DieselTeamDirectory::new(pool);
//! ```

mod diesel_basic_error_mapping;
mod diesel_pull_request_store;
mod diesel_team_directory;
mod diesel_user_directory;
mod migrations;
mod models;
mod pool;
mod schema;

pub use diesel_pull_request_store::DieselPullRequestStore;
pub use diesel_team_directory::DieselTeamDirectory;
pub use diesel_user_directory::DieselUserDirectory;
pub use migrations::{
    MIGRATIONS, MigrationError, run_pending_migrations, run_pending_migrations_blocking,
};
pub use pool::{DbPool, PoolConfig, PoolError};
