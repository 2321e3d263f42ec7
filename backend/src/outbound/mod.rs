//! Outbound adapters implementing domain ports for external infrastructure.
//!
//! This module follows the hexagonal architecture pattern, providing concrete
//! implementations of the driven port traits:
//!
//! - **persistence**: PostgreSQL-backed directories and store using Diesel ORM
//! - **memory**: a mutex-guarded in-process store for tests and local runs
//!
//! Adapters are thin translators that convert between domain types and
//! infrastructure-specific representations. Reviewer selection stays in the
//! domain.

pub mod memory;
pub mod persistence;
