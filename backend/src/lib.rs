//! Pull request reviewer assignment service.
//!
//! Hexagonal layout: [`domain`] holds the assignment rules and services,
//! [`inbound`] exposes them over HTTP, and [`outbound`] persists state in
//! PostgreSQL or in memory.

pub mod doc;
pub mod domain;
pub mod inbound;
pub mod middleware;
pub mod outbound;
pub mod settings;

/// Public OpenAPI surface used by Swagger UI and tooling.
pub use doc::ApiDoc;
pub use middleware::Trace;
pub use settings::AppSettings;
