//! HTTP inbound adapter exposing REST endpoints.

use actix_web::web;

pub mod deadline;
pub mod dto;
pub mod error;
pub mod health;
pub mod pull_requests;
pub mod schemas;
pub mod state;
#[cfg(test)]
pub mod test_utils;
pub mod teams;
pub mod users;
pub mod validation;

pub use error::ApiResult;

/// Register extractor configuration and every reviewer endpoint.
///
/// Handlers expect `web::Data<state::HttpState>` to be registered by the
/// caller.
///
/// # Examples
/// ```
/// use actix_web::App;
/// use pr_reviewers::inbound::http::configure;
///
/// let app = App::new().configure(configure);
/// ```
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.app_data(validation::json_config())
        .app_data(validation::query_config())
        .service(teams::create_team)
        .service(teams::get_team)
        .service(users::set_is_active)
        .service(users::get_review)
        .service(pull_requests::create_pull_request)
        .service(pull_requests::merge_pull_request)
        .service(pull_requests::reassign_reviewer);
}
