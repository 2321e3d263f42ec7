//! Tests for user API handlers.

use super::*;
use crate::domain::Error;
use crate::domain::ports::{
    MockPullRequestCommand, MockReviewQueueQuery, MockTeamCommand, MockTeamQuery, MockUserCommand,
};
use crate::inbound::http::dto::{TeamBody, TeamMemberBody};
use crate::inbound::http::state::HttpStatePorts;
use crate::inbound::http::test_utils::{in_memory_state, test_app};
use actix_web::http::StatusCode;
use actix_web::test as actix_test;
use rstest::rstest;
use serde_json::{Value, json};
use std::sync::Arc;
use std::time::Duration;

fn team(name: &str, members: &[(&str, bool)]) -> TeamBody {
    TeamBody {
        team_name: name.into(),
        members: members
            .iter()
            .map(|(id, active)| TeamMemberBody::new(*id, id.to_uppercase(), *active))
            .collect(),
    }
}

fn mocked_state(users: MockUserCommand, queue: MockReviewQueueQuery) -> HttpState {
    HttpState::new(
        HttpStatePorts {
            teams: Arc::new(MockTeamCommand::new()),
            teams_query: Arc::new(MockTeamQuery::new()),
            users: Arc::new(users),
            review_queue: Arc::new(queue),
            pull_requests: Arc::new(MockPullRequestCommand::new()),
        },
        Duration::from_secs(1),
    )
}

#[actix_web::test]
async fn set_is_active_reports_user_with_team() {
    let (state, _store) = in_memory_state();
    let app = actix_test::init_service(test_app(state)).await;
    let create = actix_test::TestRequest::post()
        .uri("/team/add")
        .set_json(team("payments", &[("u1", true), ("u2", true)]))
        .to_request();
    actix_test::call_service(&app, create).await;

    let request = actix_test::TestRequest::post()
        .uri("/users/setIsActive")
        .set_json(SetIsActiveRequest {
            user_id: "u2".into(),
            is_active: false,
        })
        .to_request();
    let response = actix_test::call_service(&app, request).await;

    assert_eq!(response.status(), StatusCode::OK);
    let body: Value = actix_test::read_body_json(response).await;
    assert_eq!(
        body,
        json!({"user": {"user_id": "u2", "username": "U2", "team_name": "payments", "is_active": false}})
    );
}

#[rstest]
#[case(json!({"user_id": "ghost", "is_active": true}), StatusCode::NOT_FOUND, "NOT_FOUND")]
#[case(json!({"user_id": "  ", "is_active": true}), StatusCode::BAD_REQUEST, "INVALID_REQUEST")]
#[case(json!({"user_id": "u1"}), StatusCode::BAD_REQUEST, "INVALID_REQUEST")]
#[actix_web::test]
async fn set_is_active_failures(
    #[case] payload: Value,
    #[case] status: StatusCode,
    #[case] code: &str,
) {
    let (state, _store) = in_memory_state();
    let app = actix_test::init_service(test_app(state)).await;

    let request = actix_test::TestRequest::post()
        .uri("/users/setIsActive")
        .set_json(payload)
        .to_request();
    let response = actix_test::call_service(&app, request).await;

    assert_eq!(response.status(), status);
    let body: Value = actix_test::read_body_json(response).await;
    assert_eq!(body["error"]["code"], code);
}

#[actix_web::test]
async fn get_review_lists_assigned_pull_requests() {
    let (state, _store) = in_memory_state();
    let app = actix_test::init_service(test_app(state)).await;
    let create_team = actix_test::TestRequest::post()
        .uri("/team/add")
        .set_json(team("backend", &[("author", true), ("r1", true)]))
        .to_request();
    actix_test::call_service(&app, create_team).await;
    let create_pr = actix_test::TestRequest::post()
        .uri("/pullRequest/create")
        .set_json(json!({
            "pull_request_id": "pr-1",
            "pull_request_name": "Add search",
            "author_id": "author",
        }))
        .to_request();
    actix_test::call_service(&app, create_pr).await;

    let request = actix_test::TestRequest::get()
        .uri("/users/getReview?user_id=r1")
        .to_request();
    let response = actix_test::call_service(&app, request).await;

    assert_eq!(response.status(), StatusCode::OK);
    let body: Value = actix_test::read_body_json(response).await;
    assert_eq!(
        body,
        json!({
            "user_id": "r1",
            "pull_requests": [{
                "pull_request_id": "pr-1",
                "pull_request_name": "Add search",
                "author_id": "author",
                "status": "OPEN",
            }],
        })
    );
}

#[rstest]
#[case("/users/getReview?user_id=author")]
#[case("/users/getReview?user_id=ghost")]
#[actix_web::test]
async fn get_review_without_assignments_is_not_found(#[case] uri: &str) {
    let (state, _store) = in_memory_state();
    let app = actix_test::init_service(test_app(state)).await;
    let create_team = actix_test::TestRequest::post()
        .uri("/team/add")
        .set_json(team("backend", &[("author", true)]))
        .to_request();
    actix_test::call_service(&app, create_team).await;

    let request = actix_test::TestRequest::get().uri(uri).to_request();
    let response = actix_test::call_service(&app, request).await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[actix_web::test]
async fn missing_user_id_query_is_invalid_request() {
    let (state, _store) = in_memory_state();
    let app = actix_test::init_service(test_app(state)).await;

    let request = actix_test::TestRequest::get()
        .uri("/users/getReview")
        .to_request();
    let response = actix_test::call_service(&app, request).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body: Value = actix_test::read_body_json(response).await;
    assert_eq!(body["error"]["code"], "INVALID_REQUEST");
}

#[actix_web::test]
async fn store_outage_is_service_unavailable() {
    let mut users = MockUserCommand::new();
    users
        .expect_set_user_active()
        .times(1)
        .returning(|_| Err(Error::service_unavailable("user directory unavailable")));
    let app = actix_test::init_service(test_app(mocked_state(
        users,
        MockReviewQueueQuery::new(),
    )))
    .await;

    let request = actix_test::TestRequest::post()
        .uri("/users/setIsActive")
        .set_json(SetIsActiveRequest {
            user_id: "u1".into(),
            is_active: true,
        })
        .to_request();
    let response = actix_test::call_service(&app, request).await;

    assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
}

#[actix_web::test]
async fn internal_errors_are_redacted() {
    let mut queue = MockReviewQueueQuery::new();
    queue
        .expect_review_queue()
        .withf(|user_id| user_id == "u1")
        .times(1)
        .returning(|_| Err(Error::internal("pull request store error: relation missing")));
    let app = actix_test::init_service(test_app(mocked_state(MockUserCommand::new(), queue))).await;

    let request = actix_test::TestRequest::get()
        .uri("/users/getReview?user_id=u1")
        .to_request();
    let response = actix_test::call_service(&app, request).await;

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body: Value = actix_test::read_body_json(response).await;
    assert_eq!(body["error"]["message"], "Internal server error");
}
