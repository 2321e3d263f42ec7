//! Handler tests for the pull request lifecycle over the in-memory store.

use actix_web::dev::{Service, ServiceResponse};
use actix_web::http::StatusCode;
use actix_web::test as actix_test;
use rstest::rstest;
use serde_json::{Value, json};

use crate::inbound::http::test_utils::{in_memory_state, test_app};

async fn post<S>(app: &S, uri: &str, body: Value) -> ServiceResponse
where
    S: Service<actix_http::Request, Response = ServiceResponse, Error = actix_web::Error>,
{
    let request = actix_test::TestRequest::post()
        .uri(uri)
        .set_json(body)
        .to_request();
    actix_test::call_service(app, request).await
}

async fn post_json<S>(app: &S, uri: &str, body: Value) -> (StatusCode, Value)
where
    S: Service<actix_http::Request, Response = ServiceResponse, Error = actix_web::Error>,
{
    let response = post(app, uri, body).await;
    let status = response.status();
    let payload: Value = actix_test::read_body_json(response).await;
    (status, payload)
}

async fn seed_team<S>(app: &S, members: &[&str])
where
    S: Service<actix_http::Request, Response = ServiceResponse, Error = actix_web::Error>,
{
    let members: Vec<Value> = members
        .iter()
        .map(|id| json!({"user_id": id, "username": id, "is_active": true}))
        .collect();
    let response = post(
        app,
        "/team/add",
        json!({"team_name": "backend", "members": members}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
}

fn create_body(id: &str, author: &str) -> Value {
    json!({"pull_request_id": id, "pull_request_name": "Add search", "author_id": author})
}

#[actix_web::test]
async fn create_assigns_two_oldest_team_mates() {
    let (state, _store) = in_memory_state();
    let app = actix_test::init_service(test_app(state)).await;
    seed_team(&app, &["author", "r1", "r2", "r3"]).await;

    let (status, body) = post_json(&app, "/pullRequest/create", create_body("pr-1", "author")).await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["pr"]["pull_request_id"], "pr-1");
    assert_eq!(body["pr"]["status"], "OPEN");
    assert_eq!(body["pr"]["assigned_reviewers"], json!(["r1", "r2"]));
    assert_eq!(body["pr"]["merged_at"], Value::Null);
}

#[actix_web::test]
async fn duplicate_pull_request_is_conflict() {
    let (state, _store) = in_memory_state();
    let app = actix_test::init_service(test_app(state)).await;
    seed_team(&app, &["author", "r1"]).await;
    post(&app, "/pullRequest/create", create_body("pr-1", "author")).await;

    let (status, body) = post_json(&app, "/pullRequest/create", create_body("pr-1", "author")).await;

    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["error"]["code"], "PR_EXISTS");
}

#[rstest]
#[case(create_body("pr-1", "ghost"), StatusCode::NOT_FOUND, "NOT_FOUND")]
#[case(create_body(" ", "author"), StatusCode::BAD_REQUEST, "INVALID_REQUEST")]
#[case(json!({"pull_request_id": "pr-1"}), StatusCode::BAD_REQUEST, "INVALID_REQUEST")]
#[actix_web::test]
async fn create_failures(#[case] body: Value, #[case] status: StatusCode, #[case] code: &str) {
    let (state, _store) = in_memory_state();
    let app = actix_test::init_service(test_app(state)).await;
    seed_team(&app, &["author", "r1"]).await;

    let (actual, payload) = post_json(&app, "/pullRequest/create", body).await;

    assert_eq!(actual, status);
    assert_eq!(payload["error"]["code"], code);
}

#[actix_web::test]
async fn merge_is_idempotent() {
    let (state, _store) = in_memory_state();
    let app = actix_test::init_service(test_app(state)).await;
    seed_team(&app, &["author", "r1"]).await;
    post(&app, "/pullRequest/create", create_body("pr-1", "author")).await;

    let (first_status, first) =
        post_json(&app, "/pullRequest/merge", json!({"pull_request_id": "pr-1"})).await;
    let (second_status, second) =
        post_json(&app, "/pullRequest/merge", json!({"pull_request_id": "pr-1"})).await;

    assert_eq!(first_status, StatusCode::OK);
    assert_eq!(second_status, StatusCode::OK);
    assert_eq!(first["pr"]["status"], "MERGED");
    assert!(first["pr"]["merged_at"].is_string());
    assert_eq!(first["pr"]["merged_at"], second["pr"]["merged_at"]);
}

#[actix_web::test]
async fn merge_unknown_pull_request_is_not_found() {
    let (state, _store) = in_memory_state();
    let app = actix_test::init_service(test_app(state)).await;

    let (status, body) =
        post_json(&app, "/pullRequest/merge", json!({"pull_request_id": "nope"})).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"]["code"], "NOT_FOUND");
}

#[actix_web::test]
async fn reassign_swaps_in_the_remaining_team_mate() {
    let (state, _store) = in_memory_state();
    let app = actix_test::init_service(test_app(state)).await;
    seed_team(&app, &["author", "r1", "r2", "r3"]).await;
    post(&app, "/pullRequest/create", create_body("pr-1", "author")).await;

    let (status, body) = post_json(
        &app,
        "/pullRequest/reassign",
        json!({"pull_request_id": "pr-1", "old_user_id": "r1"}),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["replaced_by"], "r3");
    assert_eq!(body["pr"]["assigned_reviewers"], json!(["r3", "r2"]));
}

#[rstest]
#[case::merged(&["author", "r1", "r2", "r3"], true, "r1", "PR_MERGED")]
#[case::not_assigned(&["author", "r1", "r2", "r3"], false, "r3", "NOT_ASSIGNED")]
#[case::no_candidate(&["author", "r1", "r2"], false, "r1", "NO_CANDIDATE")]
#[actix_web::test]
async fn reassign_conflicts(
    #[case] members: &[&str],
    #[case] merge_first: bool,
    #[case] old_user_id: &str,
    #[case] code: &str,
) {
    let (state, _store) = in_memory_state();
    let app = actix_test::init_service(test_app(state)).await;
    seed_team(&app, members).await;
    post(&app, "/pullRequest/create", create_body("pr-1", "author")).await;
    if merge_first {
        post(&app, "/pullRequest/merge", json!({"pull_request_id": "pr-1"})).await;
    }

    let (status, body) = post_json(
        &app,
        "/pullRequest/reassign",
        json!({"pull_request_id": "pr-1", "old_user_id": old_user_id}),
    )
    .await;

    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["error"]["code"], code);
}
