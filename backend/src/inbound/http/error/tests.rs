//! Tests for HTTP error mapping.

use super::*;
use crate::domain::Error;
use actix_web::ResponseError;
use actix_web::body::to_bytes;
use actix_web::http::StatusCode;
use rstest::{fixture, rstest};
use serde_json::{Value, json};

const TRACE_ID: &str = "00000000-0000-0000-0000-000000000000";

#[fixture]
fn expected_trace_id() -> String {
    TRACE_ID.to_owned()
}

#[fixture]
fn internal_error_case(expected_trace_id: String) -> Error {
    Error::internal("boom")
        .with_trace_id(expected_trace_id)
        .with_details(json!({"secret": "x"}))
}

#[fixture]
fn invalid_request_case(expected_trace_id: String) -> Error {
    Error::invalid_request("bad")
        .with_trace_id(expected_trace_id)
        .with_details(json!({"field": "team_name"}))
}

#[rstest]
#[case(Error::team_exists("taken"), StatusCode::BAD_REQUEST)]
#[case(Error::invalid_request("bad"), StatusCode::BAD_REQUEST)]
#[case(Error::pull_request_exists("dup"), StatusCode::CONFLICT)]
#[case(Error::pull_request_merged("merged"), StatusCode::CONFLICT)]
#[case(Error::not_assigned("stranger"), StatusCode::CONFLICT)]
#[case(Error::no_candidate("empty"), StatusCode::CONFLICT)]
#[case(Error::not_found("missing"), StatusCode::NOT_FOUND)]
#[case(Error::service_unavailable("down"), StatusCode::SERVICE_UNAVAILABLE)]
#[case(Error::internal("boom"), StatusCode::INTERNAL_SERVER_ERROR)]
fn status_code_matches_error_code(#[case] err: Error, #[case] status: StatusCode) {
    assert_eq!(ResponseError::status_code(&err), status);
}

async fn assert_error_response(
    error: Error,
    expected_status: StatusCode,
    expected_trace_id: Option<&str>,
) -> Value {
    let response = ResponseError::error_response(&error);
    assert_eq!(response.status(), expected_status);

    let header = response.headers().get(TRACE_ID_HEADER);
    match expected_trace_id {
        Some(expected) => {
            let trace_id = header
                .expect("trace-id header is set by error_response")
                .to_str()
                .expect("trace-id not valid UTF-8");
            assert_eq!(trace_id, expected);
        }
        None => assert!(header.is_none(), "trace-id header should not be present"),
    }

    let bytes = to_bytes(response.into_body())
        .await
        .expect("reading response body succeeds");

    serde_json::from_slice(&bytes).expect("error JSON deserialisation succeeds")
}

fn unwrap_envelope(payload: Value) -> Error {
    let inner = payload
        .get("error")
        .cloned()
        .expect("payload is wrapped in an error envelope");
    serde_json::from_value(inner).expect("envelope holds a domain error")
}

#[rstest]
#[actix_web::test]
async fn error_responses_include_trace_id_and_payloads(
    #[from(internal_error_case)] internal_error: Error,
    #[from(invalid_request_case)] invalid_request: Error,
    expected_trace_id: String,
) {
    let redacted = unwrap_envelope(
        assert_error_response(
            internal_error,
            StatusCode::INTERNAL_SERVER_ERROR,
            Some(expected_trace_id.as_str()),
        )
        .await,
    );
    assert_eq!(redacted.code(), ErrorCode::InternalError);
    assert_eq!(redacted.message(), "Internal server error");
    assert_eq!(redacted.trace_id(), Some(TRACE_ID));
    assert!(redacted.details().is_none());

    let payload = unwrap_envelope(
        assert_error_response(
            invalid_request,
            StatusCode::BAD_REQUEST,
            Some(expected_trace_id.as_str()),
        )
        .await,
    );
    assert_eq!(payload.code(), ErrorCode::InvalidRequest);
    assert_eq!(payload.message(), "bad");
    assert_eq!(payload.details(), Some(&json!({"field": "team_name"})));
}

#[rstest]
#[actix_web::test]
async fn error_without_trace_id_omits_trace_header() {
    let error = Error::not_found("resource not found");

    let payload = unwrap_envelope(
        assert_error_response(error, StatusCode::NOT_FOUND, None).await,
    );
    assert_eq!(payload.code(), ErrorCode::NotFound);
    assert_eq!(payload.trace_id(), None);
}

#[rstest]
#[actix_web::test]
async fn conflict_envelope_uses_wire_codes() {
    let error = Error::pull_request_merged("cannot reassign on merged PR").with_trace_id(TRACE_ID);

    let payload = assert_error_response(error, StatusCode::CONFLICT, Some(TRACE_ID)).await;

    insta::assert_json_snapshot!(payload, @r#"
    {
      "error": {
        "code": "PR_MERGED",
        "message": "cannot reassign on merged PR",
        "trace_id": "00000000-0000-0000-0000-000000000000"
      }
    }
    "#);
}

#[rstest]
fn redaction_keeps_trace_id_and_drops_details(internal_error_case: Error) {
    let redacted = redact_if_internal(&internal_error_case);

    assert_eq!(redacted.message(), "Internal server error");
    assert_eq!(redacted.trace_id(), Some(TRACE_ID));
    assert!(redacted.details().is_none());
}

#[rstest]
fn redaction_leaves_client_errors_untouched(invalid_request_case: Error) {
    assert_eq!(redact_if_internal(&invalid_request_case), invalid_request_case);
}

#[test]
fn from_actix_error_is_redacted_internal_error() {
    use actix_web::error;

    let actix_err = error::ErrorBadRequest("boom");
    let err: Error = actix_err.into();

    assert_eq!(err.code(), ErrorCode::InternalError);
    assert_eq!(err.message(), "Internal server error");
    assert_eq!(err.trace_id(), None);
    assert_eq!(err.details(), None);
}
