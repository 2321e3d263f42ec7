//! Extractor configuration for inbound HTTP adapters.
//!
//! Actix rejects malformed bodies and query strings before handlers run. These
//! handlers turn those rejections into `INVALID_REQUEST` domain errors so
//! clients see the same envelope as for any other validation failure.

use actix_web::error::{JsonPayloadError, QueryPayloadError};
use actix_web::{HttpRequest, web};
use serde_json::json;
use tracing::debug;

use crate::domain::Error;

const INVALID_JSON: &str = "invalid json payload";
const INVALID_QUERY: &str = "invalid query parameters";

fn invalid_json(err: JsonPayloadError, req: &HttpRequest) -> actix_web::Error {
    debug!(path = %req.path(), error = %err, "rejected request body");
    Error::invalid_request(INVALID_JSON)
        .with_details(json!({ "reason": err.to_string() }))
        .into()
}

fn invalid_query(err: QueryPayloadError, req: &HttpRequest) -> actix_web::Error {
    debug!(path = %req.path(), error = %err, "rejected query string");
    Error::invalid_request(INVALID_QUERY)
        .with_details(json!({ "reason": err.to_string() }))
        .into()
}

/// JSON extractor configuration reporting failures as `INVALID_REQUEST`.
pub fn json_config() -> web::JsonConfig {
    web::JsonConfig::default().error_handler(invalid_json)
}

/// Query extractor configuration reporting failures as `INVALID_REQUEST`.
pub fn query_config() -> web::QueryConfig {
    web::QueryConfig::default().error_handler(invalid_query)
}

#[cfg(test)]
mod tests {
    //! Extractor rejections surface as domain validation errors.

    use actix_web::{App, HttpResponse, test as actix_test, web};
    use rstest::rstest;
    use serde::Deserialize;
    use serde_json::Value;

    use super::*;

    #[derive(Deserialize)]
    struct Body {
        name: String,
    }

    #[derive(Deserialize)]
    struct Params {
        id: String,
    }

    async fn accept_body(body: web::Json<Body>) -> HttpResponse {
        HttpResponse::Ok().body(body.into_inner().name)
    }

    async fn accept_query(params: web::Query<Params>) -> HttpResponse {
        HttpResponse::Ok().body(params.into_inner().id)
    }

    #[rstest]
    #[case("{not json", "invalid json payload")]
    #[case("{\"other\": 1}", "invalid json payload")]
    #[actix_web::test]
    async fn malformed_json_is_invalid_request(#[case] body: &str, #[case] message: &str) {
        let app = actix_test::init_service(
            App::new()
                .app_data(json_config())
                .route("/echo", web::post().to(accept_body)),
        )
        .await;

        let request = actix_test::TestRequest::post()
            .uri("/echo")
            .insert_header(("content-type", "application/json"))
            .set_payload(body.to_owned())
            .to_request();
        let response = actix_test::call_service(&app, request).await;

        assert_eq!(response.status(), actix_web::http::StatusCode::BAD_REQUEST);
        let payload: Value = actix_test::read_body_json(response).await;
        assert_eq!(payload["error"]["code"], "INVALID_REQUEST");
        assert_eq!(payload["error"]["message"], message);
    }

    #[actix_web::test]
    async fn missing_query_parameter_is_invalid_request() {
        let app = actix_test::init_service(
            App::new()
                .app_data(query_config())
                .route("/lookup", web::get().to(accept_query)),
        )
        .await;

        let request = actix_test::TestRequest::get().uri("/lookup").to_request();
        let response = actix_test::call_service(&app, request).await;

        assert_eq!(response.status(), actix_web::http::StatusCode::BAD_REQUEST);
        let payload: Value = actix_test::read_body_json(response).await;
        assert_eq!(payload["error"]["code"], "INVALID_REQUEST");
        assert_eq!(payload["error"]["message"], "invalid query parameters");
    }
}
