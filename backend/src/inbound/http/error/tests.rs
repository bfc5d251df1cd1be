//! Tests for HTTP error mapping.

use super::*;
use crate::domain::Error;
use actix_web::ResponseError;
use actix_web::body::to_bytes;
use actix_web::http::StatusCode;
use rstest::{fixture, rstest};
use serde_json::json;

const TRACE_ID: &str = "00000000-0000-0000-0000-000000000000";

#[fixture]
fn expected_trace_id() -> String {
    TRACE_ID.to_owned()
}

#[fixture]
fn internal_error_case(expected_trace_id: String) -> Error {
    Error::internal("employee store error: disk on fire")
        .with_trace_id(expected_trace_id)
        .with_details(json!({"secret": "x"}))
}

#[fixture]
fn invalid_request_case(expected_trace_id: String) -> Error {
    Error::invalid_request("Validation failed")
        .with_trace_id(expected_trace_id)
        .with_details(json!({"Violations": [{"Field": "Email", "Message": "Email is required"}]}))
}

#[rstest]
#[case(Error::invalid_request("bad"), StatusCode::BAD_REQUEST)]
#[case(Error::not_found("missing"), StatusCode::NOT_FOUND)]
#[case(Error::conflict("taken"), StatusCode::CONFLICT)]
#[case(Error::service_unavailable("down"), StatusCode::SERVICE_UNAVAILABLE)]
#[case(Error::internal("boom"), StatusCode::INTERNAL_SERVER_ERROR)]
fn status_code_matches_error_code(#[case] err: Error, #[case] status: StatusCode) {
    assert_eq!(ResponseError::status_code(&err), status);
}

async fn assert_error_response(
    error: Error,
    expected_status: StatusCode,
    expected_trace_id: Option<&str>,
) -> Error {
    let response = ResponseError::error_response(&error);
    assert_eq!(response.status(), expected_status);
    assert_eq!(
        response
            .headers()
            .get(actix_web::http::header::CACHE_CONTROL)
            .and_then(|value| value.to_str().ok()),
        Some("no-store")
    );

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

    serde_json::from_slice(&bytes).expect("Error JSON deserialisation succeeds")
}

#[rstest]
#[actix_web::test]
async fn internal_errors_are_redacted_but_keep_the_trace_id(
    #[from(internal_error_case)] internal_error: Error,
    expected_trace_id: String,
) {
    let redacted = assert_error_response(
        internal_error,
        StatusCode::INTERNAL_SERVER_ERROR,
        Some(expected_trace_id.as_str()),
    )
    .await;
    assert_eq!(redacted.code(), ErrorCode::InternalError);
    assert_eq!(redacted.message(), INTERNAL_ERROR_MESSAGE);
    assert_eq!(redacted.trace_id(), Some(expected_trace_id.as_str()));
    assert!(redacted.details().is_none());
}

#[rstest]
#[actix_web::test]
async fn client_errors_keep_message_and_details(
    #[from(invalid_request_case)] invalid_request: Error,
    expected_trace_id: String,
) {
    let payload = assert_error_response(
        invalid_request,
        StatusCode::BAD_REQUEST,
        Some(expected_trace_id.as_str()),
    )
    .await;
    assert_eq!(payload.code(), ErrorCode::InvalidRequest);
    assert_eq!(payload.message(), "Validation failed");
    assert_eq!(
        payload
            .details()
            .and_then(|details| details.pointer("/Violations/0/Field")),
        Some(&json!("Email"))
    );
}

#[rstest]
#[actix_web::test]
async fn error_without_trace_id_omits_trace_header() {
    let error = Error::conflict("Employee with email a@b.co already exists")
        .with_details(json!({"Field": "Email", "Code": "email_exists"}));

    let payload = assert_error_response(error, StatusCode::CONFLICT, None).await;
    assert_eq!(payload.code(), ErrorCode::Conflict);
    assert_eq!(payload.trace_id(), None);
    assert_eq!(
        payload.details(),
        Some(&json!({"Field": "Email", "Code": "email_exists"}))
    );
}

#[rstest]
#[case(ErrorCode::NotFound, "missing")]
#[case(ErrorCode::Conflict, "taken")]
fn client_errors_reach_the_client_unchanged(#[case] code: ErrorCode, #[case] message: &str) {
    let error = Error::new(code, message)
        .with_trace_id(TRACE_ID)
        .with_details(json!({"Code": "email_exists"}));
    assert_eq!(client_view(&error), error);
}

#[rstest]
#[actix_web::test]
async fn unavailable_store_keeps_message_but_drops_details(expected_trace_id: String) {
    let error = Error::service_unavailable("Employee store is unavailable")
        .with_trace_id(expected_trace_id.clone())
        .with_details(json!({"Connection": "store lock poisoned"}));

    let payload = assert_error_response(
        error,
        StatusCode::SERVICE_UNAVAILABLE,
        Some(expected_trace_id.as_str()),
    )
    .await;
    assert_eq!(payload.message(), "Employee store is unavailable");
    assert_eq!(payload.trace_id(), Some(expected_trace_id.as_str()));
    assert!(payload.details().is_none());
}

#[rstest]
#[case(actix_web::error::ErrorBadRequest("boom"), ErrorCode::InvalidRequest, "Bad Request")]
#[case(
    actix_web::error::ErrorPayloadTooLarge("huge"),
    ErrorCode::InvalidRequest,
    "Payload Too Large"
)]
#[case(
    actix_web::error::ErrorInternalServerError("pool gone"),
    ErrorCode::InternalError,
    INTERNAL_ERROR_MESSAGE
)]
fn framework_errors_map_by_status_class(
    #[case] actix_err: actix_web::Error,
    #[case] code: ErrorCode,
    #[case] message: &str,
) {
    let err: Error = actix_err.into();

    assert_eq!(err.code(), code);
    assert_eq!(err.message(), message);
    assert_eq!(err.trace_id(), None);
    assert_eq!(err.details(), None);
}
