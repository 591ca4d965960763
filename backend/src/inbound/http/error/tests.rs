//! Tests for HTTP error mapping.

use super::*;
use crate::domain::{Error, FormErrors};
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

#[rstest]
#[case(Error::invalid_request("bad"), StatusCode::BAD_REQUEST)]
#[case(Error::login_required("/notes/"), StatusCode::FOUND)]
#[case(Error::not_found("missing"), StatusCode::NOT_FOUND)]
#[case(Error::service_unavailable("down"), StatusCode::SERVICE_UNAVAILABLE)]
#[case(Error::internal("boom"), StatusCode::INTERNAL_SERVER_ERROR)]
fn status_code_matches_error_code(#[case] error: Error, #[case] status: StatusCode) {
    assert_eq!(ResponseError::status_code(&error), status);
}

#[rstest]
#[case("/add/", "/auth/login/?next=/add/")]
#[case("/edit/note-slug/", "/auth/login/?next=/edit/note-slug/")]
#[case("/?cursor=abc&x=1", "/auth/login/?next=/%3Fcursor%3Dabc%26x%3D1")]
fn login_target_keeps_slashes(#[case] next: &str, #[case] expected: &str) {
    assert_eq!(login_redirect_target(next), expected);
}

#[rstest]
fn login_required_redirects_with_next() {
    let response = Error::login_required("/news/1/").error_response();
    assert_eq!(response.status(), StatusCode::FOUND);
    let location = response
        .headers()
        .get(header::LOCATION)
        .expect("location header")
        .to_str()
        .expect("ascii location");
    assert_eq!(location, "/auth/login/?next=/news/1/");
}

#[rstest]
fn bare_unauthorized_redirects_home_afterwards() {
    let response = Error::unauthorized("who are you").error_response();
    let location = response
        .headers()
        .get(header::LOCATION)
        .expect("location header");
    assert_eq!(location, "/auth/login/?next=/");
}

async fn read_error(error: Error, expected_status: StatusCode) -> Error {
    let response = ResponseError::error_response(&error);
    assert_eq!(response.status(), expected_status);
    let header = response
        .headers()
        .get(TRACE_ID_HEADER)
        .map(|value| value.to_str().expect("ascii").to_owned());
    assert_eq!(header.as_deref(), error.trace_id());

    let bytes = to_bytes(response.into_body())
        .await
        .expect("reading response body succeeds");
    serde_json::from_slice(&bytes).expect("Error JSON deserialisation succeeds")
}

#[rstest]
#[actix_web::test]
async fn internal_errors_are_redacted(expected_trace_id: String) {
    let error = Error::internal("connection string leaked")
        .with_trace_id(expected_trace_id.clone())
        .with_details(json!({"secret": "x"}));

    let payload = read_error(error, StatusCode::INTERNAL_SERVER_ERROR).await;
    assert_eq!(payload.code(), ErrorCode::InternalError);
    assert_eq!(payload.message(), "Internal server error");
    assert_eq!(payload.trace_id(), Some(expected_trace_id.as_str()));
    assert!(payload.details().is_none());
}

#[rstest]
#[actix_web::test]
async fn unavailable_errors_are_redacted() {
    let payload = read_error(
        Error::service_unavailable("pool timed out after 30s"),
        StatusCode::SERVICE_UNAVAILABLE,
    )
    .await;
    assert_eq!(payload.message(), "Service unavailable");
}

#[rstest]
#[actix_web::test]
async fn validation_errors_keep_field_details() {
    let mut errors = FormErrors::default();
    errors.add("slug", "taken");
    let payload = read_error(Error::validation(errors.clone()), StatusCode::BAD_REQUEST).await;
    assert_eq!(payload.form_errors(), Some(errors));
}

#[rstest]
fn from_actix_error_is_redacted_internal_error() {
    let actix_err = actix_web::error::ErrorBadRequest("boom");
    let err: Error = actix_err.into();

    assert_eq!(err.code(), ErrorCode::InternalError);
    assert_eq!(err.message(), "Internal server error");
    assert_eq!(err.details(), None);
}
