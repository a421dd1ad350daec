//! Tests for HTTP error mapping.

use super::*;
use actix_web::body::to_bytes;
use rstest::rstest;
use serde_json::{Value, json};

const TRACE_ID: &str = "00000000-0000-0000-0000-000000000000";

#[rstest]
#[case(Error::invalid_request("bad"), StatusCode::BAD_REQUEST)]
#[case(Error::already_registered("Already registered"), StatusCode::BAD_REQUEST)]
#[case(Error::unauthorized("login required"), StatusCode::UNAUTHORIZED)]
#[case(Error::forbidden("Unauthorized"), StatusCode::FORBIDDEN)]
#[case(Error::not_found("Event not found"), StatusCode::NOT_FOUND)]
#[case(Error::server_error("boom"), StatusCode::INTERNAL_SERVER_ERROR)]
fn status_code_matches_error_code(#[case] err: Error, #[case] status: StatusCode) {
    assert_eq!(ResponseError::status_code(&err), status);
}

async fn body_of(response: HttpResponse) -> Value {
    let bytes = to_bytes(response.into_body())
        .await
        .expect("reading response body succeeds");
    serde_json::from_slice(&bytes).expect("error JSON")
}

#[rstest]
#[actix_web::test]
async fn internal_errors_keep_their_cause() {
    let err = Error::server_error("event repository query failed: database error")
        .with_trace_id(TRACE_ID);
    let response = ResponseError::error_response(&err);

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let header = response
        .headers()
        .get(TRACE_ID_HEADER)
        .expect("trace-id header")
        .to_str()
        .expect("ascii header")
        .to_owned();
    assert_eq!(header, TRACE_ID);
    assert_eq!(
        body_of(response).await,
        json!({
            "code": "internal_error",
            "message": "Server error",
            "error": "event repository query failed: database error",
            "traceId": TRACE_ID,
        })
    );
}

#[rstest]
#[actix_web::test]
async fn responses_without_trace_id_omit_header() {
    let response = ResponseError::error_response(&Error::not_found("Event not found"));
    assert!(response.headers().get(TRACE_ID_HEADER).is_none());
    assert_eq!(
        body_of(response).await,
        json!({ "code": "not_found", "message": "Event not found" })
    );
}
