//! Tests for domain error construction and trace correlation.

use super::*;
use rstest::{fixture, rstest};
use serde_json::json;

const TRACE_ID: &str = "00000000-0000-0000-0000-000000000000";

#[fixture]
fn expected_trace_id() -> String {
    TRACE_ID.to_owned()
}

#[rstest]
#[case(Error::invalid_request("bad"), ErrorCode::InvalidRequest)]
#[case(Error::not_found("missing"), ErrorCode::NotFound)]
#[case(Error::conflict("taken"), ErrorCode::Conflict)]
#[case(Error::service_unavailable("down"), ErrorCode::ServiceUnavailable)]
#[case(Error::internal("boom"), ErrorCode::InternalError)]
fn constructors_set_code(#[case] error: Error, #[case] expected: ErrorCode) {
    assert_eq!(error.code(), expected);
}

#[rstest]
fn new_returns_none_when_trace_id_out_of_scope() {
    let error = Error::internal("boom");
    assert!(error.trace_id().is_none());
}

#[rstest]
#[tokio::test]
async fn new_captures_trace_id_in_scope(expected_trace_id: String) {
    let trace_id: TraceId = expected_trace_id
        .parse()
        .expect("fixtures provide a valid UUID");
    let error = TraceId::scope(trace_id, async move { Error::conflict("taken") }).await;

    assert_eq!(error.trace_id(), Some(expected_trace_id.as_str()));
}

#[rstest]
fn details_can_be_attached_and_dropped() {
    let error = Error::invalid_request("bad").with_details(json!({"field": "email"}));
    assert_eq!(error.details(), Some(&json!({"field": "email"})));
    assert!(error.without_details().details().is_none());
}

#[rstest]
fn serialises_camel_case_and_skips_empty_fields(expected_trace_id: String) {
    let value = serde_json::to_value(Error::not_found("missing").with_trace_id(expected_trace_id))
        .expect("serialise error");
    assert_eq!(
        value,
        json!({"code": "not_found", "message": "missing", "traceId": TRACE_ID})
    );
}

#[rstest]
fn display_uses_message() {
    assert_eq!(Error::conflict("duplicate").to_string(), "duplicate");
}
