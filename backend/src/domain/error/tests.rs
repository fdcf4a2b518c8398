//! Tests for the domain error payload.

use super::*;
use rstest::rstest;
use serde_json::json;

#[rstest]
#[case(Error::invalid_request("bad"), ErrorCode::InvalidRequest)]
#[case(Error::unauthorized("who"), ErrorCode::Unauthorized)]
#[case(Error::not_found("gone"), ErrorCode::NotFound)]
#[case(Error::conflict("taken"), ErrorCode::Conflict)]
#[case(Error::internal("boom"), ErrorCode::InternalError)]
fn convenience_constructors_set_codes(#[case] error: Error, #[case] code: ErrorCode) {
    assert_eq!(error.code(), code);
}

#[test]
fn try_new_rejects_blank_messages() {
    let result = Error::try_new(ErrorCode::InvalidRequest, "   ");
    assert_eq!(result, Err(ErrorValidationError::EmptyMessage));
}

#[test]
fn new_panics_on_blank_message() {
    let result = std::panic::catch_unwind(|| Error::new(ErrorCode::InternalError, ""));
    assert!(result.is_err());
}

#[test]
fn details_round_trip_through_serde() {
    let error = Error::conflict("handle is already taken")
        .with_details(json!({ "field": "handle", "alternatives": ["mage1"] }));

    let value = serde_json::to_value(&error).expect("serialise");
    assert_eq!(value.get("code").and_then(|v| v.as_str()), Some("conflict"));
    assert_eq!(
        value
            .get("details")
            .and_then(|d| d.get("field"))
            .and_then(|v| v.as_str()),
        Some("handle")
    );

    let parsed: Error = serde_json::from_value(value).expect("deserialise");
    assert_eq!(parsed, error);
}

#[test]
fn deserialising_a_blank_message_fails() {
    let value = json!({ "code": "not_found", "message": "  " });
    let result: Result<Error, _> = serde_json::from_value(value);
    assert!(result.is_err());
}

#[test]
fn display_shows_the_message() {
    assert_eq!(Error::not_found("missing profile").to_string(), "missing profile");
}
