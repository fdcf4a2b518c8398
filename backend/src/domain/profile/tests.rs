//! Tests for the profile identity model.

use super::*;
use chrono::TimeZone;
use rstest::{fixture, rstest};
use rstest_bdd_macros::{given, then, when};
use serde_json::json;

const VALID_ID: &str = "3fa85f64-5717-4562-b3fc-2c963f66afa6";

#[fixture]
fn created_at() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 6, 1, 12, 0, 0).single().expect("valid timestamp")
}

#[rstest]
fn handle_preserves_submitted_casing() {
    let handle = Handle::new("GandalfTheGrey").expect("valid handle");
    assert_eq!(handle.as_ref(), "GandalfTheGrey");
    assert_eq!(handle.normalized(), "gandalfthegrey");
}

#[rstest]
#[case("ab")]
#[case("admin")]
#[case("spell caster")]
fn handle_rejects_rule_breakers(#[case] candidate: &str) {
    assert!(Handle::new(candidate).is_err());
}

#[rstest]
fn profile_id_round_trips_canonical_uuids() {
    let id = ProfileId::new(VALID_ID).expect("valid id");
    assert_eq!(id.to_string(), VALID_ID);
}

#[rstest]
#[case("")]
#[case("not-a-uuid")]
#[case(" 3fa85f64-5717-4562-b3fc-2c963f66afa6 ")]
fn profile_id_rejects_malformed_input(#[case] raw: &str) {
    let result = ProfileId::new(raw);
    assert!(result.is_err());
}

#[rstest]
fn register_mints_distinct_ids() {
    let first = Profile::register(Handle::new("mage-one").expect("valid"));
    let second = Profile::register(Handle::new("mage-two").expect("valid"));
    assert_ne!(first.id(), second.id());
}

#[rstest]
fn serde_emits_camel_case(created_at: DateTime<Utc>) {
    let profile =
        Profile::try_from_parts(VALID_ID, "GandalfTheGrey", created_at).expect("valid profile");
    let value = serde_json::to_value(profile).expect("serialise");

    assert_eq!(value.get("id").and_then(|v| v.as_str()), Some(VALID_ID));
    assert_eq!(
        value.get("handle").and_then(|v| v.as_str()),
        Some("GandalfTheGrey")
    );
    assert!(value.get("createdAt").is_some());
    assert!(value.get("created_at").is_none());
}

#[rstest]
fn serde_rejects_profiles_with_invalid_handles(created_at: DateTime<Utc>) {
    let value = json!({
        "id": VALID_ID,
        "handle": "ab",
        "createdAt": created_at.to_rfc3339(),
    });
    let result: Result<Profile, _> = serde_json::from_value(value);
    assert!(result.is_err());
}

#[given("a valid profile payload")]
fn a_valid_profile_payload(created_at: DateTime<Utc>) -> (String, String, DateTime<Utc>) {
    (VALID_ID.to_owned(), "GandalfTheGrey".to_owned(), created_at)
}

#[when("the profile is constructed")]
fn the_profile_is_constructed(
    payload: (String, String, DateTime<Utc>),
) -> Result<Profile, ProfileValidationError> {
    let (id, handle, created_at) = payload;
    Profile::try_from_parts(id, handle, created_at)
}

#[then("the profile is returned")]
fn the_profile_is_returned(result: Result<Profile, ProfileValidationError>) {
    let profile = result.expect("profile should be created");
    assert_eq!(profile.id().to_string(), VALID_ID);
    assert_eq!(profile.handle().as_ref(), "GandalfTheGrey");
}

#[rstest]
fn constructing_a_profile_happy_path(created_at: DateTime<Utc>) {
    let payload = a_valid_profile_payload(created_at);
    let result = the_profile_is_constructed(payload);
    the_profile_is_returned(result);
}

#[rstest]
fn constructing_a_profile_with_a_reserved_handle_fails(created_at: DateTime<Utc>) {
    let result = Profile::try_from_parts(VALID_ID, "admin", created_at);
    assert!(matches!(
        result,
        Err(ProfileValidationError::InvalidHandle(handle::Violation::Reserved))
    ));
}
