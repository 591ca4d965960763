//! Tests for the domain user model.

use super::*;
use rstest::rstest;
use serde_json::json;

const VALID_ID: &str = "3fa85f64-5717-4562-b3fc-2c963f66afa6";

#[rstest]
#[case("", UserValidationError::EmptyId)]
#[case("not-a-uuid", UserValidationError::InvalidId)]
#[case(" 3fa85f64-5717-4562-b3fc-2c963f66afa6", UserValidationError::InvalidId)]
fn user_id_rejects_malformed_values(#[case] raw: &str, #[case] expected: UserValidationError) {
    assert_eq!(UserId::new(raw), Err(expected));
}

#[rstest]
fn user_id_keeps_original_text() {
    let id = UserId::new(VALID_ID).expect("valid id");
    assert_eq!(id.as_ref(), VALID_ID);
    assert_eq!(id.as_uuid().to_string(), VALID_ID);
    assert_eq!(UserId::from_uuid(*id.as_uuid()), id);
}

#[rstest]
#[case("author")]
#[case("  padded  ")]
#[case("mail@example.org")]
#[case("dots.and+plus-dash_under")]
#[case("Лев_Толстой")]
fn usernames_accept_django_character_set(#[case] raw: &str) {
    let username = Username::new(raw).expect("valid username");
    assert_eq!(username.as_ref(), raw.trim());
}

#[rstest]
#[case("", UserValidationError::EmptyUsername)]
#[case("   ", UserValidationError::EmptyUsername)]
#[case("has space", UserValidationError::UsernameInvalidCharacters)]
#[case("semi;colon", UserValidationError::UsernameInvalidCharacters)]
fn usernames_reject_invalid_input(#[case] raw: &str, #[case] expected: UserValidationError) {
    assert_eq!(Username::new(raw), Err(expected));
}

#[rstest]
fn usernames_enforce_maximum_length() {
    assert!(Username::new("a".repeat(USERNAME_MAX)).is_ok());
    assert_eq!(
        Username::new("a".repeat(USERNAME_MAX + 1)),
        Err(UserValidationError::UsernameTooLong { max: USERNAME_MAX })
    );
}

#[rstest]
fn user_serialises_camel_case() {
    let user = User::try_from_strings(VALID_ID, "author").expect("valid user");
    let value = serde_json::to_value(&user).expect("serialise");
    assert_eq!(value, json!({ "id": VALID_ID, "username": "author" }));
}

#[rstest]
fn user_deserialisation_validates_fields() {
    let payload = json!({ "id": VALID_ID, "username": "bad name" });
    assert!(serde_json::from_value::<User>(payload).is_err());
}
