//! Tests for the domain user model.

use super::*;
use rstest::{fixture, rstest};

const VALID_ID: &str = "3fa85f64-5717-4562-b3fc-2c963f66afa6";

#[fixture]
fn draft() -> UserDraft {
    UserDraft {
        id: UserId::new(VALID_ID).expect("fixture id"),
        email: "cook@example.com".to_owned(),
        username: "home.cook".to_owned(),
        first_name: "Ada".to_owned(),
        last_name: "Byron".to_owned(),
        is_admin: false,
    }
}

#[rstest]
#[case::empty("", UserValidationError::EmptyId)]
#[case::padded(" 3fa85f64-5717-4562-b3fc-2c963f66afa6", UserValidationError::InvalidId)]
#[case::garbage("not-a-uuid", UserValidationError::InvalidId)]
fn user_id_rejects_invalid_input(#[case] raw: &str, #[case] expected: UserValidationError) {
    assert_eq!(UserId::new(raw), Err(expected));
}

#[rstest]
fn user_id_serde_round_trips_as_string() {
    let id = UserId::new(VALID_ID).expect("valid id");
    let json = serde_json::to_value(&id).expect("serialize");
    assert_eq!(json, serde_json::Value::String(VALID_ID.to_owned()));
    let parsed: UserId = serde_json::from_value(json).expect("deserialize");
    assert_eq!(parsed, id);
}

#[rstest]
#[case::plain("cook")]
#[case::symbols("chef.o+k@kitchen-1")]
#[case::underscore("sous_chef")]
fn username_accepts_allowed_characters(#[case] raw: &str) {
    assert!(Username::new(raw).is_ok());
}

#[rstest]
#[case::blank("  ", UserValidationError::EmptyUsername)]
#[case::space("two words", UserValidationError::UsernameInvalidCharacters)]
#[case::slash("a/b", UserValidationError::UsernameInvalidCharacters)]
#[case::reserved("me", UserValidationError::UsernameReserved)]
#[case::reserved_upper("ME", UserValidationError::UsernameReserved)]
fn username_rejects_invalid_input(#[case] raw: &str, #[case] expected: UserValidationError) {
    assert_eq!(Username::new(raw), Err(expected));
}

#[rstest]
fn username_rejects_overlong_values() {
    let raw = "a".repeat(USERNAME_MAX + 1);
    assert_eq!(
        Username::new(raw),
        Err(UserValidationError::UsernameTooLong { max: USERNAME_MAX })
    );
}

#[rstest]
fn user_new_keeps_fields(draft: UserDraft) {
    let user = User::new(draft).expect("valid user");
    assert_eq!(user.id().as_ref(), VALID_ID);
    assert_eq!(user.email(), "cook@example.com");
    assert_eq!(user.username().as_ref(), "home.cook");
    assert_eq!(user.first_name(), "Ada");
    assert_eq!(user.last_name(), "Byron");
    assert!(!user.is_admin());
}

#[rstest]
fn user_new_rejects_blank_email(mut draft: UserDraft) {
    draft.email = " ".to_owned();
    assert_eq!(User::new(draft), Err(UserValidationError::EmptyEmail));
}
