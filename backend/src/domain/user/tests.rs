//! Validation coverage for user value types.

use chrono::{TimeZone, Utc};
use rstest::rstest;

use super::*;

#[rstest]
#[case("alice@example.com")]
#[case("Bob.Smith+training@sub.example.org")]
fn accepts_plausible_emails(#[case] raw: &str) {
    let email = EmailAddress::new(raw).expect("valid email");
    assert_eq!(email.as_str(), raw);
}

#[rstest]
#[case("  alice@x.com  ", "alice@x.com")]
#[case("\tbob@example.com\n", "bob@example.com")]
fn surrounding_whitespace_is_trimmed(#[case] raw: &str, #[case] stored: &str) {
    let email = EmailAddress::new(raw).expect("valid email");
    assert_eq!(email.as_str(), stored);
}

#[rstest]
fn email_pattern_compiles() {
    assert!(LazyLock::force(&EMAIL_RE).is_match("carol@example.com"));
}

#[rstest]
#[case("", UserValidationError::EmptyEmail)]
#[case("   ", UserValidationError::EmptyEmail)]
#[case("alice", UserValidationError::InvalidEmail)]
#[case("alice@", UserValidationError::InvalidEmail)]
#[case("a b@example.com", UserValidationError::InvalidEmail)]
fn rejects_malformed_emails(#[case] raw: &str, #[case] expected: UserValidationError) {
    assert_eq!(EmailAddress::new(raw), Err(expected));
}

#[rstest]
fn rejects_overlong_email() {
    let raw = format!("{}@example.com", "a".repeat(EMAIL_MAX));
    assert_eq!(
        EmailAddress::new(raw),
        Err(UserValidationError::EmailTooLong { max: EMAIL_MAX })
    );
}

#[rstest]
fn emails_compare_case_sensitively() {
    let lower = EmailAddress::new("alice@example.com").expect("valid email");
    let upper = EmailAddress::new("Alice@example.com").expect("valid email");
    assert_ne!(lower, upper);
}

#[rstest]
#[case("Alice Example", "Alice", "Example", "Alice Example")]
#[case("  Cher  ", "Cher", "", "Cher")]
#[case("Ada King Lovelace", "Ada", "King Lovelace", "Ada King Lovelace")]
fn parse_splits_on_first_space(
    #[case] raw: &str,
    #[case] first: &str,
    #[case] last: &str,
    #[case] full: &str,
) {
    let name = PersonName::parse(raw).expect("valid name");
    assert_eq!(name.first_name(), first);
    assert_eq!(name.last_name(), last);
    assert_eq!(name.full_name(), full);
}

#[rstest]
fn parse_rejects_blank_and_overlong_names() {
    assert_eq!(
        PersonName::parse("   "),
        Err(UserValidationError::EmptyFullName)
    );
    assert_eq!(
        PersonName::parse(&"x".repeat(FULL_NAME_MAX + 1)),
        Err(UserValidationError::FullNameTooLong { max: FULL_NAME_MAX })
    );
}

#[rstest]
fn validation_errors_report_their_field() {
    assert_eq!(UserValidationError::InvalidEmail.field(), "email");
    assert_eq!(UserValidationError::EmptyFullName.field(), "fullName");
}

fn profile(email: &str) -> UserProfile {
    UserProfile {
        email: EmailAddress::new(email).expect("valid email"),
        name: PersonName::from_parts("Alice", "Example"),
        is_active: true,
    }
}

#[rstest]
fn new_user_fills_missing_identity_and_timestamp() {
    let now = Utc
        .with_ymd_and_hms(2026, 3, 1, 9, 0, 0)
        .single()
        .expect("valid timestamp");
    let user = NewUser::new(profile("alice@example.com")).into_user(now);
    assert_eq!(user.created_at(), now);
    assert!(user.is_active());
}

#[rstest]
fn new_user_keeps_supplied_identity() {
    let id = UserId::random();
    let created = Utc
        .with_ymd_and_hms(2025, 1, 1, 0, 0, 0)
        .single()
        .expect("valid timestamp");
    let user = NewUser {
        id: Some(id),
        profile: profile("alice@example.com"),
        created_at: Some(created),
    }
    .into_user(Utc::now());
    assert_eq!(user.id(), id);
    assert_eq!(user.created_at(), created);
}

#[rstest]
fn with_profile_preserves_identity() {
    let user = NewUser::new(profile("alice@example.com")).into_user(Utc::now());
    let id = user.id();
    let created = user.created_at();
    let updated = user.with_profile(UserProfile {
        is_active: false,
        ..profile("alice@corp.example.com")
    });
    assert_eq!(updated.id(), id);
    assert_eq!(updated.created_at(), created);
    assert_eq!(updated.email().as_str(), "alice@corp.example.com");
    assert!(!updated.is_active());
}
