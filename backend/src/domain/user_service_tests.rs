//! Tests for the user service.

use std::sync::Arc;

use pagination::PageRequest;
use rstest::rstest;

use super::*;
use crate::domain::ports::MockUserRepository;
use crate::domain::{ErrorCode, User};
use crate::test_support::{fixture_clock, fixture_timestamp, profile};

fn make_service(repo: MockUserRepository) -> UserService<MockUserRepository> {
    UserService::new(Arc::new(repo), fixture_clock())
}

fn stored_user(email: &str) -> User {
    User::new(UserId::random(), profile(email, "Alice Example"), fixture_timestamp())
}

#[tokio::test]
async fn create_assigns_clock_time_and_returns_detail() {
    let mut repo = MockUserRepository::new();
    repo.expect_exists_by_email()
        .withf(|email, exclude| email.as_str() == "alice@example.com" && exclude.is_none())
        .times(1)
        .return_once(|_, _| Ok(false));
    repo.expect_create()
        .withf(|draft| draft.id.is_none() && draft.created_at == Some(fixture_timestamp()))
        .times(1)
        .return_once(|draft| Ok(draft.into_user(fixture_timestamp())));

    let service = make_service(repo);
    let detail = service
        .create_user(CreateUserRequest {
            profile: profile("alice@example.com", "Alice Example"),
        })
        .await
        .expect("create succeeds");

    assert_eq!(detail.email, "alice@example.com");
    assert_eq!(detail.first_name, "Alice");
    assert_eq!(detail.last_name, "Example");
    assert_eq!(detail.created_utc, fixture_timestamp());
}

#[tokio::test]
async fn create_rejects_taken_email() {
    let mut repo = MockUserRepository::new();
    repo.expect_exists_by_email()
        .times(1)
        .return_once(|_, _| Ok(true));
    repo.expect_create().times(0);

    let error = make_service(repo)
        .create_user(CreateUserRequest {
            profile: profile("alice@example.com", "Someone Else"),
        })
        .await
        .expect_err("conflict");

    assert_eq!(error.code(), ErrorCode::Conflict);
    assert!(error.message().contains("alice@example.com"));
}

#[tokio::test]
async fn update_excludes_self_from_uniqueness_check() {
    let existing = stored_user("alice@example.com");
    let id = existing.id();
    let mut repo = MockUserRepository::new();
    repo.expect_find_by_id()
        .times(1)
        .return_once(move |_| Ok(Some(existing)));
    repo.expect_exists_by_email()
        .withf(move |_, exclude| *exclude == Some(id))
        .times(1)
        .return_once(|_, _| Ok(false));
    repo.expect_update()
        .times(1)
        .returning(|user| Ok(Some(user.clone())));

    let mut changed = profile("alice@example.com", "Alice Renamed");
    changed.is_active = false;
    let detail = make_service(repo)
        .update_user(UpdateUserRequest {
            user_id: id,
            profile: changed,
        })
        .await
        .expect("update succeeds");

    assert_eq!(detail.full_name, "Alice Renamed");
    assert!(!detail.is_active);
    assert_eq!(detail.created_utc, fixture_timestamp());
}

#[tokio::test]
async fn update_missing_user_is_not_found() {
    let mut repo = MockUserRepository::new();
    repo.expect_find_by_id().times(1).return_once(|_| Ok(None));
    repo.expect_exists_by_email().times(0);

    let error = make_service(repo)
        .update_user(UpdateUserRequest {
            user_id: UserId::random(),
            profile: profile("bob@example.com", "Bob Example"),
        })
        .await
        .expect_err("not found");

    assert_eq!(error.code(), ErrorCode::NotFound);
}

#[tokio::test]
async fn get_missing_user_is_not_found() {
    let mut repo = MockUserRepository::new();
    repo.expect_find_by_id().times(1).return_once(|_| Ok(None));

    let error = make_service(repo)
        .get_user(UserId::random())
        .await
        .expect_err("not found");

    assert_eq!(error.code(), ErrorCode::NotFound);
}

#[tokio::test]
async fn list_wraps_repository_page() {
    let users = vec![stored_user("a@example.com"), stored_user("b@example.com")];
    let mut repo = MockUserRepository::new();
    repo.expect_list()
        .withf(|page| page.page() == 2 && page.page_size() == 2)
        .times(1)
        .return_once(move |_| Ok((users, 5)));

    let page = make_service(repo)
        .list_users(PageRequest::new(2, 2))
        .await
        .expect("list succeeds");

    assert_eq!(page.items.len(), 2);
    assert_eq!(page.total_count, 5);
    assert_eq!(page.total_pages, 3);
}

#[tokio::test]
async fn delete_missing_user_is_not_found() {
    let mut repo = MockUserRepository::new();
    repo.expect_delete().times(1).return_once(|_| Ok(false));

    let error = make_service(repo)
        .delete_user(UserId::random())
        .await
        .expect_err("delete fails");

    assert_eq!(error.code(), ErrorCode::NotFound);
}

#[rstest]
#[case(UserRepositoryError::connection("refused"), ErrorCode::ServiceUnavailable)]
#[case(UserRepositoryError::query("syntax"), ErrorCode::InternalError)]
#[case(UserRepositoryError::duplicate("users_email_key"), ErrorCode::Conflict)]
#[tokio::test]
async fn repository_errors_map_to_domain_codes(
    #[case] failure: UserRepositoryError,
    #[case] expected: ErrorCode,
) {
    let mut repo = MockUserRepository::new();
    repo.expect_find_by_id()
        .times(1)
        .return_once(move |_| Err(failure));

    let error = make_service(repo)
        .get_user(UserId::random())
        .await
        .expect_err("repository failure");

    assert_eq!(error.code(), expected);
}
